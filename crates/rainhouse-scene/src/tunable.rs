use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Numeric value exposed to a parameter panel, bounded to `[min, max]` and
/// snapped to multiples of `step` above `min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tunable {
    value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Tunable {
    /// Bounds and step must be finite; a non-finite `value` starts at `min`.
    pub fn new(value: f64, min: f64, max: f64, step: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "tunable range [{min}, {max}] step {step} must be finite"
            )));
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut tunable = Self {
            value: min,
            min,
            max,
            step: step.abs(),
        };
        tunable.set(value);
        Ok(tunable)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Stores `value` clamped and snapped; returns what was stored.
    pub fn set(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.value;
        }
        let mut value = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            let steps = ((value - self.min) / self.step).round();
            value = (self.min + steps * self.step).min(self.max);
        }
        self.value = value;
        value
    }
}
