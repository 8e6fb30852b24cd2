use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Closed interval `[min, max]` on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn symmetric(half: f32) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, axis: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidParameter(format!("{axis} span must be finite")));
        }
        if self.min > self.max {
            return Err(Error::InvalidParameter(format!(
                "{axis} span min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Box the particles are seeded in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RainBounds {
    pub x: Span,
    pub y: Span,
    pub z: Span,
}

impl Default for RainBounds {
    fn default() -> Self {
        Self {
            x: Span::symmetric(200.0),
            y: Span::symmetric(250.0),
            z: Span::symmetric(200.0),
        }
    }
}

impl RainBounds {
    pub fn validate(&self) -> Result<()> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.z.validate("z")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    pub count: usize,
    pub bounds: RainBounds,
    pub drop_per_tick: f32,
    pub floor: f32,
    pub ceiling: f32,
    /// Point color as `0xRRGGBB`, for the renderer.
    pub color: u32,
    pub point_size: f32,
    pub transparent: bool,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            count: 10_000,
            bounds: RainBounds::default(),
            drop_per_tick: 0.5,
            floor: -250.0,
            ceiling: 250.0,
            color: 0xaaaaaa,
            point_size: 0.1,
            transparent: true,
        }
    }
}
