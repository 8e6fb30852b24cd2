use tracing::trace;

use crate::buffer::RainBuffer;
use crate::settings::RainSettings;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub drop_per_tick: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl StepParams {
    pub fn validate(&self) -> Result<()> {
        if !self.drop_per_tick.is_finite() || self.drop_per_tick < 0.0 {
            return Err(Error::InvalidParameter(
                "drop per tick must be finite and >= 0".to_string(),
            ));
        }
        if !self.floor.is_finite() || !self.ceiling.is_finite() || self.floor >= self.ceiling {
            return Err(Error::InvalidParameter(format!(
                "floor {} must be below ceiling {}",
                self.floor, self.ceiling
            )));
        }
        Ok(())
    }
}

impl From<&RainSettings> for StepParams {
    fn from(settings: &RainSettings) -> Self {
        Self {
            drop_per_tick: settings.drop_per_tick,
            floor: settings.floor,
            ceiling: settings.ceiling,
        }
    }
}

/// Lowers every particle's `y` by `drop_per_tick`; particles that fall
/// below `floor` jump back to `ceiling` keeping their `x` and `z`.
/// Returns how many particles wrapped.
pub fn step_positions(positions: &mut [f32], params: &StepParams) -> Result<usize> {
    if positions.len() % 3 != 0 {
        return Err(Error::BufferSizeMismatch {
            len: positions.len(),
        });
    }
    params.validate()?;

    let mut wrapped = 0;
    for particle in positions.chunks_exact_mut(3) {
        let y = &mut particle[1];
        *y -= params.drop_per_tick;
        if *y < params.floor {
            *y = params.ceiling;
            wrapped += 1;
        }
    }
    Ok(wrapped)
}

impl RainBuffer {
    /// Advances the buffer by one frame and flags it for re-upload.
    pub fn step(&mut self, params: &StepParams) -> Result<usize> {
        let wrapped = step_positions(self.positions_mut(), params)?;
        self.mark_dirty();
        trace!(particles = self.len(), wrapped, "rain stepped");
        Ok(wrapped)
    }
}
