use rand::Rng;
use tracing::debug;

use crate::settings::RainBounds;
use crate::{Error, Result};

/// Flat `[x0, y0, z0, x1, y1, z1, ...]` particle positions plus the flag
/// the renderer polls to know the positions need re-uploading.
#[derive(Clone, Debug)]
pub struct RainBuffer {
    positions: Vec<f32>,
    dirty: bool,
}

impl RainBuffer {
    /// Seeds `count` particles uniformly inside `bounds`.
    pub fn initialize(count: usize, bounds: &RainBounds) -> Result<Self> {
        Self::initialize_with_rng(count, bounds, &mut rand::thread_rng())
    }

    pub fn initialize_with_rng<R: Rng + ?Sized>(
        count: usize,
        bounds: &RainBounds,
        rng: &mut R,
    ) -> Result<Self> {
        bounds.validate()?;

        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            positions.push(rng.gen_range(bounds.x.min..=bounds.x.max));
            positions.push(rng.gen_range(bounds.y.min..=bounds.y.max));
            positions.push(rng.gen_range(bounds.z.min..=bounds.z.max));
        }
        debug!(count, "rain buffer seeded");

        Ok(Self {
            positions,
            dirty: true,
        })
    }

    pub fn from_positions(positions: Vec<f32>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(Error::BufferSizeMismatch {
                len: positions.len(),
            });
        }
        Ok(Self {
            positions,
            dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn particle(&self, index: usize) -> Option<[f32; 3]> {
        let start = index.checked_mul(3)?;
        let slice = self.positions.get(start..start + 3)?;
        Some([slice[0], slice[1], slice[2]])
    }

    pub fn particles(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    /// Lowest and highest `y` in the buffer.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        let mut ys = self.positions.iter().skip(1).step_by(3).copied();
        let first = ys.next()?;
        Some(ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the positions changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Span;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn seeds_inside_bounds() -> Result<()> {
        let bounds = RainBounds::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let buffer = RainBuffer::initialize_with_rng(500, &bounds, &mut rng)?;

        assert_eq!(buffer.len(), 500);
        assert_eq!(buffer.positions().len(), 1500);
        for [x, y, z] in buffer.particles() {
            assert!(bounds.x.contains(x));
            assert!(bounds.y.contains(y));
            assert!(bounds.z.contains(z));
        }
        Ok(())
    }

    #[test]
    fn collapsed_span_is_allowed() -> Result<()> {
        let bounds = RainBounds {
            y: Span::new(3.0, 3.0),
            ..RainBounds::default()
        };
        let buffer = RainBuffer::initialize(10, &bounds)?;
        assert_eq!(buffer.y_range(), Some((3.0, 3.0)));
        Ok(())
    }

    #[test]
    fn from_positions_checks_length() {
        let err = RainBuffer::from_positions(vec![0.0; 7]).unwrap_err();
        assert!(matches!(err, Error::BufferSizeMismatch { len: 7 }));
        assert!(RainBuffer::from_positions(Vec::new()).is_ok());
    }

    #[test]
    fn take_dirty_clears_flag() -> Result<()> {
        let mut buffer = RainBuffer::from_positions(vec![1.0, 2.0, 3.0])?;
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
        buffer.mark_dirty();
        assert!(buffer.is_dirty());
        Ok(())
    }

    #[test]
    fn particle_lookup() -> Result<()> {
        let buffer = RainBuffer::from_positions(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        assert_eq!(buffer.particle(1), Some([4.0, 5.0, 6.0]));
        assert_eq!(buffer.particle(2), None);
        Ok(())
    }
}
