//! Rain particles: a flat `x, y, z` position buffer that drifts downward
//! one step per rendered frame and wraps back to the ceiling.

use thiserror::Error;

pub mod buffer;
pub mod settings;
pub mod step;

pub use buffer::RainBuffer;
pub use settings::{RainBounds, RainSettings, Span};
pub use step::{StepParams, step_positions};

#[derive(Error, Debug)]
pub enum Error {
    #[error("buffer length {len} is not a multiple of 3")]
    BufferSizeMismatch { len: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
