use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Guid(Uuid);

impl Guid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comparison tolerances shared by the geometry crates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tolerance {
    /// Minimum gap between edges, in world units.
    pub linear: f64,
    /// Chord tolerance handed to the triangulator.
    pub tessellation: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: 1.0e-6,
            tessellation: 0.01,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "{name} must be a finite value > 0"
        )));
    }
    Ok(())
}
