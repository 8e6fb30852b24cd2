use thiserror::Error;

pub mod frame;
pub mod house;
pub mod node;
pub mod tunable;

pub use frame::{FrameSink, FrameState, run_frames, tick};
pub use house::{DROP_PER_TICK, HouseConfig, assemble_house, assemble_house_with_rng};
pub use node::{NodeCategory, NodePayload, ParameterSet, ParameterValue, SceneNode, Transform};
pub use tunable::Tunable;

#[derive(Error, Debug)]
pub enum Error {
    #[error("scene has no {0} node")]
    MissingNode(&'static str),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Wall(#[from] rainhouse_wall::Error),
    #[error(transparent)]
    Rain(#[from] rainhouse_rain::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
