use rainhouse_rain::StepParams;
use tracing::trace;

use crate::house::DROP_PER_TICK;
use crate::node::SceneNode;
use crate::{Error, Result};

/// Receives each frame after the rain has stepped. Stands in for the renderer.
pub trait FrameSink {
    /// Called only on frames where the rain positions changed.
    fn upload_rain(&mut self, positions: &[f32]);

    fn present(&mut self, frame: u64, scene: &SceneNode);
}

#[derive(Clone, Debug)]
pub struct FrameState {
    pub frame: u64,
    pub scene: SceneNode,
    /// Floor, ceiling and fallback drop distance; a `DropPerTick` tunable on
    /// the rain node overrides the drop distance.
    pub step: StepParams,
}

impl FrameState {
    pub fn new(scene: SceneNode, step: StepParams) -> Self {
        Self {
            frame: 0,
            scene,
            step,
        }
    }

    pub fn step_params(&self) -> StepParams {
        let drop = self
            .scene
            .rain_node()
            .and_then(|node| node.tunable(DROP_PER_TICK))
            .map(|tunable| tunable.value() as f32);
        match drop {
            Some(drop_per_tick) => StepParams {
                drop_per_tick,
                ..self.step
            },
            None => self.step,
        }
    }
}

/// Advances the scene by exactly one frame.
pub fn tick(mut state: FrameState) -> Result<FrameState> {
    let params = state.step_params();
    let buffer = state
        .scene
        .rain_buffer_mut()
        .ok_or(Error::MissingNode("rain"))?;
    let wrapped = buffer.step(&params)?;
    state.frame += 1;
    trace!(frame = state.frame, wrapped, "tick");
    Ok(state)
}

/// Runs `frames` ticks, handing each one to `sink`: step, upload if dirty, present.
pub fn run_frames<S: FrameSink + ?Sized>(
    mut state: FrameState,
    frames: u64,
    sink: &mut S,
) -> Result<FrameState> {
    for _ in 0..frames {
        state = tick(state)?;
        if let Some(buffer) = state.scene.rain_buffer_mut() {
            if buffer.take_dirty() {
                sink.upload_rain(buffer.positions());
            }
        }
        sink.present(state.frame, &state.scene);
    }
    Ok(state)
}
