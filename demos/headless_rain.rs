use anyhow::Result;
use rainhouse_rain::{RainBounds, RainBuffer, StepParams};

fn main() -> Result<()> {
    let mut buffer = RainBuffer::initialize(10_000, &RainBounds::default())?;
    let params = StepParams {
        drop_per_tick: 0.5,
        floor: -250.0,
        ceiling: 250.0,
    };
    for frame in 0..1000 {
        let wrapped = buffer.step(&params)?;
        if wrapped > 0 {
            println!("frame {frame}: {wrapped} drops wrapped");
        }
    }
    Ok(())
}
