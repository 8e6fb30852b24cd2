use anyhow::Result;
use rainhouse_io::export_obj;
use rainhouse_wall::{WindowHole, build_wall_with_holes};

fn main() -> Result<()> {
    let windows = [
        WindowHole::new(-6.0, 7.0, 3.0, 2.8),
        WindowHole::new(5.0, 7.0, 3.0, 2.8),
    ];
    let mesh = build_wall_with_holes(19.0, 12.0, &windows)?;
    export_obj(&mesh, "out/back_wall.obj")?;
    Ok(())
}
