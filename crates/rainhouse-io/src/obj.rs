use anyhow::{Context, Result, bail};
use std::fs::File;
use std::path::Path;
use truck_polymesh::obj;

use crate::mesh::WallMesh;

pub fn export_obj(mesh: &WallMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    if mesh.is_empty() {
        bail!("refusing to export an empty wall mesh");
    }

    let polygon = mesh.to_polygon_mesh();
    let file = File::create(path).with_context(|| format!("create OBJ file {}", path.display()))?;
    obj::write(&polygon, file).with_context(|| format!("write OBJ file {}", path.display()))?;
    Ok(())
}
