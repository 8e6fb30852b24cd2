use anyhow::Result;
use rainhouse_base::Tolerance;
use rainhouse_geometry::profiles::{WallOutline, WindowHole};
use rainhouse_io::{WallMesh, export_obj, triangulate_face};
use rainhouse_topology::ApertureShape;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_millis(),
        Err(_) => 0,
    };
    path.push(format!("rainhouse_{stamp}_{file_name}"));
    path
}

fn window_wall() -> Result<WallMesh> {
    let outline = WallOutline::new(19.0, 12.0)?;
    let holes = [
        WindowHole::new(-6.0, 7.0, 3.0, 2.8),
        WindowHole::new(5.0, 7.0, 3.0, 2.8),
    ];
    let tol = Tolerance::default();
    let shape = ApertureShape::new(outline, &holes, tol)?;
    Ok(triangulate_face(&shape.to_face()?, tol.tessellation))
}

#[test]
fn triangulation_excludes_holes() -> Result<()> {
    let mesh = window_wall()?;
    assert!(!mesh.is_empty());

    let expected = 19.0 * 12.0 - 2.0 * 3.0 * 2.8;
    assert!((mesh.area() - expected).abs() < 1.0e-6);
    assert_eq!(mesh.boundary_loops(), 3);
    Ok(())
}

#[test]
fn export_obj_creates_file() -> Result<()> {
    let mut mesh = window_wall()?;
    mesh.remap_uvs_to_bounds();
    let path = temp_path("wall.obj");

    export_obj(&mesh, &path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.lines().any(|line| line.starts_with("v ")));
    assert!(text.lines().any(|line| line.starts_with("vt ")));
    assert!(text.lines().any(|line| line.starts_with("f ")));

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn export_obj_rejects_empty_mesh() {
    let path = temp_path("empty.obj");
    assert!(export_obj(&WallMesh::default(), &path).is_err());
}
