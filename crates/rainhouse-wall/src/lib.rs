use rainhouse_base::Tolerance;
use rainhouse_geometry::profiles::WallOutline;
use rainhouse_io::triangulate_face;
use rainhouse_topology::ApertureShape;
use thiserror::Error;
use tracing::debug;

pub use rainhouse_geometry::profiles::WindowHole;
pub use rainhouse_io::WallMesh;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid geometry input: {0}")]
    InvalidGeometryInput(String),
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

impl From<rainhouse_base::Error> for Error {
    fn from(err: rainhouse_base::Error) -> Self {
        match err {
            rainhouse_base::Error::InvalidParameter(reason) => Error::InvalidGeometryInput(reason),
        }
    }
}

impl From<rainhouse_topology::Error> for Error {
    fn from(err: rainhouse_topology::Error) -> Self {
        match err {
            rainhouse_topology::Error::InvalidGeometryInput(reason) => {
                Error::InvalidGeometryInput(reason)
            }
            rainhouse_topology::Error::Modeling(err) => {
                Error::Degenerate(format!("failed to build wall face: {err}"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds a planar wall spanning `[-width/2, width/2] x [0, height]` with a
/// rectangular cutout for every hole. UVs span the wall's own bounds.
pub fn build_wall_with_holes(width: f64, height: f64, holes: &[WindowHole]) -> Result<WallMesh> {
    build_wall_with_tolerance(width, height, holes, Tolerance::default())
}

/// The wall is modeled with its larger side scaled to 1, so `tol` is relative
/// to that side and any positive finite size builds the same way.
pub fn build_wall_with_tolerance(
    width: f64,
    height: f64,
    holes: &[WindowHole],
    tol: Tolerance,
) -> Result<WallMesh> {
    WallOutline::new(width, height)?;
    let scale = width.max(height);
    let unit_outline = WallOutline::new(width / scale, height / scale)?;
    let unit_holes: Vec<WindowHole> = holes.iter().map(|hole| hole.scaled(1.0 / scale)).collect();
    let shape = ApertureShape::new(unit_outline, &unit_holes, tol)?;
    let face = shape.to_face()?;

    let mut mesh = triangulate_face(&face, tol.tessellation);
    if mesh.is_empty() {
        return Err(Error::Degenerate("triangulation produced empty mesh".to_string()));
    }
    ensure_holes_are_open(&mesh, &shape, tol)?;
    mesh.scale(scale);

    let bounds = mesh
        .remap_uvs_to_bounds()
        .ok_or_else(|| Error::Degenerate("wall mesh has zero extent".to_string()))?;

    debug!(
        width,
        height,
        holes = holes.len(),
        vertices = mesh.positions().len(),
        triangles = mesh.triangles().len(),
        min_x = bounds.min.x,
        max_x = bounds.max.x,
        "wall mesh built"
    );
    Ok(mesh)
}

fn ensure_holes_are_open(mesh: &WallMesh, shape: &ApertureShape, tol: Tolerance) -> Result<()> {
    let rects: Vec<_> = shape.holes().iter().map(WindowHole::rect).collect();
    for tri in mesh.triangles() {
        let centroid = mesh.centroid(tri);
        if let Some(idx) = rects.iter().position(|rect| rect.contains_point(centroid)) {
            return Err(Error::Degenerate(format!(
                "triangulation covers hole {}",
                idx + 1
            )));
        }
    }

    let expected = shape.outline().bounds().area() - rects.iter().map(|r| r.area()).sum::<f64>();
    let actual = mesh.area();
    if (actual - expected).abs() > expected.abs() * 1.0e-6 + tol.linear {
        return Err(Error::Degenerate(format!(
            "triangulated area {actual} does not match wall area {expected}"
        )));
    }
    Ok(())
}
