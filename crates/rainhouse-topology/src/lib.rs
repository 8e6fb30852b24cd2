use rainhouse_base::Tolerance;
use rainhouse_geometry::Point2;
use rainhouse_geometry::profiles::{Rect2, WallOutline, WindowHole};
use thiserror::Error;
use truck_modeling::builder;

pub use truck_modeling::{Edge, Face, Point3, Shell, Vertex, Wire};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid geometry input: {0}")]
    InvalidGeometryInput(String),
    #[error(transparent)]
    Modeling(#[from] truck_modeling::errors::Error),
}

impl From<rainhouse_base::Error> for Error {
    fn from(err: rainhouse_base::Error) -> Self {
        match err {
            rainhouse_base::Error::InvalidParameter(reason) => Error::InvalidGeometryInput(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wall outline plus its window holes, validated once and immutable afterwards.
#[derive(Clone, Debug)]
pub struct ApertureShape {
    outline: WallOutline,
    holes: Vec<WindowHole>,
}

impl ApertureShape {
    pub fn new(outline: WallOutline, holes: &[WindowHole], tol: Tolerance) -> Result<Self> {
        let bounds = outline.bounds();
        let mut rects: Vec<Rect2> = Vec::with_capacity(holes.len());

        for (idx, hole) in holes.iter().enumerate() {
            let number = idx + 1;
            if !hole.is_finite() {
                return Err(Error::InvalidGeometryInput(format!(
                    "hole {number} has non-finite coordinates"
                )));
            }
            if hole.width <= 0.0 || hole.height <= 0.0 {
                return Err(Error::InvalidGeometryInput(format!(
                    "hole {number} must have width and height > 0"
                )));
            }

            let rect = hole.rect();
            if !bounds.encloses(&rect, tol.linear) {
                return Err(Error::InvalidGeometryInput(format!(
                    "hole {number} extends outside the wall outline"
                )));
            }
            if let Some(other) = rects.iter().position(|r| r.overlaps(&rect, tol.linear)) {
                return Err(Error::InvalidGeometryInput(format!(
                    "hole {number} overlaps hole {}",
                    other + 1
                )));
            }
            rects.push(rect);
        }

        Ok(Self {
            outline,
            holes: holes.to_vec(),
        })
    }

    pub fn outline(&self) -> &WallOutline {
        &self.outline
    }

    pub fn holes(&self) -> &[WindowHole] {
        &self.holes
    }

    /// Planar face in the `z = 0` plane: outline wire first, hole wires after.
    pub fn to_face(&self) -> Result<Face> {
        let mut wires = Vec::with_capacity(1 + self.holes.len());
        wires.push(ring_wire(&self.outline.points()));
        for hole in &self.holes {
            wires.push(ring_wire(&hole.points()));
        }
        Ok(builder::try_attach_plane(&wires)?)
    }
}

/// Builds a closed wire from a ring whose last point repeats the first.
fn ring_wire(ring: &[Point2]) -> Wire {
    let open = match ring.split_last() {
        Some((last, rest)) if rest.first() == Some(last) => rest,
        _ => ring,
    };
    let vertices: Vec<Vertex> = open
        .iter()
        .map(|p| builder::vertex(Point3::new(p.x, p.y, 0.0)))
        .collect();
    let mut edges = Vec::with_capacity(vertices.len());
    for idx in 0..vertices.len() {
        let next = (idx + 1) % vertices.len();
        edges.push(builder::line(&vertices[idx], &vertices[next]));
    }
    edges.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> WallOutline {
        WallOutline {
            width: 19.0,
            height: 12.0,
        }
    }

    #[test]
    fn face_has_one_boundary_per_hole() -> Result<()> {
        let holes = [
            WindowHole::new(-6.0, 7.0, 3.0, 2.8),
            WindowHole::new(5.0, 7.0, 3.0, 2.8),
        ];
        let shape = ApertureShape::new(outline(), &holes, Tolerance::default())?;
        let face = shape.to_face()?;
        assert_eq!(face.boundaries().len(), 3);
        Ok(())
    }

    #[test]
    fn ring_wire_drops_closing_point() {
        let wire = ring_wire(&outline().points());
        assert_eq!(wire.len(), 4);
    }

    #[test]
    fn rejects_hole_outside_outline() {
        let holes = [WindowHole::new(0.0, 0.0, 30.0, 2.0)];
        let err = ApertureShape::new(outline(), &holes, Tolerance::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometryInput(_)));
    }

    #[test]
    fn rejects_overlapping_holes() {
        let holes = [
            WindowHole::new(0.0, 6.0, 4.0, 2.0),
            WindowHole::new(1.0, 6.5, 4.0, 2.0),
        ];
        let err = ApertureShape::new(outline(), &holes, Tolerance::default()).unwrap_err();
        assert!(err.to_string().contains("overlaps hole 1"));
    }

    #[test]
    fn rejects_degenerate_hole() {
        let holes = [WindowHole::new(0.0, 6.0, 0.0, 2.0)];
        assert!(ApertureShape::new(outline(), &holes, Tolerance::default()).is_err());
        let holes = [WindowHole::new(f64::NAN, 6.0, 1.0, 2.0)];
        assert!(ApertureShape::new(outline(), &holes, Tolerance::default()).is_err());
    }
}
