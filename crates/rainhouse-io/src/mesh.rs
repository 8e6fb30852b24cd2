use rainhouse_geometry::profiles::Rect2;
use rainhouse_geometry::{Point2, Point3, Vector2, Vector3};
use rainhouse_topology::{Face, Shell};
use std::collections::HashMap;
use truck_meshalgo::prelude::*;
use truck_polymesh::{Faces, PolygonMesh, StandardAttributes, StandardVertex};

/// Twice the area below which a triangle is dropped as a sliver. Absolute, so
/// callers triangulate walls at unit scale.
const MIN_TRIANGLE_AREA: f64 = 1.0e-12;

/// Triangulated planar wall: positions in the `z = 0` plane, one UV per
/// position, triangles wound so their normal points toward `+z`.
#[derive(Clone, Debug, Default)]
pub struct WallMesh {
    positions: Vec<Point3>,
    uvs: Vec<Vector2>,
    triangles: Vec<[usize; 3]>,
}

impl WallMesh {
    /// Flattens every face of `mesh` into triangles. UVs start as the raw
    /// `(x, y)` of each position.
    pub fn from_polygon(mesh: &PolygonMesh) -> Self {
        let positions: Vec<Point3> = mesh.positions().to_vec();
        let uvs = positions.iter().map(|p| Vector2::new(p.x, p.y)).collect();

        let mut triangles = Vec::new();
        triangles.extend(mesh.tri_faces().iter().map(|tri| [tri[0].pos, tri[1].pos, tri[2].pos]));
        for quad in mesh.quad_faces() {
            triangles.push([quad[0].pos, quad[1].pos, quad[2].pos]);
            triangles.push([quad[0].pos, quad[2].pos, quad[3].pos]);
        }
        for face in mesh.faces().other_faces() {
            if face.len() < 3 {
                continue;
            }
            for idx in 1..(face.len() - 1) {
                triangles.push([face[0].pos, face[idx].pos, face[idx + 1].pos]);
            }
        }

        let mut wall = Self {
            positions,
            uvs,
            triangles,
        };
        wall.orient_front_facing();
        wall
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vector2] {
        &self.uvs
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Multiplies every position by `factor`. UVs are left as they are.
    pub fn scale(&mut self, factor: f64) {
        for position in &mut self.positions {
            *position = Point3::new(position.x * factor, position.y * factor, position.z * factor);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangles.is_empty()
    }

    /// 2-D bounding box of the vertex set.
    pub fn bounds(&self) -> Option<Rect2> {
        let points: Vec<Point2> = self.positions.iter().map(|p| Point2::new(p.x, p.y)).collect();
        Rect2::from_points(&points)
    }

    pub fn triangle_points(&self, tri: &[usize; 3]) -> [Point2; 3] {
        tri.map(|idx| {
            let p = self.positions[idx];
            Point2::new(p.x, p.y)
        })
    }

    pub fn centroid(&self, tri: &[usize; 3]) -> Point2 {
        let [a, b, c] = self.triangle_points(tri);
        Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| signed_area2(&self.triangle_points(tri)).abs() * 0.5)
            .sum()
    }

    /// Rewrites every UV as the vertex's normalized position inside the
    /// mesh bounds. Returns `None` when the bounds have zero width or height.
    pub fn remap_uvs_to_bounds(&mut self) -> Option<Rect2> {
        let bounds = self.bounds()?;
        let span_x = bounds.width();
        let span_y = bounds.height();
        if span_x <= 0.0 || span_y <= 0.0 {
            return None;
        }
        for (uv, p) in self.uvs.iter_mut().zip(&self.positions) {
            uv.x = (p.x - bounds.min.x) / span_x;
            uv.y = (p.y - bounds.min.y) / span_y;
        }
        Some(bounds)
    }

    /// Number of closed boundary loops: the outline plus one per hole.
    pub fn boundary_loops(&self) -> usize {
        let mut edge_uses: HashMap<(usize, usize), usize> = HashMap::new();
        for tri in &self.triangles {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                *edge_uses.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }

        let mut parent: Vec<usize> = (0..self.positions.len()).collect();
        let mut on_boundary = vec![false; self.positions.len()];
        for (&(a, b), &uses) in &edge_uses {
            if uses != 1 {
                continue;
            }
            on_boundary[a] = true;
            on_boundary[b] = true;
            let root_a = find_root(&mut parent, a);
            let root_b = find_root(&mut parent, b);
            if root_a != root_b {
                parent[root_a] = root_b;
            }
        }

        (0..self.positions.len())
            .filter(|&idx| on_boundary[idx] && find_root(&mut parent, idx) == idx)
            .count()
    }

    pub fn to_polygon_mesh(&self) -> PolygonMesh {
        let attributes = StandardAttributes {
            positions: self.positions.clone(),
            uv_coords: self.uvs.clone(),
            normals: vec![Vector3::unit_z()],
        };
        let tri_faces: Vec<[StandardVertex; 3]> = self
            .triangles
            .iter()
            .map(|tri| {
                tri.map(|idx| StandardVertex {
                    pos: idx,
                    uv: Some(idx),
                    nor: Some(0),
                })
            })
            .collect();
        PolygonMesh::new(attributes, Faces::from_tri_and_quad_faces(tri_faces, Vec::new()))
    }

    fn orient_front_facing(&mut self) {
        let positions = &self.positions;
        self.triangles.retain(|tri| {
            let points = tri.map(|idx| Point2::new(positions[idx].x, positions[idx].y));
            signed_area2(&points).abs() > MIN_TRIANGLE_AREA
        });
        for tri in &mut self.triangles {
            let points = tri.map(|idx| Point2::new(positions[idx].x, positions[idx].y));
            if signed_area2(&points) < 0.0 {
                tri.swap(1, 2);
            }
        }
    }
}

/// Triangulates a planar face lying in the `z = 0` plane.
pub fn triangulate_face(face: &Face, tol: f64) -> WallMesh {
    let shell: Shell = vec![face.clone()].into();
    let mut mesh = shell.triangulation(tol).to_polygon();
    mesh.put_together_same_attrs(truck_base::tolerance::TOLERANCE);
    mesh.remove_unused_attrs();
    WallMesh::from_polygon(&mesh)
}

fn signed_area2(points: &[Point2; 3]) -> f64 {
    let [a, b, c] = points;
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

fn find_root(parent: &mut [usize], idx: usize) -> usize {
    let mut root = idx;
    while parent[root] != root {
        root = parent[root];
    }
    let mut cursor = idx;
    while parent[cursor] != root {
        let next = parent[cursor];
        parent[cursor] = root;
        cursor = next;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mesh(flip: bool) -> WallMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let uvs = positions.iter().map(|p| Vector2::new(p.x, p.y)).collect();
        let triangles = if flip {
            vec![[0, 2, 1], [0, 3, 2]]
        } else {
            vec![[0, 1, 2], [0, 2, 3]]
        };
        let mut mesh = WallMesh {
            positions,
            uvs,
            triangles,
        };
        mesh.orient_front_facing();
        mesh
    }

    #[test]
    fn triangles_face_positive_z() {
        let mesh = square_mesh(true);
        for tri in mesh.triangles() {
            assert!(signed_area2(&mesh.triangle_points(tri)) > 0.0);
        }
    }

    #[test]
    fn remap_spans_unit_square() {
        let mut mesh = square_mesh(false);
        let bounds = mesh.remap_uvs_to_bounds().expect("non-degenerate bounds");
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(mesh.uvs()[0], Vector2::new(0.0, 0.0));
        assert_eq!(mesh.uvs()[2], Vector2::new(1.0, 1.0));
        assert_eq!(mesh.uvs()[1], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn scale_keeps_triangles_and_uvs() {
        let mut mesh = square_mesh(false);
        mesh.remap_uvs_to_bounds();
        mesh.scale(1.0e-6);
        let bounds = mesh.bounds().expect("non-empty mesh");
        assert_eq!(bounds.max, Point2::new(2.0e-6, 1.0e-6));
        assert_eq!(mesh.triangles().len(), 2);
        assert_eq!(mesh.uvs()[2], Vector2::new(1.0, 1.0));
    }

    #[test]
    fn remap_rejects_flat_bounds() {
        let mut mesh = WallMesh {
            positions: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            uvs: vec![Vector2::new(0.0, 0.0); 2],
            triangles: Vec::new(),
        };
        assert!(mesh.remap_uvs_to_bounds().is_none());
    }

    #[test]
    fn square_has_single_boundary_loop() {
        let mesh = square_mesh(false);
        assert_eq!(mesh.boundary_loops(), 1);
        assert!((mesh.area() - 2.0).abs() < 1.0e-12);
    }

    #[test]
    fn sliver_triangles_are_dropped() {
        let mut mesh = square_mesh(false);
        mesh.triangles.push([0, 1, 1]);
        mesh.orient_front_facing();
        assert_eq!(mesh.triangles().len(), 2);
    }
}
