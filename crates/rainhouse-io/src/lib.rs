pub mod mesh;
pub mod obj;

pub use mesh::{WallMesh, triangulate_face};
pub use obj::export_obj;
