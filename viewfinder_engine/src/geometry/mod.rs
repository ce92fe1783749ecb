//! Geometry: bounds, triangle meshes, the view pyramid and mesh booleans.

mod aabb;
mod boolean;
mod frustum;
mod mesh;
pub mod primitives;

pub use aabb::AABB;
pub use boolean::{boolean, boolean_relative, meshes_equal, BooleanOp, DEFAULT_MESH_TOLERANCE};
pub use frustum::{Frustum, FrustumTest, CORNER_APEX, PLANE_BASE};
pub use mesh::MeshData;
