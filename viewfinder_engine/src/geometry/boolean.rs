/// Mesh boolean engine.
///
/// `boolean` combines two meshes living in different frames. Operand B is
/// brought into A's local frame (`inverse(A) * B`) and the result is
/// expressed in A's local frame, so it can be assigned straight back to
/// the component that owned A.
///
/// The set operations run on `csgrs` BSP meshes in f64. Results come back
/// welded and fan-triangulated.

use csgrs::float_types::Real;
use csgrs::float_types::parry3d::na::{Point3, Vector3};
use csgrs::mesh::Mesh;
use csgrs::mesh::polygon::Polygon;
use csgrs::mesh::vertex::Vertex;
use csgrs::traits::CSG;
use glam::{DMat4, DVec3, Vec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::math::Transform;
use super::mesh::MeshData;

/// Default relative tolerance of `meshes_equal`
pub const DEFAULT_MESH_TOLERANCE: f64 = 1e-5;

/// Weld grid for output vertices
const WELD_QUANTUM: f64 = 1e-4;

/// Twice the area below which an input triangle is dropped
const DEGENERATE_AREA: f64 = 1e-12;

/// Set operation applied by `boolean`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Apply `op` to A (in `transform_a`) and B (in `transform_b`).
///
/// Returns the result in A's local frame. A singular A frame cannot
/// express the result and leaves A unchanged.
pub fn boolean(
    mesh_a: &MeshData,
    transform_a: &Transform,
    mesh_b: &MeshData,
    transform_b: &Transform,
    op: BooleanOp,
) -> MeshData {
    let a_matrix = transform_a.to_mat4().as_dmat4();
    if a_matrix.determinant().abs() <= f64::EPSILON {
        crate::vf_warn!("viewfinder::Boolean", "Singular frame for operand A, {:?} skipped", op);
        return mesh_a.clone();
    }
    let b_in_a = a_matrix.inverse() * transform_b.to_mat4().as_dmat4();

    boolean_relative(mesh_a, mesh_b, &b_in_a, op)
}

/// `boolean` with B already expressed relative to A
pub fn boolean_relative(mesh_a: &MeshData, mesh_b: &MeshData, b_in_a: &DMat4, op: BooleanOp) -> MeshData {
    let a_empty = mesh_a.is_empty();
    let b_empty = mesh_b.is_empty();

    if a_empty || b_empty {
        return match op {
            BooleanOp::Union if a_empty => mesh_b.transformed(&b_in_a.as_mat4()),
            BooleanOp::Union | BooleanOp::Subtract => mesh_a.clone(),
            BooleanOp::Intersect => MeshData::empty(),
        };
    }

    let b_local = mesh_b.transformed(&b_in_a.as_mat4());
    let disjoint = match (mesh_a.bounds(), b_local.bounds()) {
        (Some(a), Some(b)) => !a.intersects(&b),
        _ => true,
    };
    if disjoint {
        return match op {
            BooleanOp::Union => {
                let mut out = mesh_a.clone();
                out.append(&b_local);
                out
            }
            BooleanOp::Subtract => mesh_a.clone(),
            BooleanOp::Intersect => MeshData::empty(),
        };
    }

    let a = solid_from_mesh(mesh_a, &DMat4::IDENTITY);
    let b = solid_from_mesh(mesh_b, b_in_a);
    let result = match op {
        BooleanOp::Union => a.union(&b),
        BooleanOp::Subtract => a.difference(&b),
        BooleanOp::Intersect => a.intersection(&b),
    };

    mesh_from_solid(&result)
}

// ===== CONVERSION =====

/// Triangles of `mesh` moved by `matrix`, degenerate ones dropped
pub(crate) fn solid_from_mesh(mesh: &MeshData, matrix: &DMat4) -> Mesh<()> {
    let mirrored = matrix.determinant() < 0.0;
    let polygons: Vec<Polygon<()>> = mesh
        .triangles()
        .filter_map(|[a, b, c]| {
            let a = matrix.transform_point3(a.as_dvec3());
            let mut b = matrix.transform_point3(b.as_dvec3());
            let mut c = matrix.transform_point3(c.as_dvec3());
            if mirrored {
                std::mem::swap(&mut b, &mut c);
            }
            let normal = (b - a).cross(c - a);
            if normal.length() <= DEGENERATE_AREA {
                return None;
            }
            let normal = normal.normalize();
            let vertices = [a, b, c]
                .into_iter()
                .map(|p| Vertex::new(to_point(p), to_vector(normal)))
                .collect();
            Some(Polygon::new(vertices, None))
        })
        .collect();

    Mesh::from_polygons(&polygons, None)
}

/// Fan-triangulate and weld
pub(crate) fn mesh_from_solid(solid: &Mesh<()>) -> MeshData {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut welded: FxHashMap<(i64, i64, i64), u32> = FxHashMap::default();

    let mut index_of = |v: DVec3, positions: &mut Vec<Vec3>| -> u32 {
        let key = (
            (v.x / WELD_QUANTUM).round() as i64,
            (v.y / WELD_QUANTUM).round() as i64,
            (v.z / WELD_QUANTUM).round() as i64,
        );
        *welded.entry(key).or_insert_with(|| {
            positions.push(v.as_vec3());
            (positions.len() - 1) as u32
        })
    };

    for polygon in &solid.polygons {
        let ids: Vec<u32> = polygon
            .vertices
            .iter()
            .map(|v| index_of(DVec3::new(v.pos.x as f64, v.pos.y as f64, v.pos.z as f64), &mut positions))
            .collect();
        for i in 1..ids.len().saturating_sub(1) {
            let (a, b, c) = (ids[0], ids[i], ids[i + 1]);
            if a != b && b != c && a != c {
                indices.extend([a, b, c]);
            }
        }
    }

    MeshData::new(positions, indices)
}

fn to_point(p: DVec3) -> Point3<Real> {
    Point3::new(p.x as Real, p.y as Real, p.z as Real)
}

fn to_vector(v: DVec3) -> Vector3<Real> {
    Vector3::new(v.x as Real, v.y as Real, v.z as Real)
}

/// Geometric equality within a relative tolerance.
///
/// Both empty is equal. Otherwise bounds, surface area and enclosed
/// volume must agree; re-triangulating the same surface is not a change.
pub fn meshes_equal(a: &MeshData, b: &MeshData, tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    let (bounds_a, bounds_b) = match (a.bounds(), b.bounds()) {
        (None, None) => return true,
        (Some(x), Some(y)) => (x, y),
        _ => return false,
    };

    let extent = bounds_a.size().length().max(bounds_b.size().length()).max(1.0) as f64;
    let bounds_tolerance = (tolerance * extent) as f32;
    if !bounds_a.abs_diff_eq(&bounds_b, bounds_tolerance) {
        return false;
    }

    close(a.surface_area(), b.surface_area(), tolerance)
        && close(a.signed_volume(), b.signed_volume(), tolerance)
}

fn close(x: f64, y: f64, tolerance: f64) -> bool {
    (x - y).abs() <= tolerance * x.abs().max(y.abs()).max(1.0)
}

#[cfg(test)]
#[path = "boolean_tests.rs"]
mod tests;
