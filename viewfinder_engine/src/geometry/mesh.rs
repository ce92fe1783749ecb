/// MeshData: mutable triangle mesh used by the boolean engine.
///
/// Positions plus a flat triangle index list. Static mesh assets are
/// flattened into this form before any boolean operation; generated
/// components own one behind an `Arc`.

use glam::{Mat4, Vec3};
use super::aabb::AABB;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Build from positions and triangle indices.
    ///
    /// A trailing partial triangle is dropped. Triangles referencing a
    /// missing vertex are skipped by every query.
    pub fn new(positions: Vec<Vec3>, mut indices: Vec<u32>) -> Self {
        indices.truncate(indices.len() - indices.len() % 3);
        Self { positions, indices }
    }

    /// Mesh with no triangles
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Empty = no triangles (stray vertices are ignored)
    pub fn is_empty(&self) -> bool {
        self.triangles().next().is_none()
    }

    /// Iterate triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }

    /// Bounds of the referenced vertices, `None` when empty
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.triangles().flatten())
    }

    /// Copy with every position transformed by `matrix`.
    ///
    /// Winding is flipped when the matrix mirrors, so outward faces stay outward.
    pub fn transformed(&self, matrix: &Mat4) -> MeshData {
        let positions = self.positions.iter().map(|p| matrix.transform_point3(*p)).collect();
        let mut indices = self.indices.clone();
        if matrix.determinant() < 0.0 {
            for tri in indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }
        MeshData { positions, indices }
    }

    /// Append another mesh (no welding)
    pub fn append(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Enclosed volume (positive for outward winding on a closed mesh)
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (a.as_dvec3(), b.as_dvec3(), c.as_dvec3());
                a.dot(b.cross(c)) / 6.0
            })
            .sum()
    }

    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (a.as_dvec3(), b.as_dvec3(), c.as_dvec3());
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
