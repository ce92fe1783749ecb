/// Built-in mesh assets.
///
/// All meshes use outward counter-clockwise winding in a right-handed frame
/// (forward +X, right +Y, up +Z).

use glam::Vec3;
use super::mesh::MeshData;

/// Depth of the unit view pyramid along +X
pub const PYRAMID_DEPTH: f32 = 100.0;
/// Half extent of the unit view pyramid base (and of the photo plane)
pub const PYRAMID_HALF_EXTENT: f32 = 100.0;

/// Axis-aligned box between `min` and `max`
pub fn cuboid(min: Vec3, max: Vec3) -> MeshData {
    let positions = vec![
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ];
    let quads: [[u32; 4]; 6] = [
        [0, 4, 6, 2], // -X
        [1, 3, 7, 5], // +X
        [0, 1, 5, 4], // -Y
        [2, 6, 7, 3], // +Y
        [0, 2, 3, 1], // -Z
        [4, 5, 7, 6], // +Z
    ];
    let indices = quads
        .iter()
        .flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
        .collect();
    MeshData::new(positions, indices)
}

/// Box centered on the origin
pub fn centered_cuboid(half_extents: Vec3) -> MeshData {
    cuboid(-half_extents, half_extents)
}

/// Unit view pyramid: apex at the origin, square base at x = 100
/// spanning y, z in [-100, 100].
///
/// Scaling it by `(d / 100, s_y, s_z)` yields a capture volume reaching
/// distance `d`.
pub fn view_pyramid() -> MeshData {
    let d = PYRAMID_DEPTH;
    let h = PYRAMID_HALF_EXTENT;
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(d, -h, -h),
        Vec3::new(d, h, -h),
        Vec3::new(d, h, h),
        Vec3::new(d, -h, h),
    ];
    let indices = vec![
        1, 2, 3, 1, 3, 4, // base
        0, 2, 1, 0, 3, 2, 0, 4, 3, 0, 1, 4, // sides
    ];
    MeshData::new(positions, indices)
}

/// Photo display quad at x = 0 spanning y, z in [-100, 100], facing -X
pub fn photo_plane() -> MeshData {
    let h = PYRAMID_HALF_EXTENT;
    let positions = vec![
        Vec3::new(0.0, -h, -h),
        Vec3::new(0.0, h, -h),
        Vec3::new(0.0, h, h),
        Vec3::new(0.0, -h, h),
    ];
    MeshData::new(positions, vec![0, 2, 1, 0, 3, 2])
}

#[cfg(test)]
#[path = "primitives_tests.rs"]
mod tests;
