use glam::{Mat4, Vec3};
use super::*;
use crate::geometry::primitives::{centered_cuboid, cuboid};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_empty_mesh() {
    let mesh = MeshData::empty();
    assert!(mesh.is_empty());
    assert_eq!(mesh.triangle_count(), 0);
    assert!(mesh.bounds().is_none());
    assert_eq!(mesh.signed_volume(), 0.0);
}

#[test]
fn test_new_drops_partial_triangle() {
    let mesh = MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2, 0]);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn test_out_of_range_triangle_is_skipped() {
    let mesh = MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 7]);
    assert!(mesh.is_empty());
}

// ============================================================================
// Measures
// ============================================================================

#[test]
fn test_cube_volume_and_area() {
    let mesh = centered_cuboid(Vec3::splat(1.0));
    assert!((mesh.signed_volume() - 8.0).abs() < 1e-9);
    assert!((mesh.surface_area() - 24.0).abs() < 1e-9);
}

#[test]
fn test_bounds() {
    let mesh = cuboid(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    let bounds = mesh.bounds().unwrap();
    assert_eq!(bounds.min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bounds.max, Vec3::new(4.0, 5.0, 6.0));
}

// ============================================================================
// Transform / append
// ============================================================================

#[test]
fn test_transformed_scales_volume() {
    let mesh = centered_cuboid(Vec3::splat(1.0)).transformed(&Mat4::from_scale(Vec3::splat(2.0)));
    assert!((mesh.signed_volume() - 64.0).abs() < 1e-6);
}

#[test]
fn test_mirrored_transform_keeps_outward_winding() {
    let mesh = centered_cuboid(Vec3::splat(1.0))
        .transformed(&Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn test_append_offsets_indices() {
    let mut a = centered_cuboid(Vec3::splat(1.0));
    let b = cuboid(Vec3::splat(5.0), Vec3::splat(6.0));
    a.append(&b);

    assert_eq!(a.triangle_count(), 24);
    assert_eq!(a.vertex_count(), 16);
    assert!((a.signed_volume() - 9.0).abs() < 1e-6);
    assert_eq!(a.bounds().unwrap().max, Vec3::splat(6.0));
}
