use glam::Vec3;
use super::*;

#[test]
fn test_cuboid_is_closed_and_outward() {
    let mesh = cuboid(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(mesh.triangle_count(), 12);
    assert!((mesh.signed_volume() - 24.0).abs() < 1e-9);
}

#[test]
fn test_view_pyramid_volume() {
    let mesh = view_pyramid();
    let expected = 200.0 * 200.0 * 100.0 / 3.0;
    assert_eq!(mesh.triangle_count(), 6);
    assert!((mesh.signed_volume() - expected).abs() < 1e-3);
}

#[test]
fn test_view_pyramid_bounds() {
    let bounds = view_pyramid().bounds().unwrap();
    assert_eq!(bounds.min, Vec3::new(0.0, -100.0, -100.0));
    assert_eq!(bounds.max, Vec3::new(100.0, 100.0, 100.0));
}

#[test]
fn test_photo_plane_is_flat() {
    let mesh = photo_plane();
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.signed_volume(), 0.0);
    assert!((mesh.surface_area() - 40000.0).abs() < 1e-6);
}
