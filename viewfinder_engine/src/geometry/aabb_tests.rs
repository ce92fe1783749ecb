use glam::{Mat4, Quat, Vec3};
use super::*;

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_points() {
    let aabb = AABB::from_points([
        Vec3::new(1.0, -2.0, 0.0),
        Vec3::new(-3.0, 4.0, 2.0),
        Vec3::new(0.0, 0.0, -5.0),
    ]).unwrap();

    assert_eq!(aabb.min, Vec3::new(-3.0, -2.0, -5.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 2.0));
}

#[test]
fn test_from_no_points() {
    assert!(AABB::from_points(std::iter::empty()).is_none());
}

#[test]
fn test_corners_cover_extents() {
    let aabb = AABB::new(Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0));
    let rebuilt = AABB::from_points(aabb.corners()).unwrap();
    assert_eq!(rebuilt, aabb);
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_translation() {
    let moved = unit_box().transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert!(moved.min.abs_diff_eq(Vec3::new(9.0, -1.0, -1.0), 1e-5));
    assert!(moved.max.abs_diff_eq(Vec3::new(11.0, 1.0, 1.0), 1e-5));
}

#[test]
fn test_transformed_rotation_grows_box() {
    let rotated = unit_box().transformed(&Mat4::from_quat(Quat::from_rotation_z(
        std::f32::consts::FRAC_PI_4,
    )));
    let expected = std::f32::consts::SQRT_2;
    assert!((rotated.max.x - expected).abs() < 1e-5);
    assert!((rotated.max.z - 1.0).abs() < 1e-5);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_intersects_and_touches() {
    let a = unit_box();
    let touching = AABB::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
    let apart = AABB::new(Vec3::new(1.5, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));

    assert!(a.intersects(&touching));
    assert!(!a.intersects(&apart));
}

#[test]
fn test_contains() {
    let outer = AABB::new(Vec3::splat(-2.0), Vec3::splat(2.0));
    assert!(outer.contains(&unit_box()));
    assert!(!unit_box().contains(&outer));
}

#[test]
fn test_union() {
    let a = unit_box();
    let b = AABB::new(Vec3::new(3.0, 3.0, 3.0), Vec3::new(4.0, 4.0, 4.0));
    let u = a.union(&b);
    assert_eq!(u.min, Vec3::splat(-1.0));
    assert_eq!(u.max, Vec3::splat(4.0));
}
