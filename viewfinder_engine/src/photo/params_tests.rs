use glam::{Quat, Vec3};
use crate::math::Transform;
use super::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults() {
    let params = PhotoTakeParams::default();
    assert_eq!(params.fov_angle, 32.0);
    assert_eq!(params.max_distance, 1600.0);
    assert_eq!(params.background_distance, 32768.0);
    assert_eq!((params.capture_width, params.capture_height), (1024, 1024));
    assert!(params.photo_class.is_none());
    assert!(params.take_transform.is_none());
}

#[test]
fn test_aspect_ratio() {
    let mut params = PhotoTakeParams::default();
    assert_eq!(params.aspect_ratio(), 1.0);

    params.capture_width = 1920;
    params.capture_height = 1080;
    assert!((params.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);

    params.capture_height = 0;
    assert_eq!(params.aspect_ratio(), 1.0);
}

// ============================================================================
// Pyramid scale
// ============================================================================

#[test]
fn test_square_capture_scale() {
    let scale = PhotoTakeParams::default().capture_scale();
    let expected_base = 16.0 * 16.0f32.to_radians().tan();

    assert!((scale.x - 16.0).abs() < 1e-5);
    assert!((scale.y - expected_base).abs() < 1e-4);
    assert!((scale.z - expected_base).abs() < 1e-4);
    assert!((scale.y - 4.588).abs() < 1e-2);
    assert_eq!(scale.y, scale.z);
}

#[test]
fn test_scale_ratio_matches_aspect() {
    for aspect in [0.25f32, 0.5, 1.0, 4.0 / 3.0, 2.0, 3.5] {
        let scale = pyramid_scale(45.0, 1000.0, aspect);
        let base = 10.0 * 22.5f32.to_radians().tan();

        assert!((scale.y / scale.z - aspect).abs() < 1e-4, "aspect {}", aspect);
        assert!((scale.y.max(scale.z) - base).abs() < 1e-4, "aspect {}", aspect);
    }
}

#[test]
fn test_background_scale_uses_background_distance() {
    let params = PhotoTakeParams::default();
    let scale = params.background_scale();
    assert!((scale.x - 327.68).abs() < 1e-3);
    assert!((scale.y / params.capture_scale().y - 20.48).abs() < 1e-3);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_take_transform_drops_scale() {
    let frame = Transform::from_translation_rotation(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_z(0.5))
        .with_scale(Vec3::splat(7.0));
    let params = PhotoTakeParams::default().with_take_transform(frame);
    assert_eq!(params.take_transform.unwrap().scale, Vec3::ONE);
}

#[test]
fn test_json_round_trip() {
    let params = PhotoTakeParams {
        capture_width: 640,
        capture_height: 480,
        ..Default::default()
    }
    .with_take_transform(Transform::from_translation(Vec3::new(5.0, 0.0, 1.0)));

    let json = serde_json::to_string(&params).unwrap();
    let back: PhotoTakeParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}
