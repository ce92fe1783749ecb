use std::sync::Arc;
use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::geometry::primitives::centered_cuboid;
use crate::scene::{ActorClass, ActorClassKey, MeshAssetKey};
use crate::target::TargetManager;
use super::*;

fn keys() -> (ActorClassKey, MeshAssetKey) {
    let mut classes: SlotMap<ActorClassKey, ActorClass> = SlotMap::with_key();
    let mut meshes: SlotMap<MeshAssetKey, ()> = SlotMap::with_key();
    let mesh = meshes.insert(());
    let class = classes.insert(ActorClass::single_mesh("Crate", mesh));
    (class, mesh)
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_equality_is_render_target_identity() {
    let mut targets = TargetManager::new();
    let rt_a = targets.create_render_target("a", 64, 64).unwrap();
    let rt_b = targets.create_render_target("b", 64, 64).unwrap();

    let a = PhotoInfo::new(PhotoTakeParams::default(), rt_a);
    let mut a_changed = a.clone();
    a_changed.params.fov_angle = 90.0;
    a_changed.mesh_union = Arc::new(centered_cuboid(Vec3::ONE));
    let b = PhotoInfo::new(PhotoTakeParams::default(), rt_b);

    assert_eq!(a, a_changed);
    assert_ne!(a, b);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_json_skips_session_fields() {
    let (class, mesh) = keys();
    let mut targets = TargetManager::new();
    let rt = targets.create_render_target("photo", 32, 32).unwrap();

    let mut info = PhotoInfo::new(PhotoTakeParams::default().with_photo_class(class), rt);
    info.background_target = Some(rt);
    info.mesh_union = Arc::new(centered_cuboid(Vec3::ONE));
    let mut slot_meshes = FxHashMap::default();
    slot_meshes.insert("StaticMeshComponent".to_string(), mesh);
    info.actor_records.push(ActorRecord {
        class,
        relative_transform: Transform::from_translation(Vec3::new(300.0, 0.0, 0.0)),
        slot_meshes,
    });

    let json = info.to_json().unwrap();
    assert!(!json.contains("render_target"));
    assert!(!json.contains("mesh_union"));

    let back = PhotoInfo::from_json(&json).unwrap();
    assert_eq!(back.params, info.params);
    assert_eq!(back.actor_records, info.actor_records);
    assert!(back.background_target.is_none());
    assert!(back.mesh_union.is_empty());
}

#[test]
fn test_invalid_json_is_error() {
    assert!(matches!(PhotoInfo::from_json("{ nope"), Err(crate::error::Error::Json(_))));
}
