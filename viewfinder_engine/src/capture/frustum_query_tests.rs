use glam::Vec3;
use crate::capture::test_scene::TestScene;
use crate::error::Error;
use crate::math::Transform;
use crate::scene::{CollisionEnabled, CollisionResponse, ComponentDesc, ComponentFlags};
use super::*;

// ============================================================================
// Overlap selection
// ============================================================================

#[test]
fn test_inside_outside_behind() {
    let mut scene = TestScene::new();
    let (inside_actor, inside) = scene.crate_at(500.0, 0.0, 0.0);
    scene.crate_at(500.0, 2000.0, 0.0);
    scene.crate_at(-500.0, 0.0, 0.0);
    scene.crate_at(2000.0, 0.0, 0.0);

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    assert_eq!(overlaps.components, vec![inside]);
    assert_eq!(overlaps.actors, vec![inside_actor]);
}

#[test]
fn test_straddling_side_plane_overlaps() {
    let mut scene = TestScene::new();
    // Half extent of the capture pyramid at x = 1550 is about 444
    let (_, straddling) = scene.crate_at(1550.0, 480.0, 0.0);

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    assert_eq!(overlaps.components, vec![straddling]);
}

#[test]
fn test_results_in_creation_order() {
    let mut scene = TestScene::new();
    let (_, far) = scene.crate_at(900.0, 0.0, 0.0);
    let (_, near) = scene.crate_at(300.0, 0.0, 0.0);

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    assert_eq!(overlaps.components, vec![far, near]);
}

#[test]
fn test_query_settings_filter() {
    let mut scene = TestScene::new();
    let (_, no_overlaps) = scene.crate_at(300.0, 0.0, 0.0);
    let (_, no_query) = scene.crate_at(400.0, 0.0, 0.0);
    let (_, ignores) = scene.crate_at(500.0, 0.0, 0.0);
    let (_, invisible) = scene.crate_at(600.0, 0.0, 0.0);

    scene.world.component_mut(no_overlaps).unwrap().set_flag(ComponentFlags::GENERATE_OVERLAPS, false);
    scene.world.component_mut(no_query).unwrap().set_collision(CollisionEnabled::PhysicsOnly);
    let responses = scene.world.component(ignores).unwrap().responses()
        .with(crate::scene::CollisionChannel::WorldDynamic, CollisionResponse::Ignore);
    scene.world.component_mut(ignores).unwrap().set_responses(responses);
    scene.world.component_mut(invisible).unwrap().set_flag(ComponentFlags::VISIBLE, false);

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    // Visibility does not matter to queries
    assert_eq!(overlaps.components, vec![invisible]);
}

// ============================================================================
// Exclusion tag
// ============================================================================

#[test]
fn test_excluded_component_keeps_actor() {
    let mut scene = TestScene::new();
    let holder = scene.world.spawn_empty_actor("Holder", &Transform::IDENTITY, &[]);
    let root = scene.world.actor(holder).unwrap().root().unwrap();
    let tagged = scene.world.add_component(
        holder,
        Some(root),
        ComponentDesc::static_mesh("Tagged", scene.crate_mesh)
            .with_relative_transform(Transform::from_translation(Vec3::new(500.0, 0.0, 0.0)))
            .with_tag(NON_CAPTURE_TAG),
    ).unwrap();

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    assert!(!overlaps.components.contains(&tagged));
    assert_eq!(overlaps.actors, vec![holder]);
}

#[test]
fn test_excluded_actor() {
    let mut scene = TestScene::new();
    let (actor, _) = scene.crate_at(500.0, 0.0, 0.0);
    scene.world.actor_mut(actor).unwrap().add_tag(NON_CAPTURE_TAG);

    let overlaps = scene.taker.query(&mut scene.world).unwrap();
    assert!(overlaps.components.is_empty());
    assert!(overlaps.actors.is_empty());
}

#[test]
fn test_volume_never_reports_itself() {
    let mut scene = TestScene::new();
    let overlaps = query_overlaps(&mut scene.world, scene.taker.volume(), "Other").unwrap();
    assert!(!overlaps.components.contains(&scene.taker.volume()));
}

// ============================================================================
// Collision guard
// ============================================================================

#[test]
fn test_collision_restored_after_query() {
    let mut scene = TestScene::new();
    scene.crate_at(500.0, 0.0, 0.0);
    let volume = scene.taker.volume();
    assert_eq!(scene.world.component(volume).unwrap().collision(), CollisionEnabled::NoCollision);

    scene.taker.query(&mut scene.world).unwrap();
    assert_eq!(scene.world.component(volume).unwrap().collision(), CollisionEnabled::NoCollision);

    scene.world.component_mut(volume).unwrap().set_collision(CollisionEnabled::PhysicsOnly);
    scene.taker.query(&mut scene.world).unwrap();
    assert_eq!(scene.world.component(volume).unwrap().collision(), CollisionEnabled::PhysicsOnly);
}

#[test]
fn test_dead_volume_is_error() {
    let mut scene = TestScene::new();
    let volume = scene.taker.volume();
    scene.world.destroy_component(volume);
    assert!(matches!(query_overlaps(&mut scene.world, volume, NON_CAPTURE_TAG), Err(Error::InvalidHandle(_))));
}
