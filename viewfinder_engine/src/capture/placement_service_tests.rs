use glam::Vec3;
use crate::capture::test_scene::TestScene;
use crate::math::Transform;
use crate::photo::PhotoKey;
use crate::scene::{CollisionEnabled, ComponentFlags, ComponentKey, Geometry, Material};
use super::*;

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_translation(Vec3::new(x, y, z))
}

/// Capture a single crate at (500, 0, 0) from the origin
fn captured_crate(scene: &mut TestScene) -> (PhotoKey, ComponentKey) {
    let (_, root) = scene.crate_at(500.0, 0.0, 0.0);
    let photo = scene.taker.take_photo(&mut scene.world, &mut scene.backend).unwrap();
    (photo, root)
}

// ============================================================================
// No-op placements
// ============================================================================

#[test]
fn test_place_nothing() {
    let mut scene = TestScene::new();
    let components_before = scene.world.component_count();

    let record = scene.taker.place_photo(&mut scene.world, None, 0.0).unwrap();
    assert!(record.is_empty());
    assert_eq!(scene.world.component_count(), components_before);
}

#[test]
fn test_place_destroyed_photo() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);
    scene.world.destroy_photo(photo);

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();
    assert!(record.is_empty());
}

// ============================================================================
// Destination cut
// ============================================================================

#[test]
fn test_destination_cut() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);

    scene.move_player(at(0.0, 5000.0, 0.0));
    let (_, wall) = scene.crate_at(500.0, 5000.0, 0.0);
    let (bar_actor, bar) = scene.spawn_crate(at(300.0, 5000.0, 0.0).with_scale(Vec3::new(1.0, 20.0, 1.0)));
    scene.world.component_mut(bar).unwrap().set_material(0, Material::Asset("Brick".to_string()));
    let bar_volume = scene.world.copy_from_source_geometry(bar).unwrap().signed_volume() * 20.0;

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();

    // Both destination crates are hidden, only the bar leaves geometry behind
    let hidden: Vec<ComponentKey> = record.undo.hidden_components.iter().map(|(k, _)| *k).collect();
    assert_eq!(hidden, vec![wall, bar]);
    for key in [wall, bar] {
        let component = scene.world.component(key).unwrap();
        assert!(!component.is_visible());
        assert!(!component.generates_overlaps());
        assert_eq!(component.collision(), CollisionEnabled::NoCollision);
    }
    let (_, previous) = record.undo.hidden_components[0];
    assert!(previous.flags.contains(ComponentFlags::VISIBLE));
    assert_eq!(previous.collision, CollisionEnabled::QueryAndPhysics);

    assert_eq!(record.undo.generated_components.len(), 1);
    let generated = record.undo.generated_components[0];
    let component = scene.world.component(generated).unwrap();
    assert_eq!(component.owner(), bar_actor);
    assert_eq!(component.parent(), Some(bar));
    assert!(component.is_visible());
    assert!(component.generates_overlaps());
    assert!(component.flags().contains(ComponentFlags::COMPLEX_AS_SIMPLE));
    assert_eq!(component.collision(), CollisionEnabled::QueryAndPhysics);
    assert_eq!(component.materials(), &[Material::Asset("Brick".to_string())]);

    // The generated piece keeps the bar's frame and loses the pyramid wedge
    let world_frame = scene.world.component_world_transform(generated).unwrap();
    assert!(world_frame.abs_diff_eq(&scene.world.component_world_transform(bar).unwrap(), 1e-3));
    let Geometry::Dynamic(mesh) = component.geometry() else { panic!("expected dynamic geometry") };
    let cut_volume = mesh.signed_volume() * 20.0;
    assert!(cut_volume > 0.0 && cut_volume < bar_volume);
}

#[test]
fn test_unchanged_component_left_alone() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);
    scene.move_player(at(0.0, 5000.0, 0.0));

    // Diagonal slab beside the background pyramid's side face: its bounds
    // reach into the pyramid, the solid stays outside
    let slab = Transform {
        translation: Vec3::new(400.0, 5200.0, 0.0),
        rotation: glam::Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
        scale: Vec3::new(2.0, 0.05, 0.5),
    };
    let (_, slab_root) = scene.spawn_crate(slab);

    let params = scene.taker.default_params().clone();
    scene.taker.set_world_scale(&mut scene.world, params.background_scale());
    assert!(scene.taker.query(&mut scene.world).unwrap().components.contains(&slab_root));

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();
    assert!(!record.undo.hidden_components.iter().any(|(k, _)| *k == slab_root));
    let component = scene.world.component(slab_root).unwrap();
    assert!(component.is_visible());
    assert_eq!(component.collision(), CollisionEnabled::QueryAndPhysics);
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn test_content_respawned_at_destination() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);
    scene.move_player(at(0.0, 5000.0, 0.0));

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();
    assert_eq!(record.undo.spawned_actors.len(), 1);

    let spawned = record.undo.spawned_actors[0];
    let transform = scene.world.actor_transform(spawned).unwrap();
    assert!(transform.abs_diff_eq(&at(500.0, 5000.0, 0.0), 1e-3));

    // Fully captured content is not cut
    let components = scene.world.actor(spawned).unwrap().components().to_vec();
    assert_eq!(components.len(), 1);
    let root = scene.world.component(components[0]).unwrap();
    assert!(root.is_visible());
    assert_eq!(root.geometry().static_mesh(), Some(scene.crate_mesh));
}

#[test]
fn test_partially_captured_content_is_trimmed() {
    let mut scene = TestScene::new();
    // Crosses the capture pyramid's side plane (half extent 43..72 across the crate)
    scene.crate_at(200.0, 80.0, 0.0);
    let photo = scene.taker.take_photo(&mut scene.world, &mut scene.backend).unwrap();
    scene.move_player(at(0.0, 5000.0, 0.0));

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();
    let spawned = record.undo.spawned_actors[0];
    let components = scene.world.actor(spawned).unwrap().components().to_vec();
    assert_eq!(components.len(), 2);

    let original = scene.world.component(components[0]).unwrap();
    assert!(!original.is_visible());
    let trimmed = scene.world.component(components[1]).unwrap();
    assert!(trimmed.is_visible());
    let Geometry::Dynamic(mesh) = trimmed.geometry() else { panic!("expected dynamic geometry") };
    assert!(mesh.signed_volume() > 0.0 && mesh.signed_volume() < 1_000_000.0);

    // Content pieces die with their actors, they are not listed for undo
    assert!(!record.undo.generated_components.contains(&components[1]));
}

#[test]
fn test_rotated_placement() {
    let mut scene = TestScene::new();
    scene.crate_at(500.0, 0.0, 100.0);
    let photo = scene.taker.take_photo(&mut scene.world, &mut scene.backend).unwrap();
    let frame_before = scene.taker.frame(&scene.world).unwrap();

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 90.0).unwrap();
    assert_eq!(record.rotated_angle, 90.0);
    assert!(record.place_transform.abs_diff_eq(&Transform::IDENTITY, 1e-5));

    // Rolled about +X: up becomes -right
    let spawned = record.undo.spawned_actors[0];
    let translation = scene.world.actor_transform(spawned).unwrap().translation;
    assert!(translation.abs_diff_eq(Vec3::new(500.0, -100.0, 0.0), 1e-2));

    let frame_after = scene.taker.frame(&scene.world).unwrap();
    assert!(frame_after.abs_diff_eq(&frame_before, 1e-4));
}

// ============================================================================
// Background photo
// ============================================================================

#[test]
fn test_background_photo() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);
    let info = scene.world.photo(photo).unwrap().info().clone();

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 0.0).unwrap();
    let background = record.undo.background_photo.unwrap();
    let background_info = scene.world.photo(background).unwrap().info();
    assert_eq!(Some(background_info.render_target), info.background_target);

    let mesh_key = scene.world.photo_mesh(background).unwrap();
    let transform = scene.world.component_world_transform(mesh_key).unwrap();
    assert!(transform.translation.abs_diff_eq(Vec3::new(32768.0, 0.0, 0.0), 1e-1));
    assert!(transform.scale.abs_diff_eq(info.params.background_scale(), 1e-3));

    let mesh = scene.world.component(mesh_key).unwrap();
    assert_eq!(mesh.collision(), CollisionEnabled::QueryOnly);
    assert!(mesh.generates_overlaps());
    assert!(!mesh.is_hidden_in_capture());
    assert_eq!(mesh.materials()[0], Material::RenderTarget(info.background_target.unwrap()));
}

#[test]
fn test_record_carries_persistent_fields() {
    let mut scene = TestScene::new();
    let (photo, _) = captured_crate(&mut scene);
    let info = scene.world.photo(photo).unwrap().info().clone();
    scene.move_player(at(0.0, 5000.0, 0.0));

    let record = scene.taker.place_photo(&mut scene.world, Some(photo), 15.0).unwrap();
    assert_eq!(record.photo_info, info);
    assert_eq!(record.rotated_angle, 15.0);
    assert!(record.place_transform.abs_diff_eq(&at(0.0, 5000.0, 0.0), 1e-4));

    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("undo"));
}
