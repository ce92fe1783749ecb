/// Placement service: re-inserts a photo's content into the world.
///
/// The destination is cut by the background-distance pyramid, recorded
/// actors are respawned relative to the placing frame and their geometry is
/// trimmed to what the photo captured, and a background photo closes the
/// view. Every side effect is listed in the returned record for undo.

use std::sync::Arc;
use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::geometry::{boolean, meshes_equal, BooleanOp, MeshData, DEFAULT_MESH_TOLERANCE};
use crate::math::Transform;
use crate::photo::{PhotoInfo, PhotoKey, PlacementRecord};
use crate::scene::{
    ActorKey, ActorMeshSlots, CollisionEnabled, ComponentDesc, ComponentFlags, ComponentKey,
    ComponentState, Geometry, MeshSlots, World,
};
use crate::{vf_bail, vf_debug, vf_info, vf_warn};
use super::photo_taker::PhotoTakerPlacer;

const SOURCE: &str = "viewfinder::Placement";

/// Components hidden and generated by one cut pass
#[derive(Debug, Default)]
struct CutOutcome {
    hidden: Vec<(ComponentKey, ComponentState)>,
    generated: Vec<ComponentKey>,
}

/// Place `photo` rotated by `rotated_angle` degrees about the frame's forward axis.
///
/// `None` or a destroyed photo yields an empty record. Steps after the
/// destination cut are best effort: a failing respawn is logged and skipped.
pub fn place_photo(
    world: &mut World,
    taker: &PhotoTakerPlacer,
    photo: Option<PhotoKey>,
    rotated_angle: f32,
) -> Result<PlacementRecord> {
    let Some(info) = photo.and_then(|p| world.photo(p)).map(|p| p.info().clone()) else {
        vf_warn!(SOURCE, "No photo to place");
        return Ok(PlacementRecord::empty());
    };
    let Some(volume_relative) = world.component(taker.volume()).map(|c| *c.relative_transform()) else {
        vf_bail!(MissingConfiguration, SOURCE, "Placement volume {:?} is gone", taker.volume());
    };
    let Some(pyramid) = world.component_mesh(taker.volume()) else {
        vf_bail!(MissingConfiguration, SOURCE, "Placement volume {:?} has no pyramid mesh", taker.volume());
    };
    let Some(place_transform) = taker.frame_no_scale(world) else {
        vf_bail!(MissingConfiguration, SOURCE, "Placement volume {:?} is gone", taker.volume());
    };

    let mut record = PlacementRecord {
        photo_info: info.clone(),
        rotated_angle,
        place_transform,
        ..Default::default()
    };

    taker.apply_rotated_angle_delta(world, rotated_angle);
    let result = place_at_current_frame(world, taker, &info, &pyramid, &mut record);

    if let Some(volume) = world.component_mut(taker.volume()) {
        volume.set_relative_transform(volume_relative);
    }
    result?;

    vf_info!(SOURCE, "Placed photo {:?}: {} spawned, {} hidden, {} generated",
        photo,
        record.undo.spawned_actors.len(),
        record.undo.hidden_components.len(),
        record.undo.generated_components.len());
    Ok(record)
}

fn place_at_current_frame(
    world: &mut World,
    taker: &PhotoTakerPlacer,
    info: &PhotoInfo,
    pyramid: &MeshData,
    record: &mut PlacementRecord,
) -> Result<()> {
    let params = &info.params;

    // Destination cut
    taker.set_world_scale(world, params.background_scale());
    let destination = taker.query(world)?;
    let Some(cut_frame) = taker.frame(world) else {
        vf_bail!(MissingConfiguration, SOURCE, "Placement volume {:?} is gone", taker.volume());
    };
    let outcome = cut_components(world, &destination.components, pyramid, &cut_frame, None);
    record.undo.hidden_components = outcome.hidden;
    record.undo.generated_components = outcome.generated;

    // Respawn the captured actors
    taker.set_world_scale(world, params.capture_scale());
    let Some(frame) = taker.frame(world) else {
        vf_bail!(MissingConfiguration, SOURCE, "Placement volume {:?} is gone", taker.volume());
    };
    let frame_no_scale = frame.no_scale();
    for actor_record in &info.actor_records {
        let transform = frame_no_scale.mul_transform(&actor_record.relative_transform);
        match world.spawn_actor(actor_record.class, &transform) {
            Ok(actor) => {
                if let Some(slots) = ActorMeshSlots::of(world, actor) {
                    slots.apply_slot_meshes(world, &actor_record.slot_meshes);
                }
                record.undo.spawned_actors.push(actor);
            }
            Err(err) => vf_warn!(SOURCE, "Skipping actor record of class {:?}: {}", actor_record.class, err),
        }
    }

    // Trim the respawned content to what the photo captured. Its cut
    // components belong to the spawned actors and go away with them.
    let spawned: FxHashSet<ActorKey> = record.undo.spawned_actors.iter().copied().collect();
    let content: Vec<ComponentKey> = taker
        .query(world)?
        .components
        .into_iter()
        .filter(|key| world.component(*key).is_some_and(|c| spawned.contains(&c.owner())))
        .collect();
    let content_outcome = cut_components(world, &content, pyramid, &frame, Some((&info.mesh_union, &frame_no_scale)));
    vf_debug!(SOURCE, "Content cut: {} hidden, {} generated",
        content_outcome.hidden.len(), content_outcome.generated.len());

    record.undo.background_photo = spawn_background_photo(world, info, &frame_no_scale);
    Ok(())
}

/// Cut each component by the pyramid placed at `pyramid_frame`.
///
/// Without `captured`, the pyramid is subtracted (destination cut). With it,
/// the geometry is intersected with the captured union (in its own frame)
/// and then with the pyramid (content cut). Unchanged components are left
/// alone; changed ones are hidden and, unless nothing is left, replaced by a
/// generated component carrying the result.
fn cut_components(
    world: &mut World,
    components: &[ComponentKey],
    pyramid: &MeshData,
    pyramid_frame: &Transform,
    captured: Option<(&Arc<MeshData>, &Transform)>,
) -> CutOutcome {
    let mut outcome = CutOutcome::default();

    for key in components {
        let Some(component_frame) = world.component_world_transform(*key) else {
            continue;
        };
        let previous = match world.copy_from_source_geometry(*key) {
            Ok(mesh) => mesh,
            Err(err) => {
                vf_warn!(SOURCE, "Skipping cut of component {:?}: {}", key, err);
                continue;
            }
        };

        let mut target = previous.clone();
        let op = match captured {
            Some((union, union_frame)) => {
                target = boolean(&target, &component_frame, union, union_frame, BooleanOp::Intersect);
                BooleanOp::Intersect
            }
            None => BooleanOp::Subtract,
        };
        target = boolean(&target, &component_frame, pyramid, pyramid_frame, op);

        if meshes_equal(&previous, &target, DEFAULT_MESH_TOLERANCE) {
            continue;
        }

        let Some(state) = hide_component(world, *key) else {
            continue;
        };
        outcome.hidden.push((*key, state));

        if target.is_empty() {
            continue;
        }
        match generate_cut_component(world, *key, &component_frame, state, target) {
            Ok(generated) => outcome.generated.push(generated),
            Err(err) => vf_warn!(SOURCE, "No cut geometry for component {:?}: {}", key, err),
        }
    }
    outcome
}

fn hide_component(world: &mut World, key: ComponentKey) -> Option<ComponentState> {
    let component = world.component_mut(key)?;
    let state = component.state();
    component.set_flag(ComponentFlags::VISIBLE, false);
    component.set_flag(ComponentFlags::GENERATE_OVERLAPS, false);
    component.set_collision(CollisionEnabled::NoCollision);
    Some(state)
}

/// New dynamic-mesh component replacing `original`, owned by the same actor
/// and attached to the original's parent (or to the original itself)
fn generate_cut_component(
    world: &mut World,
    original: ComponentKey,
    original_frame: &Transform,
    state: ComponentState,
    mesh: MeshData,
) -> Result<ComponentKey> {
    let Some(component) = world.component(original) else {
        vf_bail!(InvalidHandle, SOURCE, "Component {:?} is gone", original);
    };
    let simulate = state.flags.contains(ComponentFlags::SIMULATE_PHYSICS);
    let mut flags = ComponentFlags::VISIBLE | ComponentFlags::GENERATE_OVERLAPS | ComponentFlags::CAST_SHADOW;
    flags.set(ComponentFlags::SIMULATE_PHYSICS, simulate);
    flags.set(ComponentFlags::COMPLEX_AS_SIMPLE, !simulate);

    let owner = component.owner();
    let parent = component.parent().unwrap_or(original);
    let desc = ComponentDesc {
        name: format!("{}_Cut", component.name()),
        relative_transform: *original_frame,
        geometry: Geometry::Dynamic(Arc::new(mesh)),
        flags,
        collision: state.collision,
        responses: *component.responses(),
        materials: component.materials().to_vec(),
        tags: Vec::new(),
    };

    let generated = world.add_component(owner, None, desc)?;
    if let Err(err) = world.attach_component(generated, parent) {
        world.destroy_component(generated);
        return Err(err);
    }
    Ok(generated)
}

/// Background photo at the background distance, bound to the background
/// render target, visible to captures and to overlap queries
fn spawn_background_photo(world: &mut World, info: &PhotoInfo, frame: &Transform) -> Option<PhotoKey> {
    let params = &info.params;
    let Some(class) = params.photo_class else {
        vf_warn!(SOURCE, "No photo class, background photo skipped");
        return None;
    };
    let Some(background_target) = info.background_target else {
        vf_warn!(SOURCE, "Photo has no background target, background photo skipped");
        return None;
    };

    let transform = Transform {
        translation: frame.translation + frame.forward() * params.background_distance,
        rotation: frame.rotation,
        scale: params.background_scale(),
    };
    let mut background_info = PhotoInfo::new(params.clone(), background_target);
    background_info.background_target = None;

    let photo = match world.spawn_photo(class, &transform, background_info) {
        Ok(photo) => photo,
        Err(err) => {
            vf_warn!(SOURCE, "Background photo failed: {}", err);
            return None;
        }
    };
    if let Some(mesh) = world.photo_mesh(photo).and_then(|m| world.component_mut(m)) {
        mesh.set_collision(CollisionEnabled::QueryOnly);
        mesh.set_flag(ComponentFlags::GENERATE_OVERLAPS, true);
        mesh.set_flag(ComponentFlags::HIDDEN_IN_CAPTURE, false);
    }
    Some(photo)
}

#[cfg(test)]
#[path = "placement_service_tests.rs"]
mod tests;
