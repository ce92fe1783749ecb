/// Capture service: records the content of the pyramid into a photo.
///
/// Two renders separate the foreground from the enclosing scene: the first
/// with every overlapping component hidden from capture (background image),
/// the second with them restored (photo image). The photo keeps the union of
/// the captured geometry and one record per captured actor so a placement
/// can rebuild the content.

use std::sync::Arc;
use crate::error::Result;
use crate::geometry::{boolean, BooleanOp, MeshData};
use crate::math::Transform;
use crate::photo::{ActorRecord, PhotoInfo, PhotoKey, PhotoTakeParams};
use crate::scene::{ActorKey, ActorMeshSlots, ComponentFlags, ComponentKey, MeshSlots, World};
use crate::target::RenderTargetKey;
use crate::{vf_bail, vf_debug, vf_info, vf_warn};
use super::backend::{CaptureBackend, CaptureView};
use super::photo_taker::PhotoTakerPlacer;

const SOURCE: &str = "viewfinder::Capture";

/// Capture the pyramid content with `params` and spawn the photo entity.
///
/// On failure the world is left as it was (render targets already produced
/// are released).
pub fn capture_frustum_photo(
    world: &mut World,
    backend: &mut dyn CaptureBackend,
    taker: &PhotoTakerPlacer,
    params: &PhotoTakeParams,
) -> Result<PhotoKey> {
    let Some(photo_class) = params.photo_class else {
        vf_bail!(MissingConfiguration, SOURCE, "No photo class configured");
    };
    if world.class(photo_class).is_none() {
        vf_bail!(MissingConfiguration, SOURCE, "Photo class {:?} is not registered", photo_class);
    }
    let Some(volume_relative) = world.component(taker.volume()).map(|c| *c.relative_transform()) else {
        vf_bail!(MissingConfiguration, SOURCE, "Capture volume {:?} is gone", taker.volume());
    };

    if let Some(take_transform) = &params.take_transform {
        taker.set_world_location_rotation(world, take_transform);
    }
    taker.set_pyramid_scale_for(world, params);

    let result = capture_at_current_frame(world, backend, taker, params, photo_class);

    if params.take_transform.is_some() {
        // Back to the attached frame; the capture scale stays
        if let Some(volume) = world.component_mut(taker.volume()) {
            let scale = volume.relative_transform().scale;
            volume.set_relative_transform(volume_relative.with_scale(scale));
        }
    }

    let photo = result?;
    vf_info!(SOURCE, "Captured photo {:?}", photo);
    Ok(photo)
}

fn capture_at_current_frame(
    world: &mut World,
    backend: &mut dyn CaptureBackend,
    taker: &PhotoTakerPlacer,
    params: &PhotoTakeParams,
    photo_class: crate::scene::ActorClassKey,
) -> Result<PhotoKey> {
    let Some(frame) = taker.frame_no_scale(world) else {
        vf_bail!(MissingConfiguration, SOURCE, "Capture volume {:?} is gone", taker.volume());
    };
    let overlaps = taker.query(world)?;
    let view = CaptureView {
        transform: frame,
        fov_angle: params.fov_angle,
        width: params.capture_width,
        height: params.capture_height,
    };

    let background = render_without(world, backend, &view, &overlaps.components)?;
    let primary = match backend.render(world, &view) {
        Ok(target) => target,
        Err(err) => {
            backend.release(background);
            return Err(err);
        }
    };

    let mut info = PhotoInfo::new(params.clone(), primary);
    info.params.take_transform = Some(frame);
    info.background_target = Some(background);
    info.mesh_union = Arc::new(captured_mesh_union(world, &frame, &overlaps.components));
    info.actor_records = overlaps
        .actors
        .iter()
        .filter_map(|actor| actor_record(world, *actor, &frame))
        .collect();

    let record_count = info.actor_records.len();
    match world.spawn_photo(photo_class, &frame, info) {
        Ok(photo) => {
            vf_debug!(SOURCE, "Photo {:?}: {} components, {} actor records",
                photo, overlaps.components.len(), record_count);
            Ok(photo)
        }
        Err(err) => {
            release_targets(backend, &[background, primary]);
            Err(err)
        }
    }
}

/// Render with `hidden` hidden from capture, restoring each component's
/// previous capture visibility afterwards
fn render_without(
    world: &mut World,
    backend: &mut dyn CaptureBackend,
    view: &CaptureView,
    hidden: &[ComponentKey],
) -> Result<RenderTargetKey> {
    let mut previous: Vec<(ComponentKey, bool)> = Vec::with_capacity(hidden.len());
    for key in hidden {
        if let Some(component) = world.component_mut(*key) {
            previous.push((*key, component.is_hidden_in_capture()));
            component.set_flag(ComponentFlags::HIDDEN_IN_CAPTURE, true);
        }
    }

    let result = backend.render(world, view);

    for (key, was_hidden) in previous {
        if let Some(component) = world.component_mut(key) {
            component.set_flag(ComponentFlags::HIDDEN_IN_CAPTURE, was_hidden);
        }
    }
    result
}

/// Union of the components' geometry expressed in `frame`
fn captured_mesh_union(world: &World, frame: &Transform, components: &[ComponentKey]) -> MeshData {
    let mut union = MeshData::empty();
    for key in components {
        let Some(component_frame) = world.component_world_transform(*key) else {
            continue;
        };
        match world.copy_from_source_geometry(*key) {
            Ok(mesh) => union = boolean(&union, frame, &mesh, &component_frame, BooleanOp::Union),
            Err(err) => vf_warn!(SOURCE, "Skipping component {:?} in mesh union: {}", key, err),
        }
    }
    union
}

fn actor_record(world: &World, actor: ActorKey, frame: &Transform) -> Option<ActorRecord> {
    let class = world.actor(actor)?.class();
    let Some(class) = class else {
        vf_debug!(SOURCE, "Actor {:?} has no class, not recorded", actor);
        return None;
    };
    let actor_transform = world.actor_transform(actor)?;
    Some(ActorRecord {
        class,
        relative_transform: actor_transform.relative_to(frame),
        slot_meshes: ActorMeshSlots::of(world, actor)?.slot_meshes(world),
    })
}

fn release_targets(backend: &mut dyn CaptureBackend, targets: &[RenderTargetKey]) {
    for target in targets {
        backend.release(*target);
    }
}

#[cfg(test)]
#[path = "capture_service_tests.rs"]
mod tests;
