/// PhotoTakerPlacer: the pyramid volume that takes and places photos.
///
/// The volume is an invisible component attached to the player. Its world
/// transform is the capture frame; its scale encodes field of view and
/// distance of the current operation.

use glam::Vec3;
use crate::error::Result;
use crate::math::Transform;
use crate::photo::{PhotoKey, PhotoTakeParams, PlacementRecord};
use crate::scene::{
    ActorKey, CollisionEnabled, CollisionResponse, CollisionResponses, ComponentDesc,
    ComponentFlags, ComponentKey, Geometry, MeshAssetKey, World,
};
use crate::{vf_bail, vf_debug};
use super::backend::CaptureBackend;
use super::capture_service::capture_frustum_photo;
use super::frustum_query::{query_overlaps, Overlaps, NON_CAPTURE_TAG};
use super::placement_service::place_photo;

const SOURCE: &str = "viewfinder::PhotoTakerPlacer";

/// Component name of the volume
pub const TAKER_VOLUME: &str = "PhotoTakerPlacer";

#[derive(Debug, Clone)]
pub struct PhotoTakerPlacer {
    volume: ComponentKey,
    default_params: PhotoTakeParams,
}

impl PhotoTakerPlacer {
    /// Add the volume to `owner`, under `parent` (or the owner's root).
    ///
    /// `pyramid` must be the unit view pyramid asset.
    pub fn new(
        world: &mut World,
        owner: ActorKey,
        parent: Option<ComponentKey>,
        relative_transform: Transform,
        pyramid: MeshAssetKey,
        default_params: PhotoTakeParams,
    ) -> Result<Self> {
        if world.mesh_asset(pyramid).is_none() {
            vf_bail!(MissingConfiguration, SOURCE, "Pyramid mesh asset {:?} is missing", pyramid);
        }
        let parent = parent.or_else(|| world.actor(owner).and_then(|a| a.root()));
        let desc = ComponentDesc {
            name: TAKER_VOLUME.to_string(),
            relative_transform,
            geometry: Geometry::Static(pyramid),
            flags: ComponentFlags::GENERATE_OVERLAPS,
            collision: CollisionEnabled::NoCollision,
            responses: CollisionResponses::all(CollisionResponse::Overlap),
            materials: Vec::new(),
            tags: vec![NON_CAPTURE_TAG.to_string()],
        };
        let volume = world.add_component(owner, parent, desc)?;

        let taker = Self { volume, default_params };
        taker.set_pyramid_scale_for(world, &taker.default_params);
        vf_debug!(SOURCE, "Volume {:?} added to actor {:?}", volume, owner);
        Ok(taker)
    }

    pub fn volume(&self) -> ComponentKey {
        self.volume
    }

    pub fn default_params(&self) -> &PhotoTakeParams {
        &self.default_params
    }

    pub fn default_params_mut(&mut self) -> &mut PhotoTakeParams {
        &mut self.default_params
    }

    /// Aspect ratio of the default capture size
    pub fn capture_aspect_ratio(&self) -> f32 {
        self.default_params.aspect_ratio()
    }

    /// World transform of the volume, including the pyramid scale
    pub fn frame(&self, world: &World) -> Option<Transform> {
        world.component_world_transform(self.volume)
    }

    /// World transform of the volume without scale
    pub fn frame_no_scale(&self, world: &World) -> Option<Transform> {
        self.frame(world).map(|t| t.no_scale())
    }

    /// Scale the volume to the capture distance of `params`
    pub fn set_pyramid_scale_for(&self, world: &mut World, params: &PhotoTakeParams) {
        self.set_world_scale(world, params.capture_scale());
    }

    pub(crate) fn set_world_scale(&self, world: &mut World, scale: Vec3) {
        if let Some(frame) = self.frame(world) {
            world.set_component_world_transform(self.volume, &frame.with_scale(scale));
        }
    }

    /// Move the volume to a world location and rotation, keeping its scale
    pub(crate) fn set_world_location_rotation(&self, world: &mut World, transform: &Transform) {
        if let Some(frame) = self.frame(world) {
            let moved = Transform { translation: transform.translation, rotation: transform.rotation, scale: frame.scale };
            world.set_component_world_transform(self.volume, &moved);
        }
    }

    /// Rotate the volume by `delta_degrees` about its own forward axis
    pub fn apply_rotated_angle_delta(&self, world: &mut World, delta_degrees: f32) {
        if let Some(frame) = self.frame(world) {
            world.set_component_world_transform(self.volume, &frame.rotated_about_forward(delta_degrees));
        }
    }

    /// Overlaps of the volume at its current scale, excluding `NonCapture`
    pub fn query(&self, world: &mut World) -> Result<Overlaps> {
        query_overlaps(world, self.volume, NON_CAPTURE_TAG)
    }

    /// Capture with the default parameters
    pub fn take_photo(&self, world: &mut World, backend: &mut dyn CaptureBackend) -> Result<PhotoKey> {
        capture_frustum_photo(world, backend, self, &self.default_params)
    }

    pub fn take_photo_with_params(
        &self,
        world: &mut World,
        backend: &mut dyn CaptureBackend,
        params: &PhotoTakeParams,
    ) -> Result<PhotoKey> {
        capture_frustum_photo(world, backend, self, params)
    }

    /// Place `photo` rotated by `rotated_angle` degrees; `None` places nothing
    pub fn place_photo(&self, world: &mut World, photo: Option<PhotoKey>, rotated_angle: f32) -> Result<PlacementRecord> {
        place_photo(world, self, photo, rotated_angle)
    }
}
