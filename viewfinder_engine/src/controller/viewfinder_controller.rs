/// ViewfinderController: drives capture, placement and rewind for one player.
///
/// The controller owns the photo collection and the rewind history. Input
/// operations (`aim`, `take_or_place_photo`, ...) are ignored while a rewind
/// is playing back. Failures of the capture and placement services are
/// logged and turned into no-ops.

use glam::{Quat, Vec3};
use crate::capture::{CaptureBackend, PhotoTakerPlacer};
use crate::config::ViewfinderConfig;
use crate::error::Result;
use crate::math::Transform;
use crate::photo::{PhotoInfo, PhotoKey, PlacementRecord};
use crate::rewind::{RewindAction, RewindLedger, TickScheduler, TickTask};
use crate::scene::{ActorKey, ComponentFlags, World};
use crate::target::RenderTargetKey;
use crate::{vf_debug, vf_info, vf_trace, vf_warn};
use super::input_gate::{InputGate, NoOpInputGate};

const SOURCE: &str = "viewfinder::Controller";

pub struct ViewfinderController {
    owner: ActorKey,
    taker: PhotoTakerPlacer,
    config: ViewfinderConfig,

    photos: Vec<PhotoKey>,
    current_photo_index: Option<usize>,
    /// Rotation of the held photo about the frame's forward axis, in degrees
    current_rotated_angle: f32,
    using_camera: bool,
    aiming: bool,

    control_rotation: Quat,
    input_enabled: bool,
    input_gate: Box<dyn InputGate>,

    ledger: RewindLedger,
    scheduler: TickScheduler,
    /// Set once the current playback has undone an action
    rewind_undid_action: bool,
    /// Render targets of photos removed by rewind, to be released by the host
    released_targets: Vec<RenderTargetKey>,
}

impl ViewfinderController {
    pub fn new(owner: ActorKey, taker: PhotoTakerPlacer, config: ViewfinderConfig) -> Result<Self> {
        config.validate()?;
        let ledger = RewindLedger::new(config.max_rewind_time, config.rewind_record_interval);
        let scheduler = TickScheduler::new(config.rewind_record_interval, config.rewind_time_rate);
        vf_debug!(SOURCE, "Controller for actor {:?}, history of {} snapshots", owner, ledger.capacity());

        Ok(Self {
            owner,
            taker,
            config,
            photos: Vec::new(),
            current_photo_index: None,
            current_rotated_angle: 0.0,
            using_camera: true,
            aiming: false,
            control_rotation: Quat::IDENTITY,
            input_enabled: true,
            input_gate: Box::new(NoOpInputGate),
            ledger,
            scheduler,
            rewind_undid_action: false,
            released_targets: Vec::new(),
        })
    }

    pub fn with_input_gate(mut self, gate: Box<dyn InputGate>) -> Self {
        self.input_gate = gate;
        self
    }

    // ===== ACCESSORS =====

    pub fn owner(&self) -> ActorKey {
        self.owner
    }

    pub fn taker(&self) -> &PhotoTakerPlacer {
        &self.taker
    }

    pub fn taker_mut(&mut self) -> &mut PhotoTakerPlacer {
        &mut self.taker
    }

    pub fn config(&self) -> &ViewfinderConfig {
        &self.config
    }

    pub fn photos(&self) -> &[PhotoKey] {
        &self.photos
    }

    pub fn current_photo_index(&self) -> Option<usize> {
        self.current_photo_index
    }

    pub fn current_photo(&self) -> Option<PhotoKey> {
        self.current_photo_index.and_then(|i| self.photos.get(i).copied())
    }

    pub fn current_rotated_angle(&self) -> f32 {
        self.current_rotated_angle
    }

    pub fn is_using_camera(&self) -> bool {
        self.using_camera
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_rewinding(&self) -> bool {
        self.scheduler.active() == TickTask::RewindStep
    }

    pub fn control_rotation(&self) -> Quat {
        self.control_rotation
    }

    pub fn set_control_rotation(&mut self, rotation: Quat) {
        self.control_rotation = rotation;
    }

    pub fn ledger(&self) -> &RewindLedger {
        &self.ledger
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Drain the render targets of photos removed by rewind
    pub fn take_released_targets(&mut self) -> Vec<RenderTargetKey> {
        std::mem::take(&mut self.released_targets)
    }

    // ===== INPUT =====

    /// Switch between the camera and the photo collection (not while aiming)
    pub fn toggle_camera_or_photo(&mut self) {
        if !self.input_enabled || self.aiming {
            return;
        }
        self.using_camera = !self.using_camera;
        vf_debug!(SOURCE, "Using {}", if self.using_camera { "camera" } else { "photos" });
    }

    /// Start aiming; in photo mode the current photo is held up in front of the frame
    pub fn aim(&mut self, world: &mut World) {
        if !self.input_enabled {
            return;
        }
        if !self.using_camera {
            self.take_out_photo(world);
        }
        self.aiming = true;
    }

    /// Stop aiming; in photo mode the held photo is parked and its rotation reset
    pub fn aim_end(&mut self, world: &mut World) {
        if !self.input_enabled {
            return;
        }
        self.finish_aim(world);
    }

    /// Select the next photo of the collection (photo mode, not aiming)
    pub fn switch_to_next_photo(&mut self, world: &mut World) {
        if !self.input_enabled || self.using_camera || self.aiming {
            return;
        }
        let target = if self.photos.is_empty() {
            None
        } else {
            Some(self.current_photo_index.map_or(0, |i| i + 1) % self.photos.len())
        };
        self.select_photo(world, target);
    }

    /// Turn the held photo one step; the sign of `direction` picks the way
    pub fn rotate_current_photo(&mut self, world: &mut World, direction: f32) {
        if !self.input_enabled || self.using_camera || !self.aiming {
            return;
        }
        let step = if direction > 0.0 {
            self.config.photo_rotate_angle
        } else {
            -self.config.photo_rotate_angle
        };
        self.current_rotated_angle += step;
        self.apply_rotated_angle_delta_to_photo(world, step);
    }

    /// Take a photo (camera mode) or place the current photo (photo mode).
    ///
    /// Returns true when a photo was taken or placed. Only valid while aiming.
    pub fn take_or_place_photo(&mut self, world: &mut World, backend: &mut dyn CaptureBackend) -> bool {
        if !self.input_enabled || !self.aiming {
            return false;
        }
        if self.using_camera {
            let taken = self.take_photo(world, backend);
            self.finish_aim(world);
            taken
        } else {
            self.place_current_photo(world)
        }
    }

    /// Start playing the history back, if it holds an action to undo
    pub fn trigger_rewind(&mut self) -> bool {
        if !self.input_enabled {
            return false;
        }
        if !self.ledger.has_tagged() {
            vf_debug!(SOURCE, "Nothing to rewind");
            return false;
        }
        self.set_input_enabled(false);
        self.rewind_undid_action = false;
        self.scheduler.switch_to(TickTask::RewindStep);
        vf_info!(SOURCE, "Rewind started, {} snapshots", self.ledger.len());
        true
    }

    // ===== COLLECTION =====

    /// Add a photo, select it and park it at the held pose
    pub fn add_photo_to_collection(&mut self, world: &mut World, photo: PhotoKey) {
        let Some(photo_root) = world.photo_mesh(photo) else {
            vf_warn!(SOURCE, "Photo {:?} is not alive, not added", photo);
            return;
        };
        if let Some(owner_root) = world.actor(self.owner).and_then(|a| a.root()) {
            if let Err(e) = world.attach_component(photo_root, owner_root) {
                vf_warn!(SOURCE, "Photo {:?} not attached to owner: {}", photo, e);
            }
        }
        self.photos.push(photo);
        self.select_photo(world, Some(self.photos.len() - 1));
        self.withdraw_photo(world);
    }

    /// Hold the current photo in front of the frame, turned by the current angle
    pub fn take_out_photo(&mut self, world: &mut World) {
        let Some(frame) = self.taker.frame_no_scale(world) else {
            return;
        };
        let Some((photo, aspect_ratio)) = self.current_photo_with_aspect(world) else {
            return;
        };
        let distance = self.config.photo_place_distance;
        let base = distance / 100.0 * (self.taker.default_params().fov_angle / 2.0).to_radians().tan();
        let pose = Transform {
            translation: frame.translation + frame.forward() * distance,
            rotation: frame.rotation,
            scale: held_scale(base, aspect_ratio),
        };
        self.set_photo_pose(world, photo, &pose);
        self.apply_rotated_angle_delta_to_photo(world, self.current_rotated_angle);
    }

    /// Park the current photo at the configured offset and scale
    pub fn withdraw_photo(&mut self, world: &mut World) {
        let Some(frame) = self.taker.frame_no_scale(world) else {
            return;
        };
        let Some((photo, aspect_ratio)) = self.current_photo_with_aspect(world) else {
            return;
        };
        let offset = self.config.held_photo_offset;
        let pose = Transform {
            translation: frame.translation
                + frame.forward() * self.config.photo_place_distance
                + frame.right() * offset.x
                + frame.up() * offset.y,
            rotation: frame.rotation,
            scale: held_scale(self.config.held_photo_scale, aspect_ratio),
        };
        self.set_photo_pose(world, photo, &pose);
    }

    // ===== HISTORY =====

    /// Pump the scheduler; runs every due record or rewind tick
    pub fn update(&mut self, world: &mut World, delta_seconds: f32) {
        self.scheduler.advance(delta_seconds);
        while let Some(task) = self.scheduler.pop_due() {
            match task {
                TickTask::Record => self.record_tick(world),
                TickTask::RewindStep => self.rewind_tick(world),
            }
        }
    }

    /// Append a snapshot of the owner
    pub fn record_tick(&mut self, world: &World) {
        let transform = world.actor_transform(self.owner).unwrap_or_default();
        self.ledger.record(transform, self.control_rotation);
        vf_trace!(SOURCE, "Snapshot {} recorded", self.ledger.len());
    }

    /// Play back the newest snapshot, undoing its action
    pub fn rewind_tick(&mut self, world: &mut World) {
        let Some(record) = self.ledger.pop_latest() else {
            self.finish_rewind();
            return;
        };

        world.set_actor_transform(self.owner, &record.transform);
        self.control_rotation = record.control_rotation;

        match record.action {
            RewindAction::None => {}
            RewindAction::Captured(info) => {
                self.undo_capture(world, &info);
                self.rewind_undid_action = true;
            }
            RewindAction::Placed(placement) => {
                self.undo_placement(world, *placement);
                self.rewind_undid_action = true;
            }
        }

        let next_is_tagged = self.ledger.latest().is_some_and(|r| !r.action.is_none());
        if self.ledger.is_empty() || (self.rewind_undid_action && next_is_tagged) {
            self.finish_rewind();
        }
    }

    // ===== INTERNALS =====

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.input_gate.set_input_enabled(enabled);
    }

    fn finish_aim(&mut self, world: &mut World) {
        if !self.using_camera {
            self.current_rotated_angle = 0.0;
            self.withdraw_photo(world);
        }
        self.aiming = false;
    }

    fn finish_rewind(&mut self) {
        self.rewind_undid_action = false;
        self.scheduler.switch_to(TickTask::Record);
        self.set_input_enabled(true);
        vf_info!(SOURCE, "Rewind finished, {} snapshots left", self.ledger.len());
    }

    fn owner_snapshot(&self, world: &World) -> Transform {
        world.actor_transform(self.owner).unwrap_or_default()
    }

    fn take_photo(&mut self, world: &mut World, backend: &mut dyn CaptureBackend) -> bool {
        let photo = match self.taker.take_photo(world, backend) {
            Ok(photo) => photo,
            Err(e) => {
                vf_warn!(SOURCE, "No photo taken: {}", e);
                return false;
            }
        };
        let Some(info) = world.photo(photo).map(|p| p.info().clone()) else {
            return false;
        };
        self.add_photo_to_collection(world, photo);

        let snapshot = self.owner_snapshot(world);
        self.ledger.tag_latest(RewindAction::Captured(info), snapshot, self.control_rotation);
        vf_info!(SOURCE, "Photo {:?} taken, {} in collection", photo, self.photos.len());
        true
    }

    fn place_current_photo(&mut self, world: &mut World) -> bool {
        let Some(index) = self.current_photo_index.filter(|i| *i < self.photos.len()) else {
            return false;
        };
        let photo = self.photos[index];
        let record = match self.taker.place_photo(world, Some(photo), self.current_rotated_angle) {
            Ok(record) => record,
            Err(e) => {
                vf_warn!(SOURCE, "Photo {:?} not placed: {}", photo, e);
                return false;
            }
        };

        let snapshot = self.owner_snapshot(world);
        self.ledger.tag_latest(RewindAction::Placed(Box::new(record)), snapshot, self.control_rotation);

        world.destroy_photo(photo);
        self.photos.remove(index);
        self.current_photo_index = None;
        let next = self.fallback_index(index);
        self.select_photo(world, next);
        vf_info!(SOURCE, "Photo {:?} placed, {} left", photo, self.photos.len());
        true
    }

    /// `index` if still valid, else the one before it
    fn fallback_index(&self, index: usize) -> Option<usize> {
        if index < self.photos.len() {
            Some(index)
        } else if index > 0 && index - 1 < self.photos.len() {
            Some(index - 1)
        } else {
            None
        }
    }

    /// Hide the current photo and show the one at `index`; `None` or an
    /// out-of-range index clears the selection
    fn select_photo(&mut self, world: &mut World, index: Option<usize>) {
        if let Some(current) = self.current_photo() {
            set_photo_visible(world, current, false);
        }
        self.current_photo_index = index.filter(|i| *i < self.photos.len());
        if let Some(current) = self.current_photo() {
            set_photo_visible(world, current, true);
        }
    }

    fn current_photo_with_aspect(&self, world: &World) -> Option<(PhotoKey, f32)> {
        let photo = self.current_photo()?;
        let aspect_ratio = world.photo(photo)?.info().params.aspect_ratio();
        Some((photo, aspect_ratio))
    }

    fn set_photo_pose(&self, world: &mut World, photo: PhotoKey, pose: &Transform) {
        if let Some(root) = world.photo_mesh(photo) {
            world.set_component_world_transform(root, pose);
        }
    }

    /// Turn the current photo about the frame's forward axis
    fn apply_rotated_angle_delta_to_photo(&self, world: &mut World, delta_degrees: f32) {
        let Some(frame) = self.taker.frame_no_scale(world) else {
            return;
        };
        let Some(root) = self.current_photo().and_then(|p| world.photo_mesh(p)) else {
            return;
        };
        let Some(mut pose) = world.component_world_transform(root) else {
            return;
        };
        let turn = Quat::from_axis_angle(frame.forward(), delta_degrees.to_radians());
        pose.rotation = (turn * pose.rotation).normalize();
        world.set_component_world_transform(root, &pose);
    }

    fn undo_capture(&mut self, world: &mut World, info: &PhotoInfo) {
        let found = self
            .photos
            .iter()
            .position(|p| world.photo(*p).is_some_and(|photo| photo.info() == info));
        let Some(index) = found else {
            vf_warn!(SOURCE, "Captured photo {:?} no longer in collection", info.render_target);
            return;
        };

        let photo = self.photos.remove(index);
        self.current_photo_index = match self.current_photo_index {
            Some(current) if index < current => Some(current - 1),
            Some(current) if index == current => self.fallback_index(current),
            other => other.filter(|i| *i < self.photos.len()),
        };
        if let Some(current) = self.current_photo() {
            set_photo_visible(world, current, true);
        }

        world.destroy_photo(photo);
        self.released_targets.push(info.render_target);
        self.released_targets.extend(info.background_target);
        vf_info!(SOURCE, "Rewind removed photo {:?}", photo);
    }

    fn undo_placement(&mut self, world: &mut World, record: PlacementRecord) {
        let undo = record.undo;
        for component in &undo.generated_components {
            world.destroy_component(*component);
        }
        for actor in &undo.spawned_actors {
            world.destroy_actor(*actor);
        }
        for (component, state) in &undo.hidden_components {
            if let Some(c) = world.component_mut(*component) {
                c.restore_state(*state);
            }
        }
        if let Some(background) = undo.background_photo {
            world.destroy_photo(background);
        }
        vf_info!(
            SOURCE,
            "Rewind undid placement: {} generated, {} spawned, {} restored",
            undo.generated_components.len(),
            undo.spawned_actors.len(),
            undo.hidden_components.len()
        );

        let Some(class) = record.photo_info.params.photo_class else {
            return;
        };
        let at = self.taker.frame_no_scale(world).unwrap_or_default();
        match world.spawn_photo(class, &at, record.photo_info) {
            Ok(photo) => self.add_photo_to_collection(world, photo),
            Err(e) => vf_warn!(SOURCE, "Placed photo not restored: {}", e),
        }
    }
}

/// Held photo scale: unit depth, `base` on the longer side
fn held_scale(base: f32, aspect_ratio: f32) -> Vec3 {
    Vec3::new(1.0, base * aspect_ratio.min(1.0), base * (1.0 / aspect_ratio).min(1.0))
}

fn set_photo_visible(world: &mut World, photo: PhotoKey, visible: bool) {
    if let Some(root) = world.photo_mesh(photo) {
        if let Some(component) = world.component_mut(root) {
            component.set_flag(ComponentFlags::VISIBLE, visible);
        }
    }
}

#[cfg(test)]
#[path = "viewfinder_controller_tests.rs"]
mod tests;
