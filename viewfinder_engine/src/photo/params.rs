/// PhotoTakeParams: parameters a photo is (or was) captured with.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::geometry::primitives::PYRAMID_DEPTH;
use crate::math::Transform;
use crate::scene::ActorClassKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoTakeParams {
    /// Horizontal field of view in degrees
    pub fov_angle: f32,
    /// Only geometry closer than this is captured
    pub max_distance: f32,
    /// Distance of the background photo; a placement cuts everything closer
    pub background_distance: f32,
    /// Render target size in pixels
    pub capture_width: u32,
    pub capture_height: u32,
    /// Class of the photo entity spawned by a capture
    pub photo_class: Option<ActorClassKey>,
    /// Capture frame (no scale). `None` captures from the volume's own
    /// transform; filled in with the actual frame once a capture happened.
    pub take_transform: Option<Transform>,
}

impl Default for PhotoTakeParams {
    fn default() -> Self {
        Self {
            fov_angle: 32.0,
            max_distance: 1600.0,
            background_distance: 32768.0,
            capture_width: 1024,
            capture_height: 1024,
            photo_class: None,
            take_transform: None,
        }
    }
}

impl PhotoTakeParams {
    /// width / height, 1 for a degenerate size
    pub fn aspect_ratio(&self) -> f32 {
        if self.capture_width == 0 || self.capture_height == 0 {
            return 1.0;
        }
        self.capture_width as f32 / self.capture_height as f32
    }

    pub fn with_photo_class(mut self, class: ActorClassKey) -> Self {
        self.photo_class = Some(class);
        self
    }

    pub fn with_take_transform(mut self, transform: Transform) -> Self {
        self.take_transform = Some(transform.no_scale());
        self
    }

    /// Capture volume scale
    pub fn capture_scale(&self) -> Vec3 {
        pyramid_scale(self.fov_angle, self.max_distance, self.aspect_ratio())
    }

    /// Scale of the placement cut volume and of the background photo
    pub fn background_scale(&self) -> Vec3 {
        pyramid_scale(self.fov_angle, self.background_distance, self.aspect_ratio())
    }
}

/// Scale applied to the unit view pyramid for a field of view (degrees),
/// a depth and an aspect ratio.
///
/// x carries the depth, y and z the half extents at the base. The narrower
/// axis shrinks so that y / z always equals the aspect ratio.
pub fn pyramid_scale(fov_angle: f32, distance: f32, aspect_ratio: f32) -> Vec3 {
    let depth = distance / PYRAMID_DEPTH;
    let base = depth * (fov_angle.to_radians() * 0.5).tan();
    Vec3::new(
        depth,
        base * aspect_ratio.min(1.0),
        base * (1.0 / aspect_ratio).min(1.0),
    )
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
