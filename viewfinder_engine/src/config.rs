//! Driver configuration for the Viewfinder engine
//!
//! Tunables of the held photo and of the rewind history. Capture defaults
//! (field of view, distances, render size) live in `PhotoTakeParams`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::vf_bail;

const SOURCE: &str = "viewfinder::Config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewfinderConfig {
    /// Distance in front of the frame where a held photo is shown
    pub photo_place_distance: f32,
    /// Rotation step of the held photo, in degrees
    pub photo_rotate_angle: f32,
    /// Seconds of history kept for rewind
    pub max_rewind_time: f32,
    /// Seconds between two history snapshots
    pub rewind_record_interval: f32,
    /// Playback speed-up while rewinding
    pub rewind_time_rate: f32,
    /// Parked photo offset along the frame's right (x) and up (y) axes
    pub held_photo_offset: Vec2,
    /// Parked photo scale before aspect correction
    pub held_photo_scale: f32,
}

impl Default for ViewfinderConfig {
    fn default() -> Self {
        Self {
            photo_place_distance: 32.0,
            photo_rotate_angle: 15.0,
            max_rewind_time: 60.0,
            rewind_record_interval: 1.0 / 30.0,
            rewind_time_rate: 5.0,
            held_photo_offset: Vec2::new(-16.0, -8.0),
            held_photo_scale: 0.036,
        }
    }
}

impl ViewfinderConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("photo_place_distance", self.photo_place_distance),
            ("max_rewind_time", self.max_rewind_time),
            ("rewind_record_interval", self.rewind_record_interval),
            ("rewind_time_rate", self.rewind_time_rate),
            ("held_photo_scale", self.held_photo_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                vf_bail!(InvalidConfig, SOURCE, "{} must be positive, got {}", name, value);
            }
        }
        if !self.photo_rotate_angle.is_finite() {
            vf_bail!(InvalidConfig, SOURCE, "photo_rotate_angle must be finite");
        }
        if !self.held_photo_offset.is_finite() {
            vf_bail!(InvalidConfig, SOURCE, "held_photo_offset must be finite");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
