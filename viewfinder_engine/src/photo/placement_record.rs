/// PlacementRecord: what a placement did, for persistence and undo.

use serde::{Deserialize, Serialize};
use crate::math::Transform;
use crate::scene::{ActorKey, ComponentKey, ComponentState};
use super::photo::PhotoKey;
use super::photo_info::PhotoInfo;

/// Live handles created or modified by a placement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementUndo {
    pub spawned_actors: Vec<ActorKey>,
    /// Destination components hidden by the cut, with their previous state
    pub hidden_components: Vec<(ComponentKey, ComponentState)>,
    /// Cut geometry generated for the destination components
    pub generated_components: Vec<ComponentKey>,
    pub background_photo: Option<PhotoKey>,
}

impl PlacementUndo {
    pub fn is_empty(&self) -> bool {
        self.spawned_actors.is_empty()
            && self.hidden_components.is_empty()
            && self.generated_components.is_empty()
            && self.background_photo.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub photo_info: PhotoInfo,
    /// Rotation about the frame's forward axis, in degrees
    pub rotated_angle: f32,
    /// Placing frame (no scale) before the rotation was applied
    pub place_transform: Transform,
    #[serde(skip)]
    pub undo: PlacementUndo,
}

impl PlacementRecord {
    /// Record of a placement that did nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.photo_info.actor_records.is_empty()
    }
}
