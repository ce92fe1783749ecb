/// PhotoInfo and ActorRecord: what a capture recorded.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::geometry::MeshData;
use crate::math::Transform;
use crate::scene::{ActorClassKey, MeshAssetKey};
use crate::target::RenderTargetKey;
use super::params::PhotoTakeParams;

/// One captured actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub class: ActorClassKey,
    /// Actor transform relative to the capture frame (no scale)
    pub relative_transform: Transform,
    /// Mesh asset bound to every mesh slot at capture time
    pub slot_meshes: FxHashMap<String, MeshAssetKey>,
}

/// Capture-time snapshot attached to a photo.
///
/// Two infos are the same photo when they share the primary render target.
/// Render targets and the captured mesh union only live for the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub params: PhotoTakeParams,
    #[serde(skip)]
    pub render_target: RenderTargetKey,
    #[serde(skip)]
    pub background_target: Option<RenderTargetKey>,
    pub actor_records: Vec<ActorRecord>,
    /// Union of the captured geometry in the capture frame (no scale)
    #[serde(skip)]
    pub mesh_union: Arc<MeshData>,
}

impl PartialEq for PhotoInfo {
    fn eq(&self, other: &Self) -> bool {
        self.render_target == other.render_target
    }
}

impl PhotoInfo {
    pub fn new(params: PhotoTakeParams, render_target: RenderTargetKey) -> Self {
        Self {
            params,
            render_target,
            background_target: None,
            actor_records: Vec::new(),
            mesh_union: Arc::new(MeshData::empty()),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[path = "photo_info_tests.rs"]
mod tests;
