/// Photo: the entity holding a PhotoInfo in the world.
///
/// The photo's actor renders a display plane whose material samples the
/// primary render target.

use slotmap::new_key_type;
use crate::scene::ActorKey;
use super::photo_info::PhotoInfo;

new_key_type! {
    /// Stable key for a Photo within a World.
    pub struct PhotoKey;
}

#[derive(Debug, Clone)]
pub struct Photo {
    actor: ActorKey,
    info: PhotoInfo,
}

impl Photo {
    pub(crate) fn new(actor: ActorKey, info: PhotoInfo) -> Self {
        Self { actor, info }
    }

    /// Actor rendering the display plane
    pub fn actor(&self) -> ActorKey {
        self.actor
    }

    pub fn info(&self) -> &PhotoInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut PhotoInfo {
        &mut self.info
    }
}
