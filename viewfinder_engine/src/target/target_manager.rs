/// Render target manager.
///
/// Stores render targets in a slot map keyed by `RenderTargetKey`, with a
/// secondary index by label. Labels are unique.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::Result;
use crate::vf_bail;
use super::render_target::{RenderTarget, RenderTargetKey};

#[derive(Debug, Default)]
pub struct TargetManager {
    render_targets: SlotMap<RenderTargetKey, RenderTarget>,
    by_label: FxHashMap<String, RenderTargetKey>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new labelled render target
    ///
    /// # Errors
    ///
    /// Returns an error if the label is taken or a dimension is zero.
    pub fn create_render_target(&mut self, label: &str, width: u32, height: u32) -> Result<RenderTargetKey> {
        if self.by_label.contains_key(label) {
            vf_bail!(InvalidConfig, "viewfinder::TargetManager",
                "RenderTarget '{}' already exists", label);
        }
        if width == 0 || height == 0 {
            vf_bail!(InvalidConfig, "viewfinder::TargetManager",
                "RenderTarget '{}' has zero size {}x{}", label, width, height);
        }

        let key = self.render_targets.insert(RenderTarget::new(label, width, height));
        self.by_label.insert(label.to_string(), key);
        Ok(key)
    }

    /// Get a render target by key
    pub fn render_target(&self, key: RenderTargetKey) -> Option<&RenderTarget> {
        self.render_targets.get(key)
    }

    /// Find a render target key by label
    pub fn render_target_by_label(&self, label: &str) -> Option<RenderTargetKey> {
        self.by_label.get(label).copied()
    }

    /// Remove a render target
    ///
    /// Returns the removed render target, or None if not found.
    pub fn remove_render_target(&mut self, key: RenderTargetKey) -> Option<RenderTarget> {
        let removed = self.render_targets.remove(key)?;
        self.by_label.remove(removed.label());
        Some(removed)
    }

    pub fn contains(&self, key: RenderTargetKey) -> bool {
        self.render_targets.contains_key(key)
    }

    /// Get the number of render targets
    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
