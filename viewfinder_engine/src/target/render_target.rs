/// Render target: the image a capture renders into.
///
/// Render targets can only be created via `TargetManager::create_render_target()`.

use slotmap::new_key_type;

new_key_type! {
    /// Stable key for a RenderTarget within a TargetManager.
    ///
    /// Two photos are the same photo when they share this key.
    pub struct RenderTargetKey;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    label: String,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Internal only, created via TargetManager::create_render_target()
    pub(crate) fn new(label: &str, width: u32, height: u32) -> Self {
        Self { label: label.to_string(), width, height }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// width / height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
