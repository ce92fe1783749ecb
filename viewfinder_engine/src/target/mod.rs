//! Render target management module
//!
//! A render target is the image a capture renders into. Photos keep the
//! key of their primary target, which doubles as the photo identity.

mod render_target;
mod target_manager;

pub use render_target::{RenderTarget, RenderTargetKey};
pub use target_manager::TargetManager;
