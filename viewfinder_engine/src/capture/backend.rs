/// Capture backend: the rendering-capture provider.
///
/// A backend renders the world as seen from a `CaptureView` into a fresh
/// render target. Components are skipped when they are invisible, hidden
/// in capture or carry no geometry.

use crate::error::Result;
use crate::math::Transform;
use crate::scene::{ComponentKey, World};
use crate::target::{RenderTarget, RenderTargetKey};

/// Camera used for one capture render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureView {
    /// Camera frame, no scale (looks along local +X)
    pub transform: Transform,
    /// Horizontal field of view in degrees
    pub fov_angle: f32,
    pub width: u32,
    pub height: u32,
}

/// Rendering-capture provider
pub trait CaptureBackend {
    /// Render the world into a new render target
    fn render(&mut self, world: &World, view: &CaptureView) -> Result<RenderTargetKey>;

    /// Free a render target, returns false when it does not exist
    fn release(&mut self, target: RenderTargetKey) -> bool;

    /// Look up a render target
    fn render_target(&self, target: RenderTargetKey) -> Option<&RenderTarget>;
}

/// Components a capture render draws, oldest first
pub fn renderable_components(world: &World) -> Vec<ComponentKey> {
    world
        .component_keys()
        .into_iter()
        .filter(|key| {
            world.component(*key).is_some_and(|c| {
                c.is_visible() && !c.is_hidden_in_capture() && !c.geometry().is_none()
            })
        })
        .collect()
}
