/// Mock capture backend (no GPU required)
///
/// Allocates render targets in a `TargetManager` and records, for every
/// render, the view and the components that would have been drawn.

use crate::error::Result;
use crate::scene::{ComponentKey, World};
use crate::target::{RenderTarget, RenderTargetKey, TargetManager};
use crate::vf_bail;
use super::backend::{renderable_components, CaptureBackend, CaptureView};

const SOURCE: &str = "viewfinder::MockCaptureBackend";

/// One render performed by the mock
#[derive(Debug, Clone)]
pub struct MockRender {
    pub target: RenderTargetKey,
    pub view: CaptureView,
    pub drawn: Vec<ComponentKey>,
}

#[derive(Debug, Default)]
pub struct MockCaptureBackend {
    targets: TargetManager,
    renders: Vec<MockRender>,
    next_id: u64,
    /// Number of upcoming renders that succeed before renders start failing
    fail_after: Option<usize>,
}

impl MockCaptureBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every render after the next `successes` ones fail
    pub fn fail_after(&mut self, successes: usize) {
        self.fail_after = Some(successes);
    }

    pub fn renders(&self) -> &[MockRender] {
        &self.renders
    }

    pub fn last_render(&self) -> Option<&MockRender> {
        self.renders.last()
    }

    /// Components drawn into `target`
    pub fn drawn_into(&self, target: RenderTargetKey) -> Option<&[ComponentKey]> {
        self.renders
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.drawn.as_slice())
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }
}

impl CaptureBackend for MockCaptureBackend {
    fn render(&mut self, world: &World, view: &CaptureView) -> Result<RenderTargetKey> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                vf_bail!(CaptureFailed, SOURCE, "Render {} refused", self.next_id);
            }
            *remaining -= 1;
        }

        let label = format!("capture_{}", self.next_id);
        self.next_id += 1;
        let target = self.targets.create_render_target(&label, view.width, view.height)?;

        self.renders.push(MockRender {
            target,
            view: *view,
            drawn: renderable_components(world),
        });
        Ok(target)
    }

    fn release(&mut self, target: RenderTargetKey) -> bool {
        self.targets.remove_render_target(target).is_some()
    }

    fn render_target(&self, target: RenderTargetKey) -> Option<&RenderTarget> {
        self.targets.render_target(target)
    }
}

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
