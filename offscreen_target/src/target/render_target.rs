/// Render target - where draw calls end up (window, image, ...)
///
/// Keeps the target's size and view in sync and knows how to create a
/// context for itself. Concrete targets plug in through `Drawable`.

use glam::Vec2;

use crate::context::{ContextKey, ContextRegistry, CurrentContext};
use crate::device::GlDevice;
use crate::error::Result;
use super::view::View;

/// Creates (and registers) the context a target draws with
pub type ContextFactory = fn(&mut ContextRegistry) -> ContextKey;

#[derive(Debug, Clone)]
pub struct RenderTarget {
    size: Vec2,
    view: View,
    context_factory: Option<ContextFactory>,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self {
            size: Vec2::ZERO,
            view: View::default(),
            context_factory: None,
        }
    }

    /// Size in target coordinates
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn set_context_factory(&mut self, factory: ContextFactory) {
        self.context_factory = Some(factory);
    }

    pub fn has_context_factory(&self) -> bool {
        self.context_factory.is_some()
    }

    /// Create a context through the installed factory
    ///
    /// Returns None when no factory is installed.
    pub fn create_context(&self, registry: &mut ContextRegistry) -> Option<ContextKey> {
        self.context_factory.map(|factory| factory(registry))
    }

    /// Point the viewport at the whole target
    pub fn apply_viewport(&self, gl: &mut dyn GlDevice) {
        gl.viewport(0, 0, self.size.x as u32, self.size.y as u32);
    }

    /// Push pending draw commands to the GPU
    pub fn update(&self, gl: &mut dyn GlDevice) {
        gl.flush();
    }
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// A render target selectable for drawing
pub trait Drawable {
    fn render_target(&self) -> &RenderTarget;

    /// Called every time the target is selected for drawing, before the
    /// viewport is set
    fn bind_hook(&mut self, gl: &mut dyn GlDevice, cx: &mut CurrentContext<'_>) -> Result<()>;

    /// Select this target for drawing in the current context
    fn make_current(&mut self, gl: &mut dyn GlDevice, cx: &mut CurrentContext<'_>) -> Result<()> {
        self.bind_hook(gl, cx)?;
        self.render_target().apply_viewport(gl);
        Ok(())
    }
}
