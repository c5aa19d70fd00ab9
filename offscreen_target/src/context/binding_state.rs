/// Per-context binding-state cache
///
/// These are the only functions allowed to touch the GL framebuffer and
/// renderbuffer binding points. The slots mirror what is bound on the GPU
/// for their context while it is the active one.

use crate::device::{FramebufferId, GlDevice, RenderbufferId};

/// Framebuffer and renderbuffer currently bound in one context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingSlots {
    /// Framebuffer bound to `GL_FRAMEBUFFER` (0 = default framebuffer)
    pub framebuffer: FramebufferId,
    /// Renderbuffer bound to `GL_RENDERBUFFER` (0 = none)
    pub renderbuffer: RenderbufferId,
}

impl BindingSlots {
    /// Bind `framebuffer`, skipping the GL call if it is already bound
    pub fn bind_framebuffer(&mut self, gl: &mut dyn GlDevice, framebuffer: FramebufferId) {
        if self.framebuffer != framebuffer {
            gl.bind_framebuffer(framebuffer);
            self.framebuffer = framebuffer;
        }
    }

    /// Bind `renderbuffer`, skipping the GL call if it is already bound
    pub fn bind_renderbuffer(&mut self, gl: &mut dyn GlDevice, renderbuffer: RenderbufferId) {
        if self.renderbuffer != renderbuffer {
            gl.bind_renderbuffer(renderbuffer);
            self.renderbuffer = renderbuffer;
        }
    }

    /// Clear the framebuffer slot if it holds `framebuffer`.
    ///
    /// Returns whether the slot was cleared.
    pub fn forget_framebuffer(&mut self, framebuffer: FramebufferId) -> bool {
        if self.framebuffer == framebuffer {
            self.framebuffer = FramebufferId::DEFAULT;
            return true;
        }
        false
    }

    /// Clear the renderbuffer slot if it holds `renderbuffer`.
    ///
    /// Returns whether the slot was cleared.
    pub fn forget_renderbuffer(&mut self, renderbuffer: RenderbufferId) -> bool {
        if self.renderbuffer == renderbuffer {
            self.renderbuffer = RenderbufferId::NONE;
            return true;
        }
        false
    }

    /// Forget both bindings (e.g. after the context lost its state)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "binding_state_tests.rs"]
mod tests;
