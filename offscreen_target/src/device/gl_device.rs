/// GlDevice trait - the GPU calls issued by image targets
///
/// Backends (glow, test mocks) implement this trait. Every call maps to one
/// GL entry point operating on the `GL_FRAMEBUFFER` / `GL_RENDERBUFFER` /
/// `GL_TEXTURE_2D` binding points of the context current on the calling
/// thread.

use bitflags::bitflags;
use crate::device::{FramebufferId, RenderbufferId, TextureId};
use crate::error::Result;

bitflags! {
    /// Framebuffer-object related features reported by a device
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        /// `GL_EXT_framebuffer_object`
        const EXT_FRAMEBUFFER_OBJECT = 1 << 0;
        /// `GL_ARB_framebuffer_object`
        const ARB_FRAMEBUFFER_OBJECT = 1 << 1;
        /// Framebuffer objects in core (GL 3.0+, GLES 2.0+)
        const CORE_FRAMEBUFFER_OBJECT = 1 << 2;
    }
}

impl Capabilities {
    /// Whether render-to-texture through FBOs is possible at all
    pub fn supports_framebuffer_objects(self) -> bool {
        self.intersects(
            Capabilities::EXT_FRAMEBUFFER_OBJECT
                | Capabilities::ARB_FRAMEBUFFER_OBJECT
                | Capabilities::CORE_FRAMEBUFFER_OBJECT,
        )
    }
}

bitflags! {
    /// Buffers cleared by `GlDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Internal format used for depth renderbuffer storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthFormat {
    /// `GL_DEPTH_COMPONENT`, driver picks the precision
    #[default]
    Component,
    /// `GL_DEPTH_COMPONENT16`
    Component16,
    /// `GL_DEPTH_COMPONENT24`
    Component24,
    /// `GL_DEPTH_COMPONENT32F`
    Component32F,
}

/// GPU device trait
///
/// Object creation is fallible; every other call is assumed to succeed once
/// framebuffer-object support has been confirmed.
pub trait GlDevice {
    /// Framebuffer-object features available on this device
    fn capabilities(&self) -> Capabilities;

    /// `glGenFramebuffers`
    fn create_framebuffer(&mut self) -> Result<FramebufferId>;

    /// `glDeleteFramebuffers`
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    /// `glGenRenderbuffers`
    fn create_renderbuffer(&mut self) -> Result<RenderbufferId>;

    /// `glDeleteRenderbuffers`
    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId);

    /// `glBindFramebuffer(GL_FRAMEBUFFER, ..)`
    fn bind_framebuffer(&mut self, framebuffer: FramebufferId);

    /// `glBindRenderbuffer(GL_RENDERBUFFER, ..)`
    fn bind_renderbuffer(&mut self, renderbuffer: RenderbufferId);

    /// `glBindTexture(GL_TEXTURE_2D, ..)`
    fn bind_texture(&mut self, texture: TextureId);

    /// `glGenerateMipmap(GL_TEXTURE_2D)` on the bound texture
    fn generate_mipmap(&mut self);

    /// Attach a 2D texture as `GL_COLOR_ATTACHMENT0` of the bound framebuffer
    fn attach_color_texture(&mut self, texture: TextureId);

    /// `glRenderbufferStorage` on the bound renderbuffer
    fn renderbuffer_storage(&mut self, format: DepthFormat, width: u32, height: u32);

    /// Attach a renderbuffer as `GL_DEPTH_ATTACHMENT` of the bound framebuffer
    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferId);

    /// `glClear`
    fn clear(&mut self, mask: ClearMask);

    /// `glViewport`
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// `glFlush`
    fn flush(&mut self);
}
