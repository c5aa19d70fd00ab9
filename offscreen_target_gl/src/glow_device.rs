/// GlowDevice - `GlDevice` over a native `glow::Context`
///
/// Handles cross the seam as raw GL names; name 0 maps to `None`, which
/// glow binds as the default object.

use std::num::NonZeroU32;

use glow::HasContext;
use offscreen_target::offscreen::device::{
    Capabilities, ClearMask, DepthFormat, FramebufferId, GlDevice, RenderbufferId, TextureId,
};
use offscreen_target::offscreen::{Error, Result};
use offscreen_target::{offscreen_debug, offscreen_error};

use crate::capabilities::detect_capabilities;

const SOURCE: &str = "offscreen::GlowDevice";

/// OpenGL device backed by glow
pub struct GlowDevice {
    gl: glow::Context,
    capabilities: Capabilities,
}

impl GlowDevice {
    /// Wrap a context, detecting its framebuffer-object support once
    pub fn new(gl: glow::Context) -> Self {
        let version = gl.version();
        let capabilities = detect_capabilities(
            version.major,
            version.minor,
            version.is_embedded,
            gl.supported_extensions(),
        );
        offscreen_debug!(SOURCE, "GL {}.{}{} reports {:?}",
            version.major, version.minor,
            if version.is_embedded { " ES" } else { "" },
            capabilities);

        Self { gl, capabilities }
    }
}

fn native_framebuffer(id: FramebufferId) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(id.0).map(glow::NativeFramebuffer)
}

fn native_renderbuffer(id: RenderbufferId) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(id.0).map(glow::NativeRenderbuffer)
}

fn native_texture(id: TextureId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(id.0).map(glow::NativeTexture)
}

/// GL internal format for depth renderbuffer storage
pub(crate) fn depth_format_to_gl(format: DepthFormat) -> u32 {
    match format {
        DepthFormat::Component => glow::DEPTH_COMPONENT,
        DepthFormat::Component16 => glow::DEPTH_COMPONENT16,
        DepthFormat::Component24 => glow::DEPTH_COMPONENT24,
        DepthFormat::Component32F => glow::DEPTH_COMPONENT32F,
    }
}

pub(crate) fn clear_mask_to_gl(mask: ClearMask) -> u32 {
    let mut bits = 0;
    if mask.contains(ClearMask::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if mask.contains(ClearMask::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    if mask.contains(ClearMask::STENCIL) {
        bits |= glow::STENCIL_BUFFER_BIT;
    }
    bits
}

/// Sizes beyond `i32::MAX` are clamped; GL rejects them anyway
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// SAFETY (all methods below): glow wraps raw GL calls as unsafe. Callers
// keep the wrapped context current on this thread, and every name passed
// in was produced by this device.
#[allow(unsafe_code)]
impl GlDevice for GlowDevice {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        match unsafe { self.gl.create_framebuffer() } {
            Ok(framebuffer) => Ok(FramebufferId(framebuffer.0.get())),
            Err(message) => {
                offscreen_error!(SOURCE, "glGenFramebuffers failed: {}", message);
                Err(Error::BackendError(message))
            }
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        if let Some(framebuffer) = native_framebuffer(framebuffer) {
            unsafe { self.gl.delete_framebuffer(framebuffer) };
        }
    }

    fn create_renderbuffer(&mut self) -> Result<RenderbufferId> {
        match unsafe { self.gl.create_renderbuffer() } {
            Ok(renderbuffer) => Ok(RenderbufferId(renderbuffer.0.get())),
            Err(message) => {
                offscreen_error!(SOURCE, "glGenRenderbuffers failed: {}", message);
                Err(Error::BackendError(message))
            }
        }
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        if let Some(renderbuffer) = native_renderbuffer(renderbuffer) {
            unsafe { self.gl.delete_renderbuffer(renderbuffer) };
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, native_framebuffer(framebuffer))
        };
    }

    fn bind_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        unsafe {
            self.gl
                .bind_renderbuffer(glow::RENDERBUFFER, native_renderbuffer(renderbuffer))
        };
    }

    fn bind_texture(&mut self, texture: TextureId) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, native_texture(texture)) };
    }

    fn generate_mipmap(&mut self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) };
    }

    fn attach_color_texture(&mut self, texture: TextureId) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                native_texture(texture),
                0,
            )
        };
    }

    fn renderbuffer_storage(&mut self, format: DepthFormat, width: u32, height: u32) {
        unsafe {
            self.gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                depth_format_to_gl(format),
                gl_size(width),
                gl_size(height),
            )
        };
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                native_renderbuffer(renderbuffer),
            )
        };
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe { self.gl.clear(clear_mask_to_gl(mask)) };
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { self.gl.viewport(x, y, gl_size(width), gl_size(height)) };
    }

    fn flush(&mut self) {
        unsafe { self.gl.flush() };
    }
}
