/// Image target - render into a shared image from any context
///
/// One color image and one depth renderbuffer are shared by every
/// context; the framebuffer object tying them together is not, so each
/// context gets its own, built on first bind and rebuilt when the image
/// is swapped.
///
/// # Example
///
/// ```ignore
/// let mut target = ImageTarget::new(&mut gl)?;
/// let mut cx = contexts.require_current()?;
/// target.set_image(&mut gl, &mut cx, Some(image))?;
/// // draw...
/// target.update(&mut gl);
/// ImageTarget::unbind(&mut gl, &mut cx);
/// ```

use std::sync::{Arc, Weak};

use glam::Vec2;

use crate::context::{BindingSlots, ContextKey, ContextRegistry, CurrentContext};
use crate::device::{ClearMask, FramebufferId, GlDevice, RenderbufferId};
use crate::error::Result;
use crate::{offscreen_bail, offscreen_debug, offscreen_trace, offscreen_warn};
use super::config::ImageTargetConfig;
use super::fbo_records::{FboRecord, FboRecords};
use super::image::TargetImage;
use super::render_target::{Drawable, RenderTarget};

const SOURCE: &str = "offscreen::ImageTarget";

/// Off-screen target rendering into a `TargetImage`
pub struct ImageTarget {
    target: RenderTarget,
    image: Option<Weak<dyn TargetImage>>,
    depth_buffer: RenderbufferId,
    fbos: FboRecords,
    config: ImageTargetConfig,
}

/// Context factory installed on image targets: a fresh context per request
fn image_target_context(registry: &mut ContextRegistry) -> ContextKey {
    registry.create_context()
}

impl ImageTarget {
    /// Whether the device can render to textures through FBOs
    pub fn is_available(gl: &dyn GlDevice) -> bool {
        gl.capabilities().supports_framebuffer_objects()
    }

    /// Create an inactive target with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` if the device lacks FBO support, or
    /// the backend error if the depth renderbuffer cannot be created.
    pub fn new(gl: &mut dyn GlDevice) -> Result<Self> {
        Self::with_config(gl, ImageTargetConfig::default())
    }

    pub fn with_config(gl: &mut dyn GlDevice, config: ImageTargetConfig) -> Result<Self> {
        if !Self::is_available(gl) {
            offscreen_bail!(SOURCE, CapabilityUnavailable,
                "framebuffer objects are not supported (device reports {:?})",
                gl.capabilities());
        }

        let depth_buffer = gl.create_renderbuffer()?;
        offscreen_debug!(SOURCE, "Created image target with depth buffer {}", depth_buffer);

        Ok(Self {
            target: RenderTarget::new(),
            image: None,
            depth_buffer,
            fbos: FboRecords::new(),
            config,
        })
    }

    /// Set the image to render into, or `None` to make the target inert.
    ///
    /// Only a weak reference is kept. A new image resizes the target and
    /// its view to the image, then selects the target once in `cx` so its
    /// framebuffer exists before the first draw. Framebuffers of other
    /// contexts are rebuilt lazily on their next bind.
    pub fn set_image(
        &mut self,
        gl: &mut dyn GlDevice,
        cx: &mut CurrentContext<'_>,
        image: Option<Arc<dyn TargetImage>>,
    ) -> Result<()> {
        self.image = image.as_ref().map(Arc::downgrade);

        let Some(image) = image else {
            offscreen_debug!(SOURCE, "Image cleared, target is inactive");
            return Ok(());
        };

        self.target.set_context_factory(image_target_context);

        let size = image.size().as_vec2();
        self.target.set_size(size);
        let view = self.target.view_mut();
        view.set_size(size);
        view.set_center(size / 2.0);

        self.make_current(gl, cx)
    }

    /// The image currently rendered into, if it is still alive
    pub fn image(&self) -> Option<Arc<dyn TargetImage>> {
        self.image.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_active(&self) -> bool {
        self.image().is_some()
    }

    /// Bind this target's framebuffer in the current context.
    ///
    /// Does nothing while no image is set. Builds the context's
    /// framebuffer on first use or after the image changed, otherwise
    /// just binds it. The depth buffer is cleared every time.
    pub fn bind(&mut self, gl: &mut dyn GlDevice, cx: &mut CurrentContext<'_>) -> Result<()> {
        let Some(image) = self.image() else {
            return Ok(());
        };

        let (record, created) = self.fbos.get_or_insert(cx.key());
        if created || !record.is_built_for(&Arc::downgrade(&image)) {
            build_framebuffer(gl, cx.slots(), record, &image, self.depth_buffer, &self.config)?;
        } else {
            offscreen_trace!(SOURCE, "Binding {} in context {:?}", record.framebuffer, cx.key());
            cx.slots().bind_framebuffer(gl, record.framebuffer);
        }

        gl.clear(ClearMask::DEPTH);
        Ok(())
    }

    /// Flush pending draws and flag the image as modified
    pub fn update(&self, gl: &mut dyn GlDevice) {
        if let Some(image) = self.image() {
            self.target.update(gl);
            image.mark_out_of_date();
        }
    }

    /// Go back to the default framebuffer in the current context.
    ///
    /// Skipped entirely on devices without FBO support.
    pub fn unbind(gl: &mut dyn GlDevice, cx: &mut CurrentContext<'_>) {
        if Self::is_available(gl) {
            cx.slots().bind_framebuffer(gl, FramebufferId::DEFAULT);
        }
    }

    /// Clear binding slots that are about to go stale.
    ///
    /// Must run before the depth buffer or any context is destroyed: GL
    /// recycles names, and a slot still holding a deleted name would make
    /// the binding cache skip a bind of an unrelated object later.
    pub fn will_delete(&self, contexts: &mut ContextRegistry) {
        for (key, slots) in contexts.iter_mut() {
            if let Some(record) = self.fbos.get(key) {
                if slots.forget_framebuffer(record.framebuffer) {
                    offscreen_trace!(SOURCE, "Cleared framebuffer slot of context {:?}", key);
                }
            }
            if slots.forget_renderbuffer(self.depth_buffer) {
                offscreen_trace!(SOURCE, "Cleared renderbuffer slot of context {:?}", key);
            }
        }
    }

    /// Drop the framebuffer of a context that is about to be destroyed.
    ///
    /// Only that context's framebuffer slot is cleared: every other
    /// context keeps its own framebuffer bound, and the depth buffer lives
    /// on. The GL object is deleted only if `context` is current; otherwise
    /// it is left to the context's own teardown. Returns false in that case.
    pub fn context_destroyed(
        &mut self,
        gl: &mut dyn GlDevice,
        contexts: &mut ContextRegistry,
        context: ContextKey,
    ) -> bool {
        if let (Some(record), Some(slots)) = (self.fbos.get(context), contexts.slots_mut(context)) {
            if slots.forget_framebuffer(record.framebuffer) {
                offscreen_trace!(SOURCE, "Cleared framebuffer slot of context {:?}", context);
            }
        }
        self.fbos.remove(gl, context, contexts.current())
    }

    /// Destroy the target and its GPU objects.
    ///
    /// Framebuffers owned by contexts other than the current one cannot be
    /// deleted from here and are left behind. Returns how many were.
    pub fn destroy(mut self, gl: &mut dyn GlDevice, contexts: &mut ContextRegistry) -> usize {
        self.will_delete(contexts);
        gl.delete_renderbuffer(self.depth_buffer);

        let leaked = self.fbos.clear(gl, contexts.current());
        if leaked > 0 {
            offscreen_warn!(SOURCE,
                "Destroyed with {} framebuffer(s) owned by non-current contexts", leaked);
        } else {
            offscreen_debug!(SOURCE, "Destroyed image target (depth buffer {})", self.depth_buffer);
        }
        leaked
    }

    /// Shared depth renderbuffer
    pub fn depth_buffer(&self) -> RenderbufferId {
        self.depth_buffer
    }

    /// Framebuffer built for `context`, if any
    pub fn framebuffer_for(&self, context: ContextKey) -> Option<FramebufferId> {
        self.fbos
            .get(context)
            .map(|record| record.framebuffer)
            .filter(|framebuffer| !framebuffer.is_default())
    }

    pub fn has_record(&self, context: ContextKey) -> bool {
        self.fbos.contains(context)
    }

    /// Number of contexts holding a framebuffer record
    pub fn record_count(&self) -> usize {
        self.fbos.len()
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Target size in pixels (zero until an image is set)
    pub fn size(&self) -> Vec2 {
        self.target.size()
    }

    pub fn config(&self) -> &ImageTargetConfig {
        &self.config
    }
}

impl Drawable for ImageTarget {
    fn render_target(&self) -> &RenderTarget {
        &self.target
    }

    fn bind_hook(&mut self, gl: &mut dyn GlDevice, cx: &mut CurrentContext<'_>) -> Result<()> {
        self.bind(gl, cx)
    }
}

/// (Re)attach `image` and the shared depth buffer to a context's framebuffer
fn build_framebuffer(
    gl: &mut dyn GlDevice,
    slots: &mut BindingSlots,
    record: &mut FboRecord,
    image: &Arc<dyn TargetImage>,
    depth_buffer: RenderbufferId,
    config: &ImageTargetConfig,
) -> Result<()> {
    if record.framebuffer.is_default() {
        record.framebuffer = gl.create_framebuffer()?;
    }

    slots.bind_framebuffer(gl, record.framebuffer);

    // The image was just rendered into; its mip levels are stale.
    image.bind_texture(gl);
    if config.generate_mipmaps {
        gl.generate_mipmap();
    }
    gl.attach_color_texture(image.texture());

    // Storage is reallocated on every build since the image may have been
    // swapped for one of a different size.
    let size = image.size();
    slots.bind_renderbuffer(gl, depth_buffer);
    gl.renderbuffer_storage(config.depth_format, size.x, size.y);
    gl.attach_depth_renderbuffer(depth_buffer);

    record.image = Some(Arc::downgrade(image));

    offscreen_debug!(SOURCE, "Built {} for context {:?} ({}x{}, {})",
        record.framebuffer, record.owner, size.x, size.y, image.texture());
    Ok(())
}

#[cfg(test)]
#[path = "image_target_tests.rs"]
mod tests;
