/// Mock GL device for unit tests (no GPU required)
///
/// Records every call, tracks live objects and attachments, and keeps
/// framebuffer/renderbuffer bindings per context the way a driver does.
/// Deleted names are recycled on the next creation.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use glam::UVec2;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::ContextKey;
use crate::device::{
    Capabilities, ClearMask, DepthFormat, FramebufferId, GlDevice, RenderbufferId, TextureId,
};
use crate::error::Result;
use crate::offscreen_bail;
use crate::target::TargetImage;

// ============================================================================
// Recorded calls
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlCall {
    CreateFramebuffer(FramebufferId),
    DeleteFramebuffer(FramebufferId),
    CreateRenderbuffer(RenderbufferId),
    DeleteRenderbuffer(RenderbufferId),
    BindFramebuffer(FramebufferId),
    BindRenderbuffer(RenderbufferId),
    BindTexture(TextureId),
    GenerateMipmap,
    AttachColorTexture(TextureId),
    RenderbufferStorage { format: DepthFormat, width: u32, height: u32 },
    AttachDepthRenderbuffer(RenderbufferId),
    Clear(ClearMask),
    Viewport { x: i32, y: i32, width: u32, height: u32 },
    Flush,
}

impl GlCall {
    /// Calls that change framebuffer attachments or renderbuffer storage
    pub fn is_attachment(&self) -> bool {
        matches!(
            self,
            GlCall::AttachColorTexture(_)
                | GlCall::AttachDepthRenderbuffer(_)
                | GlCall::RenderbufferStorage { .. }
                | GlCall::GenerateMipmap
        )
    }
}

// ============================================================================
// Name allocation
// ============================================================================

#[derive(Debug, Default)]
struct NameAllocator {
    next: u32,
    free: Vec<u32>,
}

impl NameAllocator {
    fn alloc(&mut self) -> u32 {
        self.free.pop().unwrap_or_else(|| {
            self.next += 1;
            self.next
        })
    }

    fn free(&mut self, name: u32) {
        self.free.push(name);
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ContextBindings {
    framebuffer: FramebufferId,
    renderbuffer: RenderbufferId,
    texture: TextureId,
}

// ============================================================================
// Mock Device
// ============================================================================

#[derive(Debug)]
pub struct MockDevice {
    pub capabilities: Capabilities,
    pub calls: Vec<GlCall>,
    pub fail_creation: bool,
    framebuffer_names: NameAllocator,
    renderbuffer_names: NameAllocator,
    live_framebuffers: FxHashSet<FramebufferId>,
    live_renderbuffers: FxHashSet<RenderbufferId>,
    active: Option<ContextKey>,
    bindings: FxHashMap<Option<ContextKey>, ContextBindings>,
    color_attachments: FxHashMap<FramebufferId, TextureId>,
    depth_attachments: FxHashMap<FramebufferId, RenderbufferId>,
    storage: FxHashMap<RenderbufferId, (DepthFormat, u32, u32)>,
}

impl MockDevice {
    /// Device with core framebuffer-object support
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::CORE_FRAMEBUFFER_OBJECT)
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            calls: Vec::new(),
            fail_creation: false,
            framebuffer_names: NameAllocator::default(),
            renderbuffer_names: NameAllocator::default(),
            live_framebuffers: FxHashSet::default(),
            live_renderbuffers: FxHashSet::default(),
            active: None,
            bindings: FxHashMap::default(),
            color_attachments: FxHashMap::default(),
            depth_attachments: FxHashMap::default(),
            storage: FxHashMap::default(),
        }
    }

    /// Switch the driver-side binding table to another context
    pub fn make_current(&mut self, context: ContextKey) {
        self.active = Some(context);
    }

    fn current_bindings(&mut self) -> &mut ContextBindings {
        self.bindings.entry(self.active).or_default()
    }

    /// Framebuffer bound in the active context, as the driver sees it
    pub fn bound_framebuffer(&self) -> FramebufferId {
        self.bindings.get(&self.active).map(|b| b.framebuffer).unwrap_or_default()
    }

    pub fn bound_renderbuffer(&self) -> RenderbufferId {
        self.bindings.get(&self.active).map(|b| b.renderbuffer).unwrap_or_default()
    }

    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|&call| predicate(call)).count()
    }

    pub fn framebuffer_binds(&self) -> usize {
        self.count(|c| matches!(c, GlCall::BindFramebuffer(_)))
    }

    pub fn renderbuffer_binds(&self) -> usize {
        self.count(|c| matches!(c, GlCall::BindRenderbuffer(_)))
    }

    pub fn depth_clears(&self) -> usize {
        self.count(|c| matches!(c, GlCall::Clear(mask) if mask.contains(ClearMask::DEPTH)))
    }

    pub fn attachment_calls(&self) -> usize {
        self.count(GlCall::is_attachment)
    }

    pub fn reset_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_live_framebuffer(&self, framebuffer: FramebufferId) -> bool {
        self.live_framebuffers.contains(&framebuffer)
    }

    pub fn is_live_renderbuffer(&self, renderbuffer: RenderbufferId) -> bool {
        self.live_renderbuffers.contains(&renderbuffer)
    }

    pub fn live_framebuffer_count(&self) -> usize {
        self.live_framebuffers.len()
    }

    pub fn color_attachment(&self, framebuffer: FramebufferId) -> Option<TextureId> {
        self.color_attachments.get(&framebuffer).copied()
    }

    pub fn depth_attachment(&self, framebuffer: FramebufferId) -> Option<RenderbufferId> {
        self.depth_attachments.get(&framebuffer).copied()
    }

    pub fn storage_of(&self, renderbuffer: RenderbufferId) -> Option<(DepthFormat, u32, u32)> {
        self.storage.get(&renderbuffer).copied()
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GlDevice for MockDevice {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        if self.fail_creation {
            offscreen_bail!("offscreen::mock", BackendError, "framebuffer creation disabled");
        }
        let framebuffer = FramebufferId(self.framebuffer_names.alloc());
        self.live_framebuffers.insert(framebuffer);
        self.calls.push(GlCall::CreateFramebuffer(framebuffer));
        Ok(framebuffer)
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.calls.push(GlCall::DeleteFramebuffer(framebuffer));
        if self.live_framebuffers.remove(&framebuffer) {
            self.framebuffer_names.free(framebuffer.0);
            self.color_attachments.remove(&framebuffer);
            self.depth_attachments.remove(&framebuffer);
            // Deleting a bound framebuffer reverts the binding to zero.
            let bindings = self.current_bindings();
            if bindings.framebuffer == framebuffer {
                bindings.framebuffer = FramebufferId::DEFAULT;
            }
        }
    }

    fn create_renderbuffer(&mut self) -> Result<RenderbufferId> {
        if self.fail_creation {
            offscreen_bail!("offscreen::mock", BackendError, "renderbuffer creation disabled");
        }
        let renderbuffer = RenderbufferId(self.renderbuffer_names.alloc());
        self.live_renderbuffers.insert(renderbuffer);
        self.calls.push(GlCall::CreateRenderbuffer(renderbuffer));
        Ok(renderbuffer)
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        self.calls.push(GlCall::DeleteRenderbuffer(renderbuffer));
        if self.live_renderbuffers.remove(&renderbuffer) {
            self.renderbuffer_names.free(renderbuffer.0);
            self.storage.remove(&renderbuffer);
            let bindings = self.current_bindings();
            if bindings.renderbuffer == renderbuffer {
                bindings.renderbuffer = RenderbufferId::NONE;
            }
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.calls.push(GlCall::BindFramebuffer(framebuffer));
        self.current_bindings().framebuffer = framebuffer;
    }

    fn bind_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        self.calls.push(GlCall::BindRenderbuffer(renderbuffer));
        self.current_bindings().renderbuffer = renderbuffer;
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.calls.push(GlCall::BindTexture(texture));
        self.current_bindings().texture = texture;
    }

    fn generate_mipmap(&mut self) {
        self.calls.push(GlCall::GenerateMipmap);
    }

    fn attach_color_texture(&mut self, texture: TextureId) {
        self.calls.push(GlCall::AttachColorTexture(texture));
        let framebuffer = self.bound_framebuffer();
        self.color_attachments.insert(framebuffer, texture);
    }

    fn renderbuffer_storage(&mut self, format: DepthFormat, width: u32, height: u32) {
        self.calls.push(GlCall::RenderbufferStorage { format, width, height });
        let renderbuffer = self.bound_renderbuffer();
        self.storage.insert(renderbuffer, (format, width, height));
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        self.calls.push(GlCall::AttachDepthRenderbuffer(renderbuffer));
        let framebuffer = self.bound_framebuffer();
        self.depth_attachments.insert(framebuffer, renderbuffer);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.calls.push(GlCall::Clear(mask));
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.calls.push(GlCall::Viewport { x, y, width, height });
    }

    fn flush(&mut self) {
        self.calls.push(GlCall::Flush);
    }
}

// ============================================================================
// Mock Image
// ============================================================================

#[derive(Debug)]
pub struct MockImage {
    pub size: UVec2,
    pub texture: TextureId,
    out_of_date: AtomicBool,
    texture_binds: AtomicU32,
}

impl MockImage {
    pub fn new(width: u32, height: u32, texture: u32) -> Arc<Self> {
        Arc::new(Self {
            size: UVec2::new(width, height),
            texture: TextureId(texture),
            out_of_date: AtomicBool::new(false),
            texture_binds: AtomicU32::new(0),
        })
    }

    pub fn is_out_of_date(&self) -> bool {
        self.out_of_date.load(Ordering::Relaxed)
    }

    pub fn texture_binds(&self) -> u32 {
        self.texture_binds.load(Ordering::Relaxed)
    }
}

impl TargetImage for MockImage {
    fn size(&self) -> UVec2 {
        self.size
    }

    fn texture(&self) -> TextureId {
        self.texture
    }

    fn bind_texture(&self, gl: &mut dyn GlDevice) {
        self.texture_binds.fetch_add(1, Ordering::Relaxed);
        gl.bind_texture(self.texture);
    }

    fn mark_out_of_date(&self) {
        self.out_of_date.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
