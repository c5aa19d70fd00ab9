/// Typed GL object names
///
/// GL names are plain `u32`s where zero means "no object" (or the default
/// framebuffer). The newtypes keep framebuffer, renderbuffer and texture
/// names from being mixed up.

use std::fmt;

/// Framebuffer object name (0 = default framebuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FramebufferId(pub u32);

impl FramebufferId {
    /// The window-system provided framebuffer
    pub const DEFAULT: Self = Self(0);

    /// Whether this names the default framebuffer
    pub fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// Renderbuffer name (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RenderbufferId(pub u32);

impl RenderbufferId {
    pub const NONE: Self = Self(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Texture name (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl fmt::Display for FramebufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fbo#{}", self.0)
    }
}

impl fmt::Display for RenderbufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rbo#{}", self.0)
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}
