/// Framebuffer-object capability detection from GL version and extensions

use std::collections::HashSet;

use offscreen_target::offscreen::device::Capabilities;

pub const EXT_FRAMEBUFFER_OBJECT: &str = "GL_EXT_framebuffer_object";
pub const ARB_FRAMEBUFFER_OBJECT: &str = "GL_ARB_framebuffer_object";

/// Capabilities of a context from its version and extension list
///
/// FBOs are core in desktop GL 3.0 and in every OpenGL ES 2.0+ context.
pub fn detect_capabilities(
    major: u32,
    minor: u32,
    is_embedded: bool,
    extensions: &HashSet<String>,
) -> Capabilities {
    let mut capabilities = Capabilities::empty();

    if extensions.contains(EXT_FRAMEBUFFER_OBJECT) {
        capabilities |= Capabilities::EXT_FRAMEBUFFER_OBJECT;
    }
    if extensions.contains(ARB_FRAMEBUFFER_OBJECT) {
        capabilities |= Capabilities::ARB_FRAMEBUFFER_OBJECT;
    }

    let core = if is_embedded {
        major >= 2
    } else {
        (major, minor) >= (3, 0)
    };
    if core {
        capabilities |= Capabilities::CORE_FRAMEBUFFER_OBJECT;
    }

    capabilities
}
