/// Configuration for image targets

use crate::device::DepthFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTargetConfig {
    /// Internal format of the shared depth renderbuffer
    pub depth_format: DepthFormat,

    /// Regenerate the image's mipmap chain whenever a framebuffer is built
    pub generate_mipmaps: bool,
}

impl Default for ImageTargetConfig {
    fn default() -> Self {
        Self {
            depth_format: DepthFormat::Component,
            generate_mipmaps: true,
        }
    }
}
