/// TargetImage trait - the image an ImageTarget renders into
///
/// Images are owned elsewhere; targets only keep weak references and
/// compare them by identity.

use glam::UVec2;

use crate::device::{GlDevice, TextureId};

pub trait TargetImage: Send + Sync {
    /// Size in pixels
    fn size(&self) -> UVec2;

    /// Underlying 2D texture
    fn texture(&self) -> TextureId;

    /// Bind the texture to `GL_TEXTURE_2D`
    fn bind_texture(&self, gl: &mut dyn GlDevice) {
        gl.bind_texture(self.texture());
    }

    /// Flag the CPU-side copy as stale after the GPU rendered into it
    fn mark_out_of_date(&self);
}
