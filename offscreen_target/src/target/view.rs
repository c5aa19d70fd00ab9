/// View - the visible region of a render target
///
/// Size and center are expressed in the target's coordinate space, which
/// for image targets is the image's pixel grid.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    size: Vec2,
    center: Vec2,
}

impl View {
    pub fn new(size: Vec2, center: Vec2) -> Self {
        Self { size, center }
    }

    /// View covering `size` with its origin at the top-left corner
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size, size / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Top-left corner of the visible region
    pub fn origin(&self) -> Vec2 {
        self.center - self.size / 2.0
    }
}

impl Default for View {
    fn default() -> Self {
        Self::from_size(Vec2::ZERO)
    }
}
