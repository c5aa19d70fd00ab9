//! Render target module
//!
//! `ImageTarget` renders into a shared image from any number of
//! contexts. Each context gets its own framebuffer object, built lazily
//! and rebuilt when the shared image changes; the depth renderbuffer is
//! shared by name across contexts.

mod config;
mod fbo_records;
mod image;
mod image_target;
mod render_target;
mod view;

pub use config::ImageTargetConfig;
pub use image::TargetImage;
pub use image_target::ImageTarget;
pub use render_target::{ContextFactory, Drawable, RenderTarget};
pub use view::View;
