/*!
# Offscreen Target - OpenGL Backend

`GlDevice` implementation over a `glow::Context`.

Capabilities are detected once from the context's version and extension
strings; every other call is forwarded to the matching GL entry point.
*/

mod capabilities;
mod glow_device;

pub use capabilities::detect_capabilities;
pub use glow_device::GlowDevice;
