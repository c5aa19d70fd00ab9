/// Device module - the GL entry points the offscreen targets issue

pub mod handles;
pub mod gl_device;
#[cfg(test)]
pub mod mock_device;

pub use handles::*;
pub use gl_device::*;
