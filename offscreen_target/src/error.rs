//! Error types for offscreen targets
//!
//! Covers missing framebuffer-object support, unresolved context lookups
//! and object creation failures reported by the backend.

use std::fmt;

/// Result type for offscreen target operations
pub type Result<T> = std::result::Result<T, Error>;

/// Offscreen target errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The GPU does not support framebuffer objects
    CapabilityUnavailable(String),

    /// An operation needed an active context and none is current
    NoCurrentContext,

    /// A context key does not name a live context
    InvalidContext(String),

    /// Backend-specific error (object creation failed, etc.)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapabilityUnavailable(msg) => write!(f, "Capability unavailable: {}", msg),
            Error::NoCurrentContext => write!(f, "No current context"),
            Error::InvalidContext(msg) => write!(f, "Invalid context: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error with file:line and return it from the enclosing function
///
/// # Example
///
/// ```ignore
/// offscreen_bail!("offscreen::ImageTarget", CapabilityUnavailable,
///     "framebuffer objects are not supported");
/// ```
#[macro_export]
macro_rules! offscreen_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::offscreen_error!($source, "{}", message);
        return Err($crate::error::Error::$variant(message));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
