/*!
# Offscreen Target

Render-to-texture targets usable from several rendering contexts at once.

A single logical target (one color image and one depth renderbuffer) is
shared by every context, but framebuffer objects are context-affine and
cannot be. This crate keeps a per-context cache of framebuffer objects
consistent with the shared target: built lazily, rebuilt when the image is
swapped, and invalidated when a context or the depth buffer goes away.

## Architecture

- **GlDevice**: the GL entry points used, implemented by backends
- **ContextRegistry**: live contexts and the current one
- **BindingSlots**: per-context cache eliding redundant binds
- **ImageTarget**: the shared target and its per-context framebuffers
- **TargetImage**: the externally owned image rendered into
*/

// Internal modules
pub mod error;
pub mod log;
pub mod context;
pub mod device;
pub mod target;

// Main namespace module
pub mod offscreen {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and logger control, macros stay at crate root)
    pub mod log {
        pub use crate::log::{
            log, reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger,
        };
    }

    // Contexts and binding state
    pub mod context {
        pub use crate::context::*;
    }

    // GPU device seam
    pub mod device {
        pub use crate::device::*;
    }

    // Targets
    pub mod target {
        pub use crate::target::*;
    }

    pub use crate::target::ImageTarget;
}

// Re-export math library at crate root
pub use glam;
