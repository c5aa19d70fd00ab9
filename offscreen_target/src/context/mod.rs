//! Rendering contexts and their binding state
//!
//! FBOs are context-affine: a framebuffer name is only meaningful in the
//! context that created it. The registry enumerates live contexts and
//! tracks which one is current; each context carries the binding slots
//! used to skip redundant framebuffer/renderbuffer binds.

mod binding_state;
mod context_registry;

pub use binding_state::BindingSlots;
pub use context_registry::{ContextKey, ContextRegistry, CurrentContext};
