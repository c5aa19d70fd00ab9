/// Registry of live rendering contexts
///
/// Contexts are identified by an opaque `ContextKey`. Keys compare by
/// identity: a destroyed context's key never matches a context created
/// later, even if the underlying slot is reused.

use slotmap::{new_key_type, SlotMap};

use crate::context::BindingSlots;
use crate::error::{Error, Result};
use crate::{offscreen_bail, offscreen_debug, offscreen_error};

new_key_type! {
    /// Identity of a rendering context
    pub struct ContextKey;
}

/// Live contexts and the one currently active on this thread
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: SlotMap<ContextKey, BindingSlots>,
    current: Option<ContextKey>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self {
            contexts: SlotMap::with_key(),
            current: None,
        }
    }

    /// Register a new context with empty binding slots
    pub fn create_context(&mut self) -> ContextKey {
        let key = self.contexts.insert(BindingSlots::default());
        offscreen_debug!("offscreen::ContextRegistry", "Created context {:?}", key);
        key
    }

    /// Remove a context. If it was current, no context is current afterwards.
    ///
    /// Returns false if the key was not live.
    pub fn destroy_context(&mut self, key: ContextKey) -> bool {
        if self.current == Some(key) {
            self.current = None;
        }
        let removed = self.contexts.remove(key).is_some();
        if removed {
            offscreen_debug!("offscreen::ContextRegistry", "Destroyed context {:?}", key);
        }
        removed
    }

    /// Make `key` the active context
    ///
    /// # Errors
    ///
    /// Returns `InvalidContext` if `key` does not name a live context.
    pub fn make_current(&mut self, key: ContextKey) -> Result<()> {
        if !self.contexts.contains_key(key) {
            offscreen_bail!("offscreen::ContextRegistry", InvalidContext,
                "context {:?} is not live", key);
        }
        self.current = Some(key);
        Ok(())
    }

    /// Leave no context active
    pub fn release_current(&mut self) {
        self.current = None;
    }

    /// Key of the active context, if any
    pub fn current(&self) -> Option<ContextKey> {
        self.current
    }

    /// Borrow the active context for a bind/build sequence
    pub fn current_mut(&mut self) -> Option<CurrentContext<'_>> {
        let key = self.current?;
        let slots = self.contexts.get_mut(key)?;
        Some(CurrentContext { key, slots })
    }

    /// Like `current_mut`, failing with `NoCurrentContext` when nothing is active
    pub fn require_current(&mut self) -> Result<CurrentContext<'_>> {
        if self.current.is_none() {
            offscreen_error!("offscreen::ContextRegistry", "No context is current");
        }
        self.current_mut().ok_or(Error::NoCurrentContext)
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.contexts.contains_key(key)
    }

    pub fn slots(&self, key: ContextKey) -> Option<&BindingSlots> {
        self.contexts.get(key)
    }

    pub fn slots_mut(&mut self, key: ContextKey) -> Option<&mut BindingSlots> {
        self.contexts.get_mut(key)
    }

    /// All live contexts with their binding slots
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ContextKey, &mut BindingSlots)> {
        self.contexts.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = ContextKey> + '_ {
        self.contexts.keys()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// The active context, resolved once by the caller and threaded through
/// bind/build calls
#[derive(Debug)]
pub struct CurrentContext<'a> {
    key: ContextKey,
    slots: &'a mut BindingSlots,
}

impl<'a> CurrentContext<'a> {
    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn slots(&mut self) -> &mut BindingSlots {
        &mut *self.slots
    }
}

#[cfg(test)]
#[path = "context_registry_tests.rs"]
mod tests;
