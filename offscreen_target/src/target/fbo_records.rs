/// Per-context framebuffer records of an image target
///
/// Framebuffer objects cannot be shared between contexts, so a target
/// keeps one record per context that has bound it. Removing a record
/// always goes through `FboRecord::release`, which deletes the GL object
/// only while its owning context is current; deleting it from any other
/// context would address an unrelated object.

use std::sync::Weak;

use rustc_hash::FxHashMap;

use crate::context::ContextKey;
use crate::device::{FramebufferId, GlDevice};
use crate::target::TargetImage;
use crate::{offscreen_debug, offscreen_warn};

pub(crate) struct FboRecord {
    /// Lazily created; DEFAULT until the first build
    pub framebuffer: FramebufferId,
    /// Image attached by the last build
    pub image: Option<Weak<dyn TargetImage>>,
    pub owner: ContextKey,
}

impl FboRecord {
    pub fn new(owner: ContextKey) -> Self {
        Self {
            framebuffer: FramebufferId::DEFAULT,
            image: None,
            owner,
        }
    }

    /// Whether the last build attached `image` (identity comparison)
    pub fn is_built_for(&self, image: &Weak<dyn TargetImage>) -> bool {
        match &self.image {
            Some(built) => Weak::ptr_eq(built, image),
            None => false,
        }
    }

    /// Delete the framebuffer if its owning context is current.
    ///
    /// Returns false when a live handle had to be left behind.
    pub fn release(self, gl: &mut dyn GlDevice, current: Option<ContextKey>) -> bool {
        if self.framebuffer.is_default() {
            return true;
        }
        if current == Some(self.owner) {
            gl.delete_framebuffer(self.framebuffer);
            offscreen_debug!("offscreen::FboRecords", "Deleted {} of context {:?}",
                self.framebuffer, self.owner);
            true
        } else {
            offscreen_warn!("offscreen::FboRecords",
                "Leaving {} behind: owning context {:?} is not current",
                self.framebuffer, self.owner);
            false
        }
    }
}

#[derive(Default)]
pub(crate) struct FboRecords {
    records: FxHashMap<ContextKey, FboRecord>,
}

impl FboRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, context: ContextKey) -> Option<&FboRecord> {
        self.records.get(&context)
    }

    /// Record for `context`, inserting an empty one if absent.
    ///
    /// The bool is true when the record was just created.
    pub fn get_or_insert(&mut self, context: ContextKey) -> (&mut FboRecord, bool) {
        let mut created = false;
        let record = self.records.entry(context).or_insert_with(|| {
            created = true;
            FboRecord::new(context)
        });
        (record, created)
    }

    pub fn contains(&self, context: ContextKey) -> bool {
        self.records.contains_key(&context)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Remove and release the record of `context`.
    ///
    /// Returns false if a framebuffer handle was leaked.
    pub fn remove(
        &mut self,
        gl: &mut dyn GlDevice,
        context: ContextKey,
        current: Option<ContextKey>,
    ) -> bool {
        match self.records.remove(&context) {
            Some(record) => record.release(gl, current),
            None => true,
        }
    }

    /// Remove and release every record.
    ///
    /// Returns the number of framebuffer handles left behind.
    pub fn clear(&mut self, gl: &mut dyn GlDevice, current: Option<ContextKey>) -> usize {
        self.records
            .drain()
            .map(|(_, record)| record.release(gl, current))
            .filter(|released| !released)
            .count()
    }
}

#[cfg(test)]
#[path = "fbo_records_tests.rs"]
mod tests;
