//! Pending forward-jump relocations.
//!
//! A jump instruction reserves a 4-byte address field when it is emitted.
//! The table maps the jump's handle to that field's byte offset until the
//! builder binds it, at which point the entry is consumed.

use std::collections::BTreeMap;

use cscn_types::JumpId;

/// Jumps still waiting for their landing address.
#[derive(Debug, Clone, Default)]
pub struct RelocationTable {
    pending: BTreeMap<JumpId, u64>,
}

impl RelocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the placeholder offset of a freshly emitted jump.
    pub fn reserve(&mut self, id: JumpId, placeholder: u64) {
        self.pending.insert(id, placeholder);
    }

    /// Remove and return the placeholder offset for `id`, if still pending.
    pub fn take(&mut self, id: JumpId) -> Option<u64> {
        self.pending.remove(&id)
    }

    pub fn placeholder(&self, id: JumpId) -> Option<u64> {
        self.pending.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Every unbound jump, in ascending id order.
    pub fn unresolved(&self) -> Vec<JumpId> {
        self.pending.keys().copied().collect()
    }
}
