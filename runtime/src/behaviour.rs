use thiserror::Error;

use crate::{
    bytes::value::WireValue,
    dirty_mask::{DirtyMask, DirtyMaskError},
    types::{FieldIndex, ObjectId, PeerRole},
};

/// Errors surfaced by a behaviour's original-method entry point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The named method is not implemented on this behaviour
    #[error("Method {method} is not implemented on this behaviour")]
    UnknownMethod {
        method: String,
    },

    /// The method ran and failed
    #[error("Method {method} failed: {reason}")]
    MethodFailed {
        method: String,
        reason: String,
    },
}

/// Per-instance synchronized state the woven accessors operate on: one
/// slot per synchronized field in chain order, plus the dirty mask.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    fields: Vec<WireValue>,
    mask: DirtyMask,
}

impl SyncState {
    /// `initial` holds one value per synchronized field, ordered
    /// root-to-leaf along the behaviour chain.
    pub fn new(initial: Vec<WireValue>) -> Self {
        Self {
            fields: initial,
            mask: DirtyMask::new(),
        }
    }

    pub fn field(&self, index: FieldIndex) -> Option<&WireValue> {
        self.fields.get(index as usize)
    }

    /// Swaps in a new value, returning the previous one. `None` if the
    /// slot was never allocated.
    pub fn replace_field(&mut self, index: FieldIndex, value: WireValue) -> Option<WireValue> {
        let slot = self.fields.get_mut(index as usize)?;
        Some(std::mem::replace(slot, value))
    }

    pub fn mark_dirty(&mut self, index: FieldIndex) -> Result<(), DirtyMaskError> {
        self.mask.set_bit(index)
    }

    pub fn mask(&self) -> &DirtyMask {
        &self.mask
    }

    /// Called by the replication runtime after a flush.
    pub fn clear_mask(&mut self) {
        self.mask.clear();
    }
}

/// A live networked object instance: the surface woven artifacts need
/// from the host object model.
///
/// `invoke` is the entry to the original user-written methods (and hook
/// callbacks); stubs call it with arguments decoded in declaration order.
pub trait NetBehaviour {
    fn object_id(&self) -> ObjectId;

    fn role(&self) -> PeerRole;

    fn sync_state(&self) -> &SyncState;

    fn sync_state_mut(&mut self) -> &mut SyncState;

    fn invoke(&mut self, method: &str, args: Vec<WireValue>) -> Result<(), InvokeError>;
}
