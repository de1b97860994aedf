use thiserror::Error;

use crate::constants::SYNC_FIELD_CAPACITY;

/// Errors that can occur during dirty mask operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirtyMaskError {
    /// Bit index beyond the mask capacity
    #[error("Bit index {index} out of range (mask capacity is {capacity})")]
    BitOutOfRange {
        index: u8,
        capacity: u8,
    },
}

/// Per-instance bitmask marking which synchronized fields changed since
/// the last replication flush.
///
/// Single-writer: only the woven write accessors mutate it; the
/// replication runtime reads and clears it at its own flush point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyMask {
    bits: u64,
}

impl DirtyMask {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn set_bit(&mut self, index: u8) -> Result<(), DirtyMaskError> {
        if index >= SYNC_FIELD_CAPACITY {
            return Err(DirtyMaskError::BitOutOfRange {
                index,
                capacity: SYNC_FIELD_CAPACITY,
            });
        }
        self.bits |= 1u64 << index;
        Ok(())
    }

    pub fn bit(&self, index: u8) -> bool {
        index < SYNC_FIELD_CAPACITY && self.bits & (1u64 << index) != 0
    }

    pub fn or(&mut self, other: &DirtyMask) {
        self.bits |= other.bits;
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn is_clear(&self) -> bool {
        self.bits == 0
    }

    /// Raw bits, for the flush cycle's wire form.
    pub fn raw(&self) -> u64 {
        self.bits
    }
}
