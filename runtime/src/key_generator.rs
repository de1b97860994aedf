use std::marker::PhantomData;

use thiserror::Error;

/// Errors that can occur during key generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyGeneratorError {
    /// The key space ran out; generation saturates instead of wrapping
    #[error("Key space exhausted after {limit} keys. Identifiers saturate instead of silently wrapping around")]
    KeysExhausted {
        limit: u64,
    },
}

/// Hands out process-unique identifiers from an explicit injected counter.
///
/// Replaces ambient global counters: owners construct one and pass it where
/// identifiers are allocated. Exhaustion is a saturating error; an
/// identifier is never silently reused.
pub struct KeyGenerator<K: From<u64>> {
    next: u64,
    exhausted: bool,
    phantom: PhantomData<K>,
}

impl<K: From<u64>> KeyGenerator<K> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Resume allocation from a persisted counter value.
    pub fn starting_at(next: u64) -> Self {
        Self {
            next,
            exhausted: false,
            phantom: PhantomData,
        }
    }

    pub fn generate(&mut self) -> Result<K, KeyGeneratorError> {
        if self.exhausted {
            return Err(KeyGeneratorError::KeysExhausted { limit: u64::MAX });
        }
        let key = self.next;
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }
        Ok(K::from(key))
    }
}

impl<K: From<u64>> Default for KeyGenerator<K> {
    fn default() -> Self {
        Self::new()
    }
}
