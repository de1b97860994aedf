use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::{
    behaviour::NetBehaviour, bytes::byte_reader::ByteReader, replication::ReplicationRuntime,
    types::MethodId,
};

/// Errors that can occur while populating the invoker registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Method id already present in the table
    #[error("Method id {method_id} is already registered. Each woven method registers exactly once at module load")]
    DuplicateMethodId {
        method_id: MethodId,
    },
}

/// One registered dispatch stub, looked up by stable method id when a
/// payload arrives.
pub trait InvokerDispatch: Send + Sync {
    fn method_id(&self) -> MethodId;

    /// Fixed dispatch signature: decode arguments from `reader`, call the
    /// original method on `instance`. Must not panic; failures go through
    /// the runtime error channel.
    fn dispatch(
        &self,
        instance: &mut dyn NetBehaviour,
        reader: &mut ByteReader,
        runtime: &dyn ReplicationRuntime,
    );
}

/// Method dispatch table, populated once at module load.
///
/// An unknown method id on receipt is the replication runtime's error to
/// report, so lookup returns `Option` rather than recording anything here.
#[derive(Default)]
pub struct InvokerRegistry {
    stubs: HashMap<MethodId, Box<dyn InvokerDispatch>>,
}

impl InvokerRegistry {
    pub fn new() -> Self {
        Self {
            stubs: HashMap::new(),
        }
    }

    pub fn register(&mut self, stub: Box<dyn InvokerDispatch>) -> Result<(), RegistryError> {
        let method_id = stub.method_id();
        if self.stubs.contains_key(&method_id) {
            return Err(RegistryError::DuplicateMethodId { method_id });
        }
        debug!("Registering invoker stub for method id {:#010x}", method_id);
        self.stubs.insert(method_id, stub);
        Ok(())
    }

    pub fn get(&self, method_id: MethodId) -> Option<&dyn InvokerDispatch> {
        self.stubs.get(&method_id).map(|stub| stub.as_ref())
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }
}
