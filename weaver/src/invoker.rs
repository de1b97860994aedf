use std::sync::Arc;

use log::warn;

use netweave_runtime::{
    ByteReader, DispatchError, InvokerDispatch, MethodId, NetBehaviour, ReplicationRuntime,
    RuntimeWarning,
};

use crate::ir::method_descriptor::RemoteKind;
use crate::resolve::SerializerPair;

/// A static dispatch stub for one remote-invocable method, registered
/// under its stable method id and looked up by the replication runtime
/// when a payload arrives.
///
/// Decoders are stored in parameter declaration order; the matching
/// caller forwarder encodes in the same order. That symmetry is the wire
/// contract.
#[derive(Clone)]
pub struct InvokerStub {
    type_name: String,
    method_name: String,
    method_id: MethodId,
    kind: RemoteKind,
    decoders: Vec<(String, Arc<SerializerPair>)>,
}

impl InvokerStub {
    pub(crate) fn new(
        type_name: String,
        method_name: String,
        method_id: MethodId,
        kind: RemoteKind,
        decoders: Vec<(String, Arc<SerializerPair>)>,
    ) -> Self {
        Self {
            type_name,
            method_name,
            method_id,
            kind,
            decoders,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn kind(&self) -> RemoteKind {
        self.kind
    }
}

impl InvokerDispatch for InvokerStub {
    fn method_id(&self) -> MethodId {
        self.method_id
    }

    /// Nothing escapes the stub boundary: guard rejections go to the
    /// warning channel, decode and callee failures to the error channel,
    /// and the dispatch loop continues either way.
    fn dispatch(
        &self,
        instance: &mut dyn NetBehaviour,
        reader: &mut ByteReader,
        runtime: &dyn ReplicationRuntime,
    ) {
        if self.kind == RemoteKind::Command && !runtime.has_authority(&*instance) {
            warn!(
                "Dropped command {}.{}: no authority here",
                self.type_name, self.method_name
            );
            runtime.warning(RuntimeWarning::MissingAuthority {
                object_id: instance.object_id(),
                method_id: self.method_id,
            });
            return;
        }

        let mut args = Vec::with_capacity(self.decoders.len());
        for (index, (_, codec)) in self.decoders.iter().enumerate() {
            match codec.decode(reader) {
                Ok(value) => args.push(value),
                Err(cause) => {
                    runtime.error(DispatchError::DecodeFailed {
                        object_id: instance.object_id(),
                        method_id: self.method_id,
                        index,
                        cause,
                    });
                    return;
                }
            }
        }

        if let Err(cause) = instance.invoke(&self.method_name, args) {
            runtime.error(DispatchError::InvokeFailed {
                object_id: instance.object_id(),
                cause,
            });
        }
    }
}
