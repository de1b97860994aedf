use std::sync::Arc;

use log::warn;

use netweave_runtime::{
    ByteWriter, ChannelId, DispatchError, MethodId, NetBehaviour, PeerId, ReplicationRuntime,
    RuntimeWarning, WireValue,
};

use crate::ir::method_descriptor::RemoteKind;
use crate::resolve::SerializerPair;

/// The woven sending half of one remote-invocable method: checks the
/// kind's runtime precondition, encodes the arguments in declaration
/// order into one contiguous payload, and hands it to exactly one runtime
/// send entry.
///
/// A failed precondition is a silent no-op apart from one report on the
/// runtime warning channel.
#[derive(Clone)]
pub struct CallerForwarder {
    type_name: String,
    method_name: String,
    method_id: MethodId,
    kind: RemoteKind,
    channel: ChannelId,
    encoders: Vec<(String, Arc<SerializerPair>)>,
}

impl CallerForwarder {
    pub(crate) fn new(
        type_name: String,
        method_name: String,
        method_id: MethodId,
        kind: RemoteKind,
        channel: ChannelId,
        encoders: Vec<(String, Arc<SerializerPair>)>,
    ) -> Self {
        Self {
            type_name,
            method_name,
            method_id,
            kind,
            channel,
            encoders,
        }
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn method_id(&self) -> MethodId {
        self.method_id
    }

    pub fn kind(&self) -> RemoteKind {
        self.kind
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// `target` names the destination peer for target-kind methods and is
    /// ignored for the other kinds.
    pub fn call(
        &self,
        instance: &dyn NetBehaviour,
        args: &[WireValue],
        target: Option<PeerId>,
        runtime: &dyn ReplicationRuntime,
    ) {
        if !runtime.is_network_active(instance) {
            warn!(
                "Dropped {}.{}: object is not network-active",
                self.type_name, self.method_name
            );
            runtime.warning(RuntimeWarning::NotNetworkActive {
                object_id: instance.object_id(),
                method_id: self.method_id,
            });
            return;
        }

        if self.kind == RemoteKind::Command && !runtime.has_authority(instance) {
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

        let destination = if self.kind == RemoteKind::Target {
            match target {
                Some(peer) => Some(peer),
                None => {
                    warn!(
                        "Dropped {}.{}: no destination peer supplied",
                        self.type_name, self.method_name
                    );
                    runtime.warning(RuntimeWarning::MissingTarget {
                        object_id: instance.object_id(),
                        method_id: self.method_id,
                    });
                    return;
                }
            }
        } else {
            None
        };

        if args.len() != self.encoders.len() {
            runtime.error(DispatchError::ArityMismatch {
                object_id: instance.object_id(),
                method_id: self.method_id,
                expected: self.encoders.len(),
                found: args.len(),
            });
            return;
        }

        let mut writer = ByteWriter::new();
        for (index, ((_, codec), value)) in self.encoders.iter().zip(args).enumerate() {
            if let Err(cause) = codec.encode(value, &mut writer) {
                runtime.error(DispatchError::EncodeFailed {
                    object_id: instance.object_id(),
                    method_id: self.method_id,
                    index,
                    cause,
                });
                return;
            }
        }
        let payload = writer.to_bytes();

        let owner = instance.object_id();
        match (self.kind, destination) {
            (RemoteKind::Command, _) => {
                runtime.send_command(owner, self.method_id, payload, self.channel)
            }
            (RemoteKind::Broadcast, _) => {
                runtime.send_broadcast(owner, self.method_id, payload, self.channel)
            }
            (RemoteKind::Target, Some(peer)) => {
                runtime.send_to_target(peer, owner, self.method_id, payload, self.channel)
            }
            // destination was validated before encoding
            (RemoteKind::Target, None) => {}
        }
    }
}
