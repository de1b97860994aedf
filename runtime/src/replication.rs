use thiserror::Error;

use crate::{
    behaviour::{InvokeError, NetBehaviour},
    bytes::error::CodecError,
    types::{ChannelId, FieldIndex, MethodId, ObjectId, PeerId},
};

/// Non-fatal guard rejections woven code reports instead of sending or
/// dispatching. Reported once per rejected call; never an error return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeWarning {
    /// Command guard rejected: this peer lacks authority over the object
    #[error("Dropped command {method_id} on object {object_id}: no authority")]
    MissingAuthority {
        object_id: ObjectId,
        method_id: MethodId,
    },

    /// Caller guard rejected: the object is not network-active
    #[error("Dropped call {method_id} on object {object_id}: object is not network-active")]
    NotNetworkActive {
        object_id: ObjectId,
        method_id: MethodId,
    },

    /// Target-kind caller invoked without a destination peer
    #[error("Dropped targeted call {method_id} on object {object_id}: no destination peer supplied")]
    MissingTarget {
        object_id: ObjectId,
        method_id: MethodId,
    },
}

/// A failure caught at a woven artifact boundary and reported through the
/// runtime error channel. The dispatch loop continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// An argument failed to decode inside an invoker stub
    #[error("Failed to decode argument {index} of method {method_id} on object {object_id}: {cause}")]
    DecodeFailed {
        object_id: ObjectId,
        method_id: MethodId,
        index: usize,
        cause: CodecError,
    },

    /// An argument failed to encode inside a caller forwarder
    #[error("Failed to encode argument {index} of method {method_id} on object {object_id}: {cause}")]
    EncodeFailed {
        object_id: ObjectId,
        method_id: MethodId,
        index: usize,
        cause: CodecError,
    },

    /// A forwarder was handed the wrong number of arguments
    #[error("Method {method_id} on object {object_id} takes {expected} argument(s), got {found}")]
    ArityMismatch {
        object_id: ObjectId,
        method_id: MethodId,
        expected: usize,
        found: usize,
    },

    /// The original method (or a hook) ran and failed
    #[error("Method call on object {object_id} failed: {cause}")]
    InvokeFailed {
        object_id: ObjectId,
        cause: InvokeError,
    },

    /// A sync accessor addressed a field slot the instance never allocated
    #[error("Object {object_id} has no synchronized field slot {index}")]
    SyncSlotMissing {
        object_id: ObjectId,
        index: FieldIndex,
    },
}

/// The replication runtime collaborator: transport send entry points,
/// authority predicates, and the side-band channels woven code reports
/// through.
///
/// Send entries are one-way and fire-and-forget; delivery and ordering
/// guarantees are keyed by `channel` and belong to the implementor. All
/// methods may be called from whatever thread drives dispatch and must not
/// block.
pub trait ReplicationRuntime {
    fn send_command(&self, owner: ObjectId, method: MethodId, payload: Vec<u8>, channel: ChannelId);

    fn send_broadcast(&self, owner: ObjectId, method: MethodId, payload: Vec<u8>, channel: ChannelId);

    fn send_to_target(
        &self,
        target: PeerId,
        owner: ObjectId,
        method: MethodId,
        payload: Vec<u8>,
        channel: ChannelId,
    );

    /// Does the current process hold authority over the instance?
    fn has_authority(&self, instance: &dyn NetBehaviour) -> bool;

    /// Is the instance registered and live on the network?
    fn is_network_active(&self, instance: &dyn NetBehaviour) -> bool;

    /// Side-band warning channel for runtime guard rejections.
    fn warning(&self, warning: RuntimeWarning);

    /// Side-band error channel for failures caught at artifact boundaries.
    fn error(&self, error: DispatchError);
}
