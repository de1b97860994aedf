use serde::{Deserialize, Serialize};

use netweave_runtime::{ChannelId, FieldIndex, MethodId};

use super::method_descriptor::RemoteKind;

/// Record of one generated invoker stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerRecord {
    pub method: String,
    pub method_id: MethodId,
    pub kind: RemoteKind,
}

/// Record of one generated caller forwarder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderRecord {
    pub method: String,
    pub method_id: MethodId,
    pub kind: RemoteKind,
    pub channel: ChannelId,
}

/// Record of one generated sync-field accessor pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorRecord {
    pub field: String,
    /// Chain-wide field slot; doubles as the dirty bit index.
    pub index: FieldIndex,
    pub hook: Option<String>,
}

/// The new members the weave pass added to one behaviour, embedded in the
/// rewritten module document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WovenTypeRecord {
    pub invokers: Vec<InvokerRecord>,
    pub forwarders: Vec<ForwarderRecord>,
    pub accessors: Vec<AccessorRecord>,
    /// Name of the generated dirty-mask accessor polled by the
    /// replication flush.
    pub mask_accessor: String,
}
