use serde::{Deserialize, Serialize};

use netweave_runtime::ChannelId;

use super::wire_type::WireType;

/// Declared invocation kind of a method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvocationKind {
    /// Remote-invocable, executed with authority on the owning side.
    Command,
    /// Remote-invocable, executed on all observing peers.
    Broadcast,
    /// Remote-invocable, executed on exactly one specified peer.
    Target,
    /// Not networked; left untouched by the weaver.
    #[default]
    Plain,
}

impl InvocationKind {
    pub fn is_remote(&self) -> bool {
        !matches!(self, InvocationKind::Plain)
    }

    /// Lowercase label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            InvocationKind::Command => "command",
            InvocationKind::Broadcast => "broadcast",
            InvocationKind::Target => "target",
            InvocationKind::Plain => "plain",
        }
    }

    /// The remote subset, for artifacts that never exist for plain methods.
    pub fn remote_kind(&self) -> Option<RemoteKind> {
        match self {
            InvocationKind::Command => Some(RemoteKind::Command),
            InvocationKind::Broadcast => Some(RemoteKind::Broadcast),
            InvocationKind::Target => Some(RemoteKind::Target),
            InvocationKind::Plain => None,
        }
    }
}

/// Invocation kind narrowed to the remote-invocable cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteKind {
    Command,
    Broadcast,
    Target,
}

/// One declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub ty: WireType,
    /// By-reference/owner passing in the source declaration. Never legal
    /// on a remote-invocable method: arguments cross the wire by value.
    #[serde(default)]
    pub by_ref: bool,
}

/// One declared method of a behaviour under transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    #[serde(default)]
    pub kind: InvocationKind,
    /// Opaque delivery class, forwarded to the runtime send entry.
    #[serde(default)]
    pub channel: ChannelId,
    #[serde(default)]
    pub is_static: bool,
}
