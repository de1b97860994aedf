/// Identifies a networked object instance, shared by every peer observing it.
pub type ObjectId = u64;

/// Identifies one connected remote peer.
pub type PeerId = u64;

/// Stable identifier for a woven remote-invocable method.
///
/// Derived deterministically at weave time so both ends of a connection
/// compute the same id without exchanging a schema.
pub type MethodId = u32;

/// Opaque delivery-class identifier. Forwarded to the transport untouched.
pub type ChannelId = u8;

/// Index of a synchronized field within an instance's chain-ordered state.
pub type FieldIndex = u8;

/// Which side of the replication relationship this process holds for an
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerRole {
    /// This process owns the authoritative copy.
    Authority,
    /// This process holds a replicated copy, receiving updates.
    Remote,
}
