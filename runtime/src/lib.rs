//! # Netweave Runtime
//! The fixed contract between woven dispatch artifacts and the hosting
//! replication runtime: byte codec layer, dynamic value model, dirty
//! masks, behaviour traits and the invoker registry.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod behaviour;
mod bytes;
mod constants;
mod dirty_mask;
mod key_generator;
mod registry;
mod replication;
mod types;

pub use behaviour::{InvokeError, NetBehaviour, SyncState};
pub use bytes::{
    byte_reader::ByteReader, byte_writer::ByteWriter, error::CodecError, value::WireValue,
};
pub use constants::SYNC_FIELD_CAPACITY;
pub use dirty_mask::{DirtyMask, DirtyMaskError};
pub use key_generator::{KeyGenerator, KeyGeneratorError};
pub use registry::{InvokerDispatch, InvokerRegistry, RegistryError};
pub use replication::{DispatchError, ReplicationRuntime, RuntimeWarning};
pub use types::{ChannelId, FieldIndex, MethodId, ObjectId, PeerId, PeerRole};
