//! # Netweave Weaver
//! Build-time weaver for networked behaviours: classifies declarative
//! annotations over a typed module IR and generates the serialization and
//! dispatch artifacts both ends of a connection rely on. The pass
//! aggregates diagnostics and commits all-or-nothing; malformed output is
//! never written.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod caller;
mod classify;
mod config;
mod diagnostics;
mod error;
mod invoker;
mod ir;
mod method_id;
mod resolve;
mod syncvar;
mod weave;

pub use caller::CallerForwarder;
pub use classify::{classify, ClassifiedType, SyncField};
pub use config::{ConfigError, WeaveConfig};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::WeaveError;
pub use invoker::InvokerStub;
pub use ir::{
    field_descriptor::FieldDescriptor,
    method_descriptor::{InvocationKind, MethodDescriptor, ParamDescriptor, RemoteKind},
    module::{MemberDescriptor, Module, ModuleError, NullPolicy, TypeDef, TypeShape},
    type_descriptor::TypeDescriptor,
    wire_type::WireType,
    woven::{AccessorRecord, ForwarderRecord, InvokerRecord, WovenTypeRecord},
};
pub use method_id::derive_method_id;
pub use resolve::{
    CustomDecodeFn, CustomEncodeFn, ResolveError, SerializerPair, SerializerRegistry,
};
pub use syncvar::{clear_dirty_mask, dirty_mask, SyncVarAccessor};
pub use weave::{
    CommitError, WeaveOutcome, WeavePass, WeaveReport, WovenModule, WovenType, MASK_ACCESSOR_NAME,
};
