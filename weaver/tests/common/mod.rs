#![allow(dead_code)]

//! Test doubles and module fixtures shared by the weaver integration
//! tests.

use std::sync::Mutex;

use netweave_runtime::{
    ChannelId, DispatchError, FieldIndex, InvokeError, MethodId, NetBehaviour, ObjectId, PeerId,
    PeerRole, ReplicationRuntime, RuntimeWarning, SyncState, WireValue,
};
use netweave_weaver::{
    FieldDescriptor, InvocationKind, MethodDescriptor, Module, ParamDescriptor, TypeDef,
    TypeDescriptor, WireType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendEntry {
    Command,
    Broadcast,
    Target,
}

/// One captured transport send.
#[derive(Debug, Clone, PartialEq)]
pub struct SentPayload {
    pub entry: SendEntry,
    pub target: Option<PeerId>,
    pub owner: ObjectId,
    pub method_id: MethodId,
    pub payload: Vec<u8>,
    pub channel: ChannelId,
}

/// Replication runtime double: records every send, warning and error.
pub struct MockRuntime {
    authority: bool,
    network_active: bool,
    sent: Mutex<Vec<SentPayload>>,
    warnings: Mutex<Vec<RuntimeWarning>>,
    errors: Mutex<Vec<DispatchError>>,
}

impl MockRuntime {
    pub fn new(authority: bool, network_active: bool) -> Self {
        Self {
            authority,
            network_active,
            sent: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SentPayload> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }

    pub fn warnings(&self) -> Vec<RuntimeWarning> {
        self.warnings.lock().expect("warnings lock poisoned").clone()
    }

    pub fn errors(&self) -> Vec<DispatchError> {
        self.errors.lock().expect("errors lock poisoned").clone()
    }
}

impl ReplicationRuntime for MockRuntime {
    fn send_command(&self, owner: ObjectId, method: MethodId, payload: Vec<u8>, channel: ChannelId) {
        self.sent.lock().expect("sent lock poisoned").push(SentPayload {
            entry: SendEntry::Command,
            target: None,
            owner,
            method_id: method,
            payload,
            channel,
        });
    }

    fn send_broadcast(
        &self,
        owner: ObjectId,
        method: MethodId,
        payload: Vec<u8>,
        channel: ChannelId,
    ) {
        self.sent.lock().expect("sent lock poisoned").push(SentPayload {
            entry: SendEntry::Broadcast,
            target: None,
            owner,
            method_id: method,
            payload,
            channel,
        });
    }

    fn send_to_target(
        &self,
        target: PeerId,
        owner: ObjectId,
        method: MethodId,
        payload: Vec<u8>,
        channel: ChannelId,
    ) {
        self.sent.lock().expect("sent lock poisoned").push(SentPayload {
            entry: SendEntry::Target,
            target: Some(target),
            owner,
            method_id: method,
            payload,
            channel,
        });
    }

    fn has_authority(&self, _instance: &dyn NetBehaviour) -> bool {
        self.authority
    }

    fn is_network_active(&self, _instance: &dyn NetBehaviour) -> bool {
        self.network_active
    }

    fn warning(&self, warning: RuntimeWarning) {
        self.warnings
            .lock()
            .expect("warnings lock poisoned")
            .push(warning);
    }

    fn error(&self, error: DispatchError) {
        self.errors.lock().expect("errors lock poisoned").push(error);
    }
}

/// Behaviour double: records original-method invocations. When
/// `snapshot_field` is set, the named slot's value at invoke time is
/// captured too, which lets tests observe hook ordering.
pub struct MockBehaviour {
    object_id: ObjectId,
    role: PeerRole,
    state: SyncState,
    pub calls: Vec<(String, Vec<WireValue>)>,
    pub failing_methods: Vec<String>,
    pub snapshot_field: Option<FieldIndex>,
    pub snapshots: Vec<WireValue>,
}

impl MockBehaviour {
    pub fn new(object_id: ObjectId, role: PeerRole, initial_fields: Vec<WireValue>) -> Self {
        Self {
            object_id,
            role,
            state: SyncState::new(initial_fields),
            calls: Vec::new(),
            failing_methods: Vec::new(),
            snapshot_field: None,
            snapshots: Vec::new(),
        }
    }

    pub fn with_failing_method(mut self, method: &str) -> Self {
        self.failing_methods.push(method.to_string());
        self
    }
}

impl NetBehaviour for MockBehaviour {
    fn object_id(&self) -> ObjectId {
        self.object_id
    }

    fn role(&self) -> PeerRole {
        self.role
    }

    fn sync_state(&self) -> &SyncState {
        &self.state
    }

    fn sync_state_mut(&mut self) -> &mut SyncState {
        &mut self.state
    }

    fn invoke(&mut self, method: &str, args: Vec<WireValue>) -> Result<(), InvokeError> {
        if self.failing_methods.iter().any(|name| name == method) {
            return Err(InvokeError::MethodFailed {
                method: method.to_string(),
                reason: "forced failure".to_string(),
            });
        }
        if let Some(index) = self.snapshot_field {
            if let Some(value) = self.state.field(index) {
                self.snapshots.push(value.clone());
            }
        }
        self.calls.push((method.to_string(), args));
        Ok(())
    }
}

// Fixture builders

pub fn param(name: &str, ty: WireType) -> ParamDescriptor {
    ParamDescriptor {
        name: name.to_string(),
        ty,
        by_ref: false,
    }
}

pub fn method(
    name: &str,
    kind: InvocationKind,
    channel: ChannelId,
    params: Vec<ParamDescriptor>,
) -> MethodDescriptor {
    MethodDescriptor {
        name: name.to_string(),
        params,
        kind,
        channel,
        is_static: false,
    }
}

pub fn plain_method(name: &str, params: Vec<ParamDescriptor>) -> MethodDescriptor {
    method(name, InvocationKind::Plain, 0, params)
}

pub fn field(name: &str, ty: WireType) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        ty,
        synchronized: false,
        hook: None,
    }
}

pub fn sync_field(name: &str, ty: WireType, hook: Option<&str>) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        ty,
        synchronized: true,
        hook: hook.map(str::to_string),
    }
}

pub fn behaviour(
    name: &str,
    base: Option<&str>,
    methods: Vec<MethodDescriptor>,
    fields: Vec<FieldDescriptor>,
) -> TypeDescriptor {
    TypeDescriptor {
        name: name.to_string(),
        base: base.map(str::to_string),
        methods,
        fields,
        woven: None,
    }
}

pub fn module(name: &str, behaviours: Vec<TypeDescriptor>, types: Vec<TypeDef>) -> Module {
    Module {
        name: name.to_string(),
        behaviours,
        types,
    }
}

/// The standard fixture: one behaviour with a command, a broadcast, a
/// targeted notification, a hook and two synchronized fields.
pub fn player_module() -> Module {
    module(
        "game",
        vec![behaviour(
            "Player",
            Some("NetBehaviour"),
            vec![
                method(
                    "cmd_move",
                    InvocationKind::Command,
                    1,
                    vec![param("dx", WireType::I32), param("dy", WireType::I32)],
                ),
                method(
                    "rpc_celebrate",
                    InvocationKind::Broadcast,
                    0,
                    vec![param("style", WireType::U8)],
                ),
                method(
                    "target_whisper",
                    InvocationKind::Target,
                    2,
                    vec![param("text", WireType::Str)],
                ),
                plain_method(
                    "on_health_changed",
                    vec![param("old", WireType::I32), param("new", WireType::I32)],
                ),
            ],
            vec![
                sync_field("health", WireType::I32, Some("on_health_changed")),
                sync_field("name", WireType::Str, None),
                field("score", WireType::U32),
            ],
        )],
        Vec::new(),
    )
}
