use std::sync::Arc;

use log::warn;

use netweave_runtime::{
    DirtyMask, DispatchError, FieldIndex, NetBehaviour, PeerRole, ReplicationRuntime, WireValue,
};

use crate::resolve::SerializerPair;

/// The woven accessor pair for one synchronized field. Direct field
/// access elsewhere in the type is replaced by these.
///
/// Writes go through change detection and the dirty mask; reads are a
/// plain passthrough. The field's slot index doubles as its dirty bit.
#[derive(Clone)]
pub struct SyncVarAccessor {
    type_name: String,
    field_name: String,
    index: FieldIndex,
    hook: Option<String>,
    codec: Arc<SerializerPair>,
}

impl SyncVarAccessor {
    pub(crate) fn new(
        type_name: String,
        field_name: String,
        index: FieldIndex,
        hook: Option<String>,
        codec: Arc<SerializerPair>,
    ) -> Self {
        Self {
            type_name,
            field_name,
            index,
            hook,
            codec,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn index(&self) -> FieldIndex {
        self.index
    }

    pub fn hook(&self) -> Option<&str> {
        self.hook.as_deref()
    }

    /// The field's resolved codec, used by the replication flush to
    /// serialize dirty values.
    pub fn codec(&self) -> &Arc<SerializerPair> {
        &self.codec
    }

    /// Write accessor. Unchanged values set no bit and invoke no hook.
    /// On a receiving peer the hook runs after the field is updated, with
    /// the old and new values.
    pub fn set(
        &self,
        instance: &mut dyn NetBehaviour,
        value: WireValue,
        runtime: &dyn ReplicationRuntime,
    ) {
        let object_id = instance.object_id();
        let role = instance.role();

        {
            let state = instance.sync_state_mut();
            match state.field(self.index) {
                None => {
                    runtime.error(DispatchError::SyncSlotMissing {
                        object_id,
                        index: self.index,
                    });
                    return;
                }
                Some(current) if *current == value => return,
                Some(_) => {}
            }
        }

        let Some(old) = instance
            .sync_state_mut()
            .replace_field(self.index, value.clone())
        else {
            runtime.error(DispatchError::SyncSlotMissing {
                object_id,
                index: self.index,
            });
            return;
        };

        if let Err(err) = instance.sync_state_mut().mark_dirty(self.index) {
            // slot indices are validated against the mask capacity at weave time
            warn!(
                "Could not mark dirty bit {} of {}.{}: {}",
                self.index, self.type_name, self.field_name, err
            );
        }

        if role == PeerRole::Remote {
            if let Some(hook) = &self.hook {
                if let Err(cause) = instance.invoke(hook, vec![old, value]) {
                    runtime.error(DispatchError::InvokeFailed { object_id, cause });
                }
            }
        }
    }

    /// Read accessor: plain passthrough.
    pub fn get<'i>(&self, instance: &'i dyn NetBehaviour) -> Option<&'i WireValue> {
        instance.sync_state().field(self.index)
    }
}

/// Generated mask accessor: the replication runtime polls this at its
/// flush point.
pub fn dirty_mask(instance: &dyn NetBehaviour) -> DirtyMask {
    *instance.sync_state().mask()
}

/// Clears the mask once a flush has drained it.
pub fn clear_dirty_mask(instance: &mut dyn NetBehaviour) {
    instance.sync_state_mut().clear_mask();
}
