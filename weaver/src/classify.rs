use log::debug;

use netweave_runtime::{FieldIndex, SYNC_FIELD_CAPACITY};

use crate::config::WeaveConfig;
use crate::diagnostics::Diagnostics;
use crate::ir::field_descriptor::FieldDescriptor;
use crate::ir::method_descriptor::MethodDescriptor;
use crate::ir::type_descriptor::TypeDescriptor;

/// A synchronized field with its assigned chain-wide slot. The slot
/// doubles as the dirty bit index.
#[derive(Debug, Clone)]
pub struct SyncField {
    pub descriptor: FieldDescriptor,
    pub index: FieldIndex,
}

/// One behaviour partitioned by the classifier: remote-invocable methods
/// (tagged with kind and channel in their descriptors), synchronized
/// fields (tagged with dirty bit and hook), and everything else untouched.
#[derive(Debug, Clone)]
pub struct ClassifiedType {
    pub type_name: String,
    pub remote_methods: Vec<MethodDescriptor>,
    pub sync_fields: Vec<SyncField>,
    pub plain_methods: Vec<MethodDescriptor>,
    pub plain_fields: Vec<FieldDescriptor>,
}

/// Partitions one behaviour's members and validates every networked
/// declaration. Violations are recorded as error diagnostics and the
/// offending member is excluded from generation; the pass itself always
/// continues so one build surfaces every problem.
///
/// `base_sync_count` is the number of synchronized fields declared by
/// ancestors in the chain; dirty bits continue from there.
pub fn classify(
    ty: &TypeDescriptor,
    base_sync_count: usize,
    config: &WeaveConfig,
    diagnostics: &mut Diagnostics,
) -> ClassifiedType {
    let mut classified = ClassifiedType {
        type_name: ty.name.clone(),
        remote_methods: Vec::new(),
        sync_fields: Vec::new(),
        plain_methods: Vec::new(),
        plain_fields: Vec::new(),
    };

    for method in &ty.methods {
        if !method.kind.is_remote() {
            classified.plain_methods.push(method.clone());
            continue;
        }
        if validate_remote_method(ty, method, config, diagnostics) {
            classified.remote_methods.push(method.clone());
        }
    }

    let mut next_index = base_sync_count;
    for field in &ty.fields {
        if !field.synchronized {
            classified.plain_fields.push(field.clone());
            continue;
        }
        let index = next_index;
        next_index += 1;

        let mut valid = validate_hook(ty, field, diagnostics);

        if index >= SYNC_FIELD_CAPACITY as usize {
            diagnostics.error(
                &ty.name,
                Some(&field.name),
                format!(
                    "Synchronized field capacity of {} exceeded for this behaviour chain",
                    SYNC_FIELD_CAPACITY
                ),
            );
            valid = false;
        }

        if valid {
            classified.sync_fields.push(SyncField {
                descriptor: field.clone(),
                index: index as FieldIndex,
            });
        }
    }

    debug!(
        "Classified {}: {} remote method(s), {} synchronized field(s)",
        ty.name,
        classified.remote_methods.len(),
        classified.sync_fields.len()
    );

    classified
}

fn validate_remote_method(
    ty: &TypeDescriptor,
    method: &MethodDescriptor,
    config: &WeaveConfig,
    diagnostics: &mut Diagnostics,
) -> bool {
    let mut valid = true;

    if let Some(prefix) = config.prefix_for(method.kind) {
        if !method.name.starts_with(prefix) {
            diagnostics.error(
                &ty.name,
                Some(&method.name),
                format!(
                    "{} method name must start with \"{}\"",
                    method.kind.label(),
                    prefix
                ),
            );
            valid = false;
        }
    }

    if method.is_static {
        diagnostics.error(
            &ty.name,
            Some(&method.name),
            format!(
                "{} method cannot be static; remote invocation targets an instance",
                method.kind.label()
            ),
        );
        valid = false;
    }

    for param in &method.params {
        if param.by_ref {
            diagnostics.error(
                &ty.name,
                Some(&method.name),
                format!(
                    "Parameter {} is passed by reference; remote arguments always cross the wire by value",
                    param.name
                ),
            );
            valid = false;
        }
    }

    valid
}

fn validate_hook(
    ty: &TypeDescriptor,
    field: &FieldDescriptor,
    diagnostics: &mut Diagnostics,
) -> bool {
    let Some(hook_name) = &field.hook else {
        return true;
    };

    let Some(hook) = ty.method(hook_name) else {
        diagnostics.error(
            &ty.name,
            Some(&field.name),
            format!("Hook {} does not exist on this behaviour", hook_name),
        );
        return false;
    };

    let mut valid = true;

    if hook.is_static {
        diagnostics.error(
            &ty.name,
            Some(&field.name),
            format!("Hook {} must be an instance method", hook_name),
        );
        valid = false;
    }

    let signature_matches = hook.params.len() == 2
        && hook.params.iter().all(|param| param.ty == field.ty);
    if !signature_matches {
        diagnostics.error(
            &ty.name,
            Some(&field.name),
            format!(
                "Hook {} must take (old, new) parameters of type {}",
                hook_name, field.ty
            ),
        );
        valid = false;
    }

    valid
}
