use std::collections::{hash_map::Entry, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use netweave_runtime::{InvokerRegistry, MethodId, RegistryError};

use crate::caller::CallerForwarder;
use crate::classify::classify;
use crate::config::WeaveConfig;
use crate::diagnostics::Diagnostics;
use crate::invoker::InvokerStub;
use crate::ir::method_descriptor::MethodDescriptor;
use crate::ir::module::{Module, ModuleError};
use crate::ir::type_descriptor::TypeDescriptor;
use crate::ir::woven::{AccessorRecord, ForwarderRecord, InvokerRecord, WovenTypeRecord};
use crate::method_id::derive_method_id;
use crate::resolve::{SerializerPair, SerializerRegistry};
use crate::syncvar::SyncVarAccessor;

/// Name under which the generated mask accessor is recorded.
pub const MASK_ACCESSOR_NAME: &str = "dirty_mask";

/// Executable artifacts for one woven behaviour.
pub struct WovenType {
    pub type_name: String,
    pub invokers: Vec<InvokerStub>,
    pub forwarders: Vec<CallerForwarder>,
    pub accessors: Vec<SyncVarAccessor>,
    /// Synchronized-field slots on the whole chain through this type;
    /// hosts size the instance state with it.
    pub sync_field_count: usize,
}

impl WovenType {
    pub fn invoker(&self, method: &str) -> Option<&InvokerStub> {
        self.invokers.iter().find(|stub| stub.method_name() == method)
    }

    pub fn forwarder(&self, method: &str) -> Option<&CallerForwarder> {
        self.forwarders
            .iter()
            .find(|forwarder| forwarder.method_name() == method)
    }

    pub fn accessor(&self, field: &str) -> Option<&SyncVarAccessor> {
        self.accessors
            .iter()
            .find(|accessor| accessor.field_name() == field)
    }
}

/// The rewritten module document plus the executable artifacts realizing
/// its generated members.
pub struct WovenModule {
    module: Module,
    types: Vec<WovenType>,
}

impl WovenModule {
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn types(&self) -> &[WovenType] {
        &self.types
    }

    pub fn woven_type(&self, name: &str) -> Option<&WovenType> {
        self.types.iter().find(|ty| ty.type_name == name)
    }

    /// Populates the dispatch table; called once at module load.
    pub fn register(&self, registry: &mut InvokerRegistry) -> Result<(), RegistryError> {
        for ty in &self.types {
            for stub in &ty.invokers {
                registry.register(Box::new(stub.clone()))?;
            }
        }
        Ok(())
    }
}

/// Counters accumulated over one pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WeaveReport {
    pub types_woven: usize,
    pub methods_woven: usize,
    pub fields_woven: usize,
}

impl WeaveReport {
    pub fn summary(&self) {
        info!(
            "Weave complete: {} behaviour(s), {} remote method(s), {} synchronized field(s)",
            self.types_woven, self.methods_woven, self.fields_woven
        );
    }
}

/// Errors that can occur while committing a weave outcome
#[derive(Debug, Error)]
pub enum CommitError {
    /// Error diagnostics recorded; nothing is written
    #[error("Refusing to commit: {errors} error diagnostic(s) recorded. No module output is written")]
    ErrorsPresent {
        errors: usize,
    },

    /// The rewritten module could not be written out
    #[error(transparent)]
    Module(#[from] ModuleError),
}

/// Everything one weave pass produced: the (possibly partial) artifacts,
/// the full ordered diagnostics, and the counters.
///
/// Committing is all-or-nothing: with any error recorded, no module
/// output is ever written.
pub struct WeaveOutcome {
    pub woven: WovenModule,
    pub diagnostics: Diagnostics,
    pub report: WeaveReport,
}

impl WeaveOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn commit(&self, path: &Path) -> Result<(), CommitError> {
        if self.diagnostics.has_errors() {
            return Err(CommitError::ErrorsPresent {
                errors: self.diagnostics.error_count(),
            });
        }
        self.woven.module().save(path)?;
        Ok(())
    }

    pub fn register(&self, registry: &mut InvokerRegistry) -> Result<(), RegistryError> {
        self.woven.register(registry)
    }
}

/// One synchronous weave pass over a compiled module. Runs once per
/// build; either every artifact is produced or the recorded diagnostics
/// block the commit.
pub struct WeavePass {
    config: WeaveConfig,
}

impl WeavePass {
    pub fn new(mut config: WeaveConfig) -> Self {
        // the pass owns the configuration from here on
        let _ = config.try_lock();
        Self { config }
    }

    pub fn config(&self) -> &WeaveConfig {
        &self.config
    }

    /// Reference modules feed type resolution and base-chain lookup; only
    /// `module`'s behaviours are woven.
    pub fn run(&self, module: &Module, references: &[Module]) -> WeaveOutcome {
        let mut diagnostics = Diagnostics::new();
        let mut serializers = SerializerRegistry::new(
            &self.config,
            module
                .types
                .iter()
                .chain(references.iter().flat_map(|reference| reference.types.iter())),
        );

        let mut behaviours: HashMap<&str, &TypeDescriptor> = HashMap::new();
        for ty in references
            .iter()
            .flat_map(|reference| reference.behaviours.iter())
            .chain(module.behaviours.iter())
        {
            behaviours.insert(ty.name.as_str(), ty);
        }

        // Root-to-leaf: identifier derivation and dirty-bit assignment
        // never collide across a chain when ancestors are woven first.
        let mut ordered: Vec<(&TypeDescriptor, Vec<&TypeDescriptor>)> = Vec::new();
        for ty in &module.behaviours {
            match ancestor_chain(ty, &behaviours, &self.config.root_type) {
                Ok(ancestors) => ordered.push((ty, ancestors)),
                Err(message) => diagnostics.error(&ty.name, None, message),
            }
        }
        ordered.sort_by_key(|(_, ancestors)| ancestors.len());

        let mut rewritten = module.clone();
        let mut woven_types = Vec::with_capacity(ordered.len());
        let mut id_owners: HashMap<MethodId, String> = HashMap::new();
        let mut report = WeaveReport::default();

        for (ty, ancestors) in ordered {
            let base_sync_count: usize = ancestors
                .iter()
                .map(|ancestor| ancestor.sync_field_count())
                .sum();
            let classified = classify(ty, base_sync_count, &self.config, &mut diagnostics);

            let mut woven = WovenType {
                type_name: ty.name.clone(),
                invokers: Vec::new(),
                forwarders: Vec::new(),
                accessors: Vec::new(),
                sync_field_count: base_sync_count + ty.sync_field_count(),
            };
            let mut record = WovenTypeRecord {
                invokers: Vec::new(),
                forwarders: Vec::new(),
                accessors: Vec::new(),
                mask_accessor: MASK_ACCESSOR_NAME.to_string(),
            };

            for method in &classified.remote_methods {
                let Some(kind) = method.kind.remote_kind() else {
                    continue;
                };
                let Some(codecs) =
                    resolve_params(&ty.name, method, &mut serializers, &mut diagnostics)
                else {
                    continue;
                };

                let method_id = derive_method_id(&ty.name, &method.name);
                match id_owners.entry(method_id) {
                    Entry::Occupied(owner) => {
                        diagnostics.error(
                            &ty.name,
                            Some(&method.name),
                            format!(
                                "Method id {:#010x} collides with {}; remote method names must hash uniquely within a module",
                                method_id,
                                owner.get()
                            ),
                        );
                        continue;
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(format!("{}.{}", ty.name, method.name));
                    }
                }

                debug!(
                    "Weaving {} method {}.{} as {:#010x}",
                    method.kind.label(),
                    ty.name,
                    method.name,
                    method_id
                );
                woven.invokers.push(InvokerStub::new(
                    ty.name.clone(),
                    method.name.clone(),
                    method_id,
                    kind,
                    codecs.clone(),
                ));
                woven.forwarders.push(CallerForwarder::new(
                    ty.name.clone(),
                    method.name.clone(),
                    method_id,
                    kind,
                    method.channel,
                    codecs,
                ));
                record.invokers.push(InvokerRecord {
                    method: method.name.clone(),
                    method_id,
                    kind,
                });
                record.forwarders.push(ForwarderRecord {
                    method: method.name.clone(),
                    method_id,
                    kind,
                    channel: method.channel,
                });
                report.methods_woven += 1;
            }

            for field in &classified.sync_fields {
                match serializers.resolve(&field.descriptor.ty) {
                    Ok(codec) => {
                        woven.accessors.push(SyncVarAccessor::new(
                            ty.name.clone(),
                            field.descriptor.name.clone(),
                            field.index,
                            field.descriptor.hook.clone(),
                            codec,
                        ));
                        record.accessors.push(AccessorRecord {
                            field: field.descriptor.name.clone(),
                            index: field.index,
                            hook: field.descriptor.hook.clone(),
                        });
                        report.fields_woven += 1;
                    }
                    Err(err) => {
                        diagnostics.error(
                            &ty.name,
                            Some(&field.descriptor.name),
                            err.to_string(),
                        );
                    }
                }
            }

            if let Some(entry) = rewritten
                .behaviours
                .iter_mut()
                .find(|entry| entry.name == ty.name)
            {
                entry.woven = Some(record);
            }
            report.types_woven += 1;
            woven_types.push(woven);
        }

        WeaveOutcome {
            woven: WovenModule {
                module: rewritten,
                types: woven_types,
            },
            diagnostics,
            report,
        }
    }
}

/// Resolves every parameter codec, recording one diagnostic per failure.
/// `None` when any parameter is unresolvable: the method gets no artifacts
/// and the build will not commit.
fn resolve_params(
    type_name: &str,
    method: &MethodDescriptor,
    serializers: &mut SerializerRegistry,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<(String, Arc<SerializerPair>)>> {
    let mut codecs = Vec::with_capacity(method.params.len());
    let mut failed = false;
    for param in &method.params {
        match serializers.resolve(&param.ty) {
            Ok(codec) => codecs.push((param.name.clone(), codec)),
            Err(err) => {
                diagnostics.error(
                    type_name,
                    Some(&method.name),
                    format!("Parameter {}: {}", param.name, err),
                );
                failed = true;
            }
        }
    }
    (!failed).then_some(codecs)
}

/// Walks the base chain up to the networked-behaviour root. Returns the
/// ancestors in scope, root-first. The root type itself needs no chain.
fn ancestor_chain<'m>(
    ty: &TypeDescriptor,
    behaviours: &HashMap<&str, &'m TypeDescriptor>,
    root_type: &str,
) -> Result<Vec<&'m TypeDescriptor>, String> {
    if ty.name == root_type {
        return Ok(Vec::new());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(ty.name.as_str());
    let mut ancestors: Vec<&TypeDescriptor> = Vec::new();
    let mut current = ty.base.as_deref();

    loop {
        match current {
            None => {
                return Err(format!(
                    "Does not transitively derive from the networked-behaviour root type {}",
                    root_type
                ));
            }
            Some(name) if name == root_type => {
                ancestors.reverse();
                return Ok(ancestors);
            }
            Some(name) => {
                if !visited.insert(name) {
                    return Err(format!("Inheritance chain contains a cycle through {}", name));
                }
                let Some(parent) = behaviours.get(name).copied() else {
                    return Err(format!(
                        "Base type {} is not declared in the module or its references",
                        name
                    ));
                };
                ancestors.push(parent);
                current = parent.base.as_deref();
            }
        }
    }
}
