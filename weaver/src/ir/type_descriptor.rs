use serde::{Deserialize, Serialize};

use super::{
    field_descriptor::FieldDescriptor, method_descriptor::MethodDescriptor, woven::WovenTypeRecord,
};

/// One compiled behaviour class under transformation.
///
/// Lives for the duration of one weave pass, owned by the module being
/// processed. Must transitively derive from the networked-behaviour root
/// type through the `base` chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Qualified name, unique within the module and its references.
    pub name: String,
    /// Single-inheritance parent, by name. The root of the chain names
    /// the networked-behaviour root type.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Generated-member records, filled in by the weave pass and present
    /// only in the rewritten module document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woven: Option<WovenTypeRecord>,
}

impl TypeDescriptor {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declared synchronized-field count, before validation.
    pub fn sync_field_count(&self) -> usize {
        self.fields.iter().filter(|field| field.synchronized).count()
    }
}
