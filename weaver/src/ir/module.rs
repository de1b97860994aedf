use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{type_descriptor::TypeDescriptor, wire_type::WireType};

/// Errors that can occur while loading or saving a module document
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Module file could not be read
    #[error("Failed to read module file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Module file is not a valid module document
    #[error("Failed to parse module file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// Rewritten module could not be written
    #[error("Failed to write module file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Rewritten module could not be serialized
    #[error("Failed to serialize module {name}: {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },
}

/// Null-handling policy a nullable reference type may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullPolicy {
    /// Null values are rejected at encode time; the wire shape is the
    /// plain record.
    Forbid,
    /// A presence octet precedes the record; null encodes as absent.
    Marker,
}

/// One member of an aggregate type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: WireType,
}

/// Wire-relevant shape of a named data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeShape {
    /// Plain aggregate: eligible for codec auto-generation, members
    /// encoded in declaration order.
    Record { members: Vec<MemberDescriptor> },
    /// Capability/interface type: polymorphic, no unambiguous wire shape.
    Interface,
    /// Reference type that admits null. Unserializable unless a
    /// null-handling policy is declared.
    Nullable {
        members: Vec<MemberDescriptor>,
        #[serde(default)]
        null_policy: Option<NullPolicy>,
    },
}

/// A named entry in the module's data-type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub shape: TypeShape,
}

/// A compiled module under transformation: the behaviours to weave plus
/// the data-type table the serializer resolver draws from.
///
/// Reference modules use the same document format; their entries feed
/// resolution and base-chain lookup but are never woven.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub behaviours: Vec<TypeDescriptor>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl Module {
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        let text = fs::read_to_string(path).map_err(|source| ModuleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ModuleError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModuleError> {
        let text =
            serde_json::to_string_pretty(self).map_err(|source| ModuleError::Serialize {
                name: self.name.clone(),
                source,
            })?;
        fs::write(path, text).map_err(|source| ModuleError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn behaviour(&self, name: &str) -> Option<&TypeDescriptor> {
        self.behaviours.iter().find(|ty| ty.name == name)
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|def| def.name == name)
    }
}
