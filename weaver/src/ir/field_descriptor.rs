use serde::{Deserialize, Serialize};

use super::wire_type::WireType;

/// One declared field of a behaviour under transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: WireType,
    /// Marked for synchronization: the weaver assigns it a dirty bit and
    /// replaces direct access with a generated accessor pair.
    #[serde(default)]
    pub synchronized: bool,
    /// Optional change hook: an instance method on the same type taking
    /// `(old, new)` of the field's type, invoked on receiving peers.
    #[serde(default)]
    pub hook: Option<String>,
}
