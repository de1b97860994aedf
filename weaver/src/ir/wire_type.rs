use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a parameter, field or aggregate member as it crosses
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Str,
    Bytes,
    /// An aggregate or reference type, resolved against the module's
    /// type table (or a registered custom codec pair).
    Named(String),
}

impl WireType {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, WireType::Named(_))
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Bool => write!(f, "bool"),
            WireType::U8 => write!(f, "u8"),
            WireType::U16 => write!(f, "u16"),
            WireType::U32 => write!(f, "u32"),
            WireType::U64 => write!(f, "u64"),
            WireType::I8 => write!(f, "i8"),
            WireType::I16 => write!(f, "i16"),
            WireType::I32 => write!(f, "i32"),
            WireType::I64 => write!(f, "i64"),
            WireType::F32 => write!(f, "f32"),
            WireType::F64 => write!(f, "f64"),
            WireType::Str => write!(f, "str"),
            WireType::Bytes => write!(f, "bytes"),
            WireType::Named(name) => write!(f, "{}", name),
        }
    }
}
