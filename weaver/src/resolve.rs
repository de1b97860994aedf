use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use netweave_runtime::{ByteReader, ByteWriter, CodecError, WireValue};

use crate::config::WeaveConfig;
use crate::ir::module::{MemberDescriptor, NullPolicy, TypeDef, TypeShape};
use crate::ir::wire_type::WireType;

/// User-supplied encode routine for one named type.
pub type CustomEncodeFn =
    Arc<dyn Fn(&WireValue, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync>;

/// User-supplied decode routine for one named type.
pub type CustomDecodeFn =
    Arc<dyn Fn(&mut ByteReader) -> Result<WireValue, CodecError> + Send + Sync>;

/// Errors that can occur while resolving a serializer pair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Named type absent from the type table and custom codec registry
    #[error("No codec for unknown type {type_name}. Declare it in the module type table or register a custom codec pair")]
    UnknownType {
        type_name: String,
    },

    /// Capability/interface type: ambiguous wire shape
    #[error("Type {type_name} is an interface type; its wire shape is polymorphic and cannot be auto-generated")]
    InterfaceType {
        type_name: String,
    },

    /// Nullable reference type without a declared null-handling policy
    #[error("Nullable type {type_name} declares no null-handling policy")]
    MissingNullPolicy {
        type_name: String,
    },

    /// Aggregate auto-generation failed on one member; no partial codec
    /// is produced
    #[error("Member {member} of {type_name} is unresolvable: {cause}")]
    MemberUnresolvable {
        type_name: String,
        member: String,
        cause: Box<ResolveError>,
    },

    /// Aggregate refers to itself through its member chain
    #[error("Type {type_name} is recursive; an auto-generated codec cannot express a recursive wire shape")]
    RecursiveType {
        type_name: String,
    },
}

enum CodecPlan {
    Primitive(WireType),
    Record {
        type_name: String,
        members: Vec<(String, Arc<SerializerPair>)>,
        null_policy: Option<NullPolicy>,
    },
    Custom {
        encode: CustomEncodeFn,
        decode: CustomDecodeFn,
    },
}

/// A resolved (encode, decode) routine pair for one semantic type.
///
/// Encode and decode walk the same plan, so for any value of a resolvable
/// type, decoding an encoding yields an equal value.
pub struct SerializerPair {
    plan: CodecPlan,
}

impl SerializerPair {
    pub fn encode(&self, value: &WireValue, writer: &mut ByteWriter) -> Result<(), CodecError> {
        match &self.plan {
            CodecPlan::Primitive(ty) => encode_primitive(ty, value, writer),
            CodecPlan::Record {
                type_name,
                members,
                null_policy,
            } => {
                match null_policy {
                    Some(NullPolicy::Marker) => {
                        if matches!(value, WireValue::Null) {
                            writer.write_u8(0);
                            return Ok(());
                        }
                        writer.write_u8(1);
                    }
                    Some(NullPolicy::Forbid) => {
                        if matches!(value, WireValue::Null) {
                            return Err(CodecError::NullForbidden {
                                type_name: type_name.clone(),
                            });
                        }
                    }
                    None => {}
                }
                let WireValue::Struct(values) = value else {
                    return Err(CodecError::TypeMismatch {
                        expected: type_name.clone(),
                        found: value.kind(),
                    });
                };
                if values.len() != members.len() {
                    return Err(CodecError::MemberCountMismatch {
                        type_name: type_name.clone(),
                        expected: members.len(),
                        found: values.len(),
                    });
                }
                for ((_, codec), member_value) in members.iter().zip(values) {
                    codec.encode(member_value, writer)?;
                }
                Ok(())
            }
            CodecPlan::Custom { encode, .. } => encode(value, writer),
        }
    }

    pub fn decode(&self, reader: &mut ByteReader) -> Result<WireValue, CodecError> {
        match &self.plan {
            CodecPlan::Primitive(ty) => decode_primitive(ty, reader),
            CodecPlan::Record {
                type_name,
                members,
                null_policy,
            } => {
                if let Some(NullPolicy::Marker) = null_policy {
                    match reader.read_u8()? {
                        0 => return Ok(WireValue::Null),
                        1 => {}
                        octet => {
                            return Err(CodecError::InvalidPresence {
                                octet,
                                type_name: type_name.clone(),
                            })
                        }
                    }
                }
                let mut values = Vec::with_capacity(members.len());
                for (_, codec) in members {
                    values.push(codec.decode(reader)?);
                }
                Ok(WireValue::Struct(values))
            }
            CodecPlan::Custom { decode, .. } => decode(reader),
        }
    }
}

fn encode_primitive(
    ty: &WireType,
    value: &WireValue,
    writer: &mut ByteWriter,
) -> Result<(), CodecError> {
    match (ty, value) {
        (WireType::Bool, WireValue::Bool(v)) => writer.write_bool(*v),
        (WireType::U8, WireValue::U8(v)) => writer.write_u8(*v),
        (WireType::U16, WireValue::U16(v)) => writer.write_u16(*v),
        (WireType::U32, WireValue::U32(v)) => writer.write_u32(*v),
        (WireType::U64, WireValue::U64(v)) => writer.write_u64(*v),
        (WireType::I8, WireValue::I8(v)) => writer.write_i8(*v),
        (WireType::I16, WireValue::I16(v)) => writer.write_i16(*v),
        (WireType::I32, WireValue::I32(v)) => writer.write_i32(*v),
        (WireType::I64, WireValue::I64(v)) => writer.write_i64(*v),
        (WireType::F32, WireValue::F32(v)) => writer.write_f32(*v),
        (WireType::F64, WireValue::F64(v)) => writer.write_f64(*v),
        (WireType::Str, WireValue::Str(v)) => writer.write_str(v),
        (WireType::Bytes, WireValue::Bytes(v)) => writer.write_bytes(v),
        _ => {
            return Err(CodecError::TypeMismatch {
                expected: ty.to_string(),
                found: value.kind(),
            })
        }
    }
    Ok(())
}

fn decode_primitive(ty: &WireType, reader: &mut ByteReader) -> Result<WireValue, CodecError> {
    Ok(match ty {
        WireType::Bool => WireValue::Bool(reader.read_bool()?),
        WireType::U8 => WireValue::U8(reader.read_u8()?),
        WireType::U16 => WireValue::U16(reader.read_u16()?),
        WireType::U32 => WireValue::U32(reader.read_u32()?),
        WireType::U64 => WireValue::U64(reader.read_u64()?),
        WireType::I8 => WireValue::I8(reader.read_i8()?),
        WireType::I16 => WireValue::I16(reader.read_i16()?),
        WireType::I32 => WireValue::I32(reader.read_i32()?),
        WireType::I64 => WireValue::I64(reader.read_i64()?),
        WireType::F32 => WireValue::F32(reader.read_f32()?),
        WireType::F64 => WireValue::F64(reader.read_f64()?),
        WireType::Str => WireValue::Str(reader.read_str()?),
        WireType::Bytes => WireValue::Bytes(reader.read_bytes()?),
        WireType::Named(name) => {
            // Named plans are built by the registry; a Primitive plan
            // never holds one.
            return Err(CodecError::TypeMismatch {
                expected: name.clone(),
                found: "unresolved",
            });
        }
    })
}

/// Resolves serializer pairs for semantic types, memoizing per type.
///
/// Lookup order: memo cache, built-in primitive codecs, user-supplied
/// codec pairs from the configuration, auto-generation from the type
/// table. Failures are memoized too: an unresolvable type is a terminal
/// error for every method and field referencing it.
pub struct SerializerRegistry {
    type_defs: HashMap<String, TypeDef>,
    custom: HashMap<String, (CustomEncodeFn, CustomDecodeFn)>,
    cache: HashMap<WireType, Result<Arc<SerializerPair>, ResolveError>>,
    in_progress: HashSet<String>,
}

impl SerializerRegistry {
    pub fn new<'t>(
        config: &WeaveConfig,
        type_defs: impl Iterator<Item = &'t TypeDef>,
    ) -> Self {
        Self {
            type_defs: type_defs
                .map(|def| (def.name.clone(), def.clone()))
                .collect(),
            custom: config
                .custom_codecs()
                .map(|(name, (encode, decode))| {
                    (name.to_string(), (encode.clone(), decode.clone()))
                })
                .collect(),
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn resolve(&mut self, ty: &WireType) -> Result<Arc<SerializerPair>, ResolveError> {
        if let Some(hit) = self.cache.get(ty) {
            return hit.clone();
        }
        let result = self.resolve_uncached(ty);
        self.cache.insert(ty.clone(), result.clone());
        result
    }

    fn resolve_uncached(&mut self, ty: &WireType) -> Result<Arc<SerializerPair>, ResolveError> {
        let name = match ty {
            WireType::Named(name) => name.clone(),
            primitive => {
                return Ok(Arc::new(SerializerPair {
                    plan: CodecPlan::Primitive(primitive.clone()),
                }));
            }
        };

        if let Some((encode, decode)) = self.custom.get(&name) {
            return Ok(Arc::new(SerializerPair {
                plan: CodecPlan::Custom {
                    encode: encode.clone(),
                    decode: decode.clone(),
                },
            }));
        }

        let Some(def) = self.type_defs.get(&name).cloned() else {
            return Err(ResolveError::UnknownType { type_name: name });
        };

        let (members, null_policy) = match def.shape {
            TypeShape::Interface => {
                return Err(ResolveError::InterfaceType { type_name: name });
            }
            TypeShape::Record { members } => (members, None),
            TypeShape::Nullable {
                members,
                null_policy,
            } => match null_policy {
                Some(policy) => (members, Some(policy)),
                None => {
                    return Err(ResolveError::MissingNullPolicy { type_name: name });
                }
            },
        };

        if !self.in_progress.insert(name.clone()) {
            return Err(ResolveError::RecursiveType { type_name: name });
        }
        let resolved = self.resolve_members(&name, &members);
        self.in_progress.remove(&name);

        Ok(Arc::new(SerializerPair {
            plan: CodecPlan::Record {
                type_name: name,
                members: resolved?,
                null_policy,
            },
        }))
    }

    fn resolve_members(
        &mut self,
        type_name: &str,
        members: &[MemberDescriptor],
    ) -> Result<Vec<(String, Arc<SerializerPair>)>, ResolveError> {
        let mut resolved = Vec::with_capacity(members.len());
        for member in members {
            let codec =
                self.resolve(&member.ty)
                    .map_err(|cause| ResolveError::MemberUnresolvable {
                        type_name: type_name.to_string(),
                        member: member.name.clone(),
                        cause: Box::new(cause),
                    })?;
            resolved.push((member.name.clone(), codec));
        }
        Ok(resolved)
    }
}
