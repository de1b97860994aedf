/// Round-trip property: for any value of a resolvable type, decoding an
/// encoding yields an equal value.

use proptest::prelude::*;

use netweave_runtime::{ByteReader, ByteWriter, WireValue};
use netweave_weaver::{
    MemberDescriptor, SerializerRegistry, TypeDef, TypeShape, WeaveConfig, WireType,
};

fn roundtrip(ty: &WireType, value: &WireValue, types: &[TypeDef]) -> WireValue {
    let config = WeaveConfig::builder().build();
    let mut registry = SerializerRegistry::new(&config, types.iter());
    let codec = registry.resolve(ty).expect("type resolvable");

    let mut writer = ByteWriter::new();
    codec.encode(value, &mut writer).expect("value encodes");
    let bytes = writer.to_bytes();
    let mut reader = ByteReader::new(&bytes);
    let decoded = codec.decode(&mut reader).expect("payload decodes");
    assert_eq!(reader.remaining(), 0, "codec consumed the whole payload");
    decoded
}

#[test]
fn every_primitive_round_trips() {
    let cases = vec![
        (WireType::Bool, WireValue::Bool(true)),
        (WireType::U8, WireValue::U8(0xFF)),
        (WireType::U16, WireValue::U16(40_000)),
        (WireType::U32, WireValue::U32(3_000_000_000)),
        (WireType::U64, WireValue::U64(u64::MAX)),
        (WireType::I8, WireValue::I8(-128)),
        (WireType::I16, WireValue::I16(-30_000)),
        (WireType::I32, WireValue::I32(i32::MIN)),
        (WireType::I64, WireValue::I64(i64::MIN)),
        (WireType::F32, WireValue::F32(-0.5)),
        (WireType::F64, WireValue::F64(1.0e300)),
        (WireType::Str, WireValue::Str("héllo wörld".to_string())),
        (WireType::Bytes, WireValue::Bytes(vec![0, 1, 2, 254, 255])),
    ];

    for (ty, value) in cases {
        assert_eq!(roundtrip(&ty, &value, &[]), value);
    }
}

#[test]
fn empty_string_and_empty_bytes_round_trip() {
    assert_eq!(
        roundtrip(&WireType::Str, &WireValue::Str(String::new()), &[]),
        WireValue::Str(String::new())
    );
    assert_eq!(
        roundtrip(&WireType::Bytes, &WireValue::Bytes(Vec::new()), &[]),
        WireValue::Bytes(Vec::new())
    );
}

fn snapshot_types() -> Vec<TypeDef> {
    vec![
        TypeDef {
            name: "Vec2".to_string(),
            shape: TypeShape::Record {
                members: vec![
                    MemberDescriptor {
                        name: "x".to_string(),
                        ty: WireType::I32,
                    },
                    MemberDescriptor {
                        name: "y".to_string(),
                        ty: WireType::I32,
                    },
                ],
            },
        },
        TypeDef {
            name: "Snapshot".to_string(),
            shape: TypeShape::Record {
                members: vec![
                    MemberDescriptor {
                        name: "position".to_string(),
                        ty: WireType::Named("Vec2".to_string()),
                    },
                    MemberDescriptor {
                        name: "alive".to_string(),
                        ty: WireType::Bool,
                    },
                    MemberDescriptor {
                        name: "label".to_string(),
                        ty: WireType::Str,
                    },
                ],
            },
        },
    ]
}

proptest! {
    #[test]
    fn arbitrary_integers_round_trip(value in any::<i64>()) {
        let wire = WireValue::I64(value);
        prop_assert_eq!(roundtrip(&WireType::I64, &wire, &[]), wire);
    }

    #[test]
    fn arbitrary_strings_round_trip(value in ".*") {
        let wire = WireValue::Str(value);
        prop_assert_eq!(roundtrip(&WireType::Str, &wire.clone(), &[]), wire);
    }

    #[test]
    fn arbitrary_byte_arrays_round_trip(value in proptest::collection::vec(any::<u8>(), 0..512)) {
        let wire = WireValue::Bytes(value);
        prop_assert_eq!(roundtrip(&WireType::Bytes, &wire.clone(), &[]), wire);
    }

    #[test]
    fn arbitrary_snapshots_round_trip(
        x in any::<i32>(),
        y in any::<i32>(),
        alive in any::<bool>(),
        label in ".*",
    ) {
        let types = snapshot_types();
        let wire = WireValue::Struct(vec![
            WireValue::Struct(vec![WireValue::I32(x), WireValue::I32(y)]),
            WireValue::Bool(alive),
            WireValue::Str(label),
        ]);
        prop_assert_eq!(
            roundtrip(&WireType::Named("Snapshot".to_string()), &wire.clone(), &types),
            wire
        );
    }
}
