use netweave_runtime::MethodId;

/// Computes the stable 32-bit FNV-1a identifier for a woven method.
///
/// Both ends of a connection derive ids independently, without exchanging
/// a schema, so the derivation must be identical across processes, runs
/// and platforms.
#[must_use]
pub fn derive_method_id(type_name: &str, method_name: &str) -> MethodId {
    const FNV_PRIME: u32 = 16_777_619;
    const FNV_OFFSET: u32 = 2_166_136_261;

    let mut hash = FNV_OFFSET;
    for byte in type_name
        .as_bytes()
        .iter()
        .chain(b"::")
        .chain(method_name.as_bytes())
    {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
