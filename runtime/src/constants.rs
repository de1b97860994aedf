/// Capacity of the per-instance dirty mask.
///
/// Bounds the number of synchronized fields a behaviour chain may declare.
pub const SYNC_FIELD_CAPACITY: u8 = 64;
