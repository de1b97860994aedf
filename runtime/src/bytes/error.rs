use thiserror::Error;

/// Errors that can occur while encoding or decoding wire values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Reader ran out of bytes mid-value
    #[error("Unexpected end of payload: needed {needed} more byte(s) at offset {offset}")]
    UnexpectedEnd {
        needed: usize,
        offset: usize,
    },

    /// Bool octet was neither 0 nor 1 (SECURITY: potentially malformed payload)
    #[error("Invalid bool octet {octet} at offset {offset} (valid values: 0 or 1). This may indicate a malformed or desynchronized payload")]
    InvalidBool {
        octet: u8,
        offset: usize,
    },

    /// String bytes were not valid UTF-8
    #[error("Invalid UTF-8 in string value at offset {offset}")]
    InvalidUtf8 {
        offset: usize,
    },

    /// Declared length prefix exceeds the remaining payload
    #[error("Length prefix {length} exceeds remaining payload of {remaining} byte(s)")]
    LengthOverflow {
        length: usize,
        remaining: usize,
    },

    /// Value kind does not match the codec's wire type
    #[error("Value of kind {found} does not match wire type {expected}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    /// Null value reached a codec whose declared policy forbids null
    #[error("Null value for type {type_name}, which declares a forbid-null policy")]
    NullForbidden {
        type_name: String,
    },

    /// Presence octet of a nullable value was neither 0 nor 1
    #[error("Invalid presence octet {octet} for nullable type {type_name} (valid values: 0 or 1)")]
    InvalidPresence {
        octet: u8,
        type_name: String,
    },

    /// Aggregate value member count does not match the codec's member list
    #[error("Aggregate value has {found} member(s), codec for {type_name} expects {expected}")]
    MemberCountMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },
}
