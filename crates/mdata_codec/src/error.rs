//! Error types for sidecar parsing.

use mdata_store::{StoreError, ValueKind};

/// A sidecar that deviates from the format written by [`serialize`](crate::serialize).
///
/// Every variant carries the byte offset in the input where the problem was
/// detected. Parsing stops at the first error; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input ended, or a line ended, before the expected delimiter.
    #[error("corrupt sidecar at byte {offset}: expected {expected}")]
    UnterminatedToken {
        /// Offset at which the delimiter was expected.
        offset: usize,
        /// The delimiter that was expected.
        expected: &'static str,
    },

    /// A type or name token exceeds its length limit.
    #[error("corrupt sidecar at byte {offset}: {token} token longer than {limit} bytes")]
    TokenTooLong {
        /// Offset of the start of the token.
        offset: usize,
        /// Which token overflowed (`type` or `name`).
        token: &'static str,
        /// The maximum permitted length.
        limit: usize,
    },

    /// A token or payload is not valid UTF-8.
    #[error("corrupt sidecar at byte {offset}: {what} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the start of the offending bytes.
        offset: usize,
        /// What was being decoded.
        what: &'static str,
    },

    /// The type token is not one of the recognized kinds.
    #[error("corrupt sidecar at byte {offset}: unknown field type '{token}'")]
    UnknownType {
        /// Offset of the start of the line.
        offset: usize,
        /// The unrecognized token.
        token: String,
    },

    /// The payload could not be decoded as its declared kind.
    #[error("corrupt sidecar at byte {offset}: invalid {kind} payload: {reason}")]
    InvalidPayload {
        /// Offset of the start of the payload.
        offset: usize,
        /// The declared kind of the field.
        kind: ValueKind,
        /// Description of the decode failure.
        reason: String,
    },

    /// The same field name appears on more than one line.
    #[error("corrupt sidecar at byte {offset}: duplicate field '{name}'")]
    DuplicateField {
        /// Offset of the start of the repeated name.
        offset: usize,
        /// The repeated name.
        name: String,
    },

    /// The field could not be inserted into the store (for example, an empty name).
    #[error("corrupt sidecar at byte {offset}: {source}")]
    InvalidField {
        /// Offset of the start of the line.
        offset: usize,
        /// The store's rejection.
        source: StoreError,
    },
}

impl CodecError {
    /// Returns the byte offset where the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            CodecError::UnterminatedToken { offset, .. }
            | CodecError::TokenTooLong { offset, .. }
            | CodecError::InvalidUtf8 { offset, .. }
            | CodecError::UnknownType { offset, .. }
            | CodecError::InvalidPayload { offset, .. }
            | CodecError::DuplicateField { offset, .. }
            | CodecError::InvalidField { offset, .. } => *offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unterminated_display() {
        let err = CodecError::UnterminatedToken {
            offset: 12,
            expected: "space after name",
        };
        assert_eq!(
            err.to_string(),
            "corrupt sidecar at byte 12: expected space after name"
        );
        assert_eq!(err.offset(), 12);
    }

    #[test]
    fn too_long_display() {
        let err = CodecError::TokenTooLong {
            offset: 4,
            token: "name",
            limit: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("name token"));
        assert!(msg.contains("32 bytes"));
    }

    #[test]
    fn unknown_type_display() {
        let err = CodecError::UnknownType {
            offset: 0,
            token: "float".to_string(),
        };
        assert!(err.to_string().contains("unknown field type 'float'"));
    }

    #[test]
    fn invalid_payload_display() {
        let err = CodecError::InvalidPayload {
            offset: 9,
            kind: ValueKind::Uint64,
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid uint64 payload"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn duplicate_display() {
        let err = CodecError::DuplicateField {
            offset: 20,
            name: "hash".to_string(),
        };
        assert!(err.to_string().contains("duplicate field 'hash'"));
        assert_eq!(err.offset(), 20);
    }
}
