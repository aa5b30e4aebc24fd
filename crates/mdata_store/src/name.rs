//! Validated field names.

use serde::Serialize;
use std::fmt;

use crate::error::StoreError;

/// Maximum length of a field name, in bytes.
pub const MAX_FIELD_NAME_LEN: usize = 32;

/// The name of a field within a [`MetadataFile`](crate::MetadataFile).
///
/// Names are the second token of a sidecar line, so they must be non-empty,
/// at most [`MAX_FIELD_NAME_LEN`] bytes, and free of spaces and line breaks.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Validates `name` and wraps it.
    pub fn new(name: &str) -> Result<Self, StoreError> {
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.len() > MAX_FIELD_NAME_LEN {
            Some("name is longer than 32 bytes")
        } else if name.contains(' ') {
            Some("name contains a space")
        } else if name.contains(|c| c == '\n' || c == '\r') {
            Some("name contains a line break")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StoreError::InvalidName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(Self(name.to_string())),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldName({:?})", self.0)
    }
}
