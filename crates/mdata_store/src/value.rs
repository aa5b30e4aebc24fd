//! Field values and their kinds.

use serde::Serialize;
use std::fmt;

/// The kind of a stored field, named by its sidecar type token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Signed 32-bit integer (`int`).
    Int,
    /// Unsigned 64-bit integer (`uint64`).
    Uint64,
    /// Single-line text (`string`).
    String,
    /// Opaque bytes, base64-encoded on disk (`bin_data`).
    #[serde(rename = "bin_data")]
    Binary,
}

impl ValueKind {
    /// Returns the type token used in the sidecar format.
    pub fn token(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Uint64 => "uint64",
            ValueKind::String => "string",
            ValueKind::Binary => "bin_data",
        }
    }

    /// Looks up a kind by its sidecar type token.
    ///
    /// Returns `None` for unrecognized tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "int" => Some(ValueKind::Int),
            "uint64" => Some(ValueKind::Uint64),
            "string" => Some(ValueKind::String),
            "bin_data" => Some(ValueKind::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A typed field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A signed 32-bit integer.
    Int(i32),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// Text without line breaks.
    String(String),
    /// Raw bytes, possibly zlib-compressed by the writer.
    Binary(Vec<u8>),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Uint64(_) => ValueKind::Uint64,
            Value::String(_) => ValueKind::String,
            Value::Binary(_) => ValueKind::Binary,
        }
    }
}
