//! Error types for metadata store mutations.

/// Errors raised when a field cannot be written to or read from a store.
///
/// Absence of a field is never an error; lookups return `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The field name is empty, too long, or contains a delimiter.
    #[error("invalid field name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A string value contains a line break and cannot be stored on one line.
    #[error("string value for field '{name}' contains a line break")]
    InvalidString {
        /// The field the value was written to.
        name: String,
    },

    /// Compressing or decompressing a binary payload failed.
    #[error("compression error: {source}")]
    Compression {
        /// The underlying zlib error.
        #[from]
        source: std::io::Error,
    },
}
