//! Error types for cache operations.

use std::path::PathBuf;

use mdata_codec::CodecError;

/// Errors that can occur during cache operations.
///
/// A missing sidecar is not an error; it yields an empty store. A sidecar that
/// exists but cannot be parsed is always an error, since sidecars are only
/// written by this crate.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while listing, reading, or writing files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An existing sidecar is malformed.
    #[error("corrupt sidecar {path}: {source}")]
    CorruptSidecar {
        /// The sidecar path.
        path: PathBuf,
        /// The parse failure, including its byte offset.
        source: CodecError,
    },

    /// A handler is already registered for this extension.
    #[error("a handler is already registered for extension '{extension}'")]
    DuplicateExtension {
        /// The normalized extension (without a leading dot).
        extension: String,
    },

    /// The extension is the one used for sidecars, so the scan would treat
    /// sidecars as sources.
    #[error("extension '{extension}' is reserved for sidecar files")]
    SidecarExtension {
        /// The normalized extension (without a leading dot).
        extension: String,
    },

    /// The path is not a source tracked by any handler entry.
    #[error("{path} is not tracked by any registered handler")]
    UnknownAsset {
        /// The requested source path.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("data/tree.mesh.mdata"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("tree.mesh.mdata"));
    }

    #[test]
    fn corrupt_sidecar_display() {
        let err = CacheError::CorruptSidecar {
            path: PathBuf::from("a.png.mdata"),
            source: CodecError::UnknownType {
                offset: 0,
                token: "float".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("corrupt sidecar a.png.mdata"));
        assert!(msg.contains("byte 0"));
    }

    #[test]
    fn duplicate_extension_display() {
        let err = CacheError::DuplicateExtension {
            extension: "png".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "a handler is already registered for extension 'png'"
        );
    }

    #[test]
    fn sidecar_extension_display() {
        let err = CacheError::SidecarExtension {
            extension: "mdata".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "extension 'mdata' is reserved for sidecar files"
        );
    }

    #[test]
    fn unknown_asset_display() {
        let err = CacheError::UnknownAsset {
            path: PathBuf::from("missing.mesh"),
        };
        assert!(err.to_string().contains("missing.mesh"));
    }
}
