//! The built-in handler used by `mdata import`.
//!
//! Records a fingerprint of each asset as derived (non-sticky) fields so that
//! downstream tools can tell whether an asset changed since its last import:
//!
//! - `size`: file length in bytes (`uint64`)
//! - `content_hash`: XXH3-128 of the contents (`string`)
//! - `modified`: modification time in seconds since the epoch (`uint64`)

use std::path::Path;
use std::time::UNIX_EPOCH;

use mdata_cache::{HandlerError, MetadataHandler, SourceFile};
use mdata_store::MetadataFile;
use tracing::debug;

use crate::hash::ContentHash;

/// Field holding the asset size.
pub const SIZE_FIELD: &str = "size";
/// Field holding the asset content hash.
pub const HASH_FIELD: &str = "content_hash";
/// Field holding the asset modification time.
pub const MODIFIED_FIELD: &str = "modified";

/// Writes size, content hash, and modification time for each asset.
#[derive(Debug, Default)]
pub struct FingerprintHandler;

impl MetadataHandler for FingerprintHandler {
    fn refresh(
        &mut self,
        source: &SourceFile,
        metadata: &mut MetadataFile,
    ) -> Result<(), HandlerError> {
        let data = std::fs::read(&source.path)?;
        let modified = std::fs::metadata(&source.path)?
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        metadata.set_uint64(SIZE_FIELD, data.len() as u64, false)?;
        metadata.set_string(
            HASH_FIELD,
            &ContentHash::from_bytes(&data).to_string(),
            false,
        )?;
        metadata.set_uint64(MODIFIED_FIELD, modified, false)?;
        Ok(())
    }

    fn consume(&mut self, path: &Path, metadata: &MetadataFile) -> Result<(), HandlerError> {
        let hash = metadata.get_string(HASH_FIELD).ok_or_else(|| {
            HandlerError::new(format!("{} has no {HASH_FIELD} field", path.display()))
        })?;
        debug!("{} fingerprint {hash}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_writes_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.mesh");
        std::fs::write(&path, b"0123456789").unwrap();
        let source = SourceFile::from_path(&path).unwrap();

        let mut metadata = MetadataFile::new();
        FingerprintHandler.refresh(&source, &mut metadata).unwrap();

        assert_eq!(metadata.get_uint64(SIZE_FIELD), Some(10));
        assert_eq!(
            metadata.get_string(HASH_FIELD),
            Some(ContentHash::from_bytes(b"0123456789").to_string().as_str())
        );
        assert!(metadata.get_uint64(MODIFIED_FIELD).unwrap() > 0);
        assert_eq!(metadata.is_sticky(HASH_FIELD), Some(false));
    }

    #[test]
    fn refresh_replaces_stale_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.mesh");
        std::fs::write(&path, b"new").unwrap();
        let source = SourceFile::from_path(&path).unwrap();

        let mut metadata = MetadataFile::new();
        metadata.set_uint64(SIZE_FIELD, 999, false).unwrap();
        metadata.set_string("author", "kim", true).unwrap();
        FingerprintHandler.refresh(&source, &mut metadata).unwrap();

        assert_eq!(metadata.get_uint64(SIZE_FIELD), Some(3));
        assert_eq!(metadata.get_string("author"), Some("kim"));
    }

    #[test]
    fn refresh_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceFile::from_path(&dir.path().join("gone.mesh")).unwrap();
        let mut metadata = MetadataFile::new();
        assert!(FingerprintHandler.refresh(&source, &mut metadata).is_err());
    }

    #[test]
    fn consume_requires_hash() {
        let metadata = MetadataFile::new();
        let err = FingerprintHandler
            .consume(Path::new("tree.mesh"), &metadata)
            .unwrap_err();
        assert!(err.message.contains("content_hash"));
    }
}
