//! Sidecar paths and whole-file load/save.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use mdata_store::MetadataFile;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::fs::AssetFs;

/// Returns the sidecar path for `source`: the full source path with
/// `.<sidecar_extension>` appended (`tree.mesh` becomes `tree.mesh.mdata`).
pub fn sidecar_path(source: &Path, sidecar_extension: &str) -> PathBuf {
    let mut path = OsString::from(source.as_os_str());
    path.push(".");
    path.push(sidecar_extension);
    PathBuf::from(path)
}

/// Loads a sidecar, returning an empty store if it does not exist or cannot
/// be read.
///
/// A sidecar that was read but does not parse is reported as
/// [`CacheError::CorruptSidecar`].
pub fn load_sidecar<F: AssetFs + ?Sized>(fs: &F, path: &Path) -> Result<MetadataFile, CacheError> {
    let data = match fs.read(path) {
        Ok(Some(data)) => data,
        Ok(None) => {
            debug!("no sidecar at {}, starting empty", path.display());
            return Ok(MetadataFile::new());
        }
        Err(e) => {
            warn!("{e}, starting empty");
            return Ok(MetadataFile::new());
        }
    };
    let metadata = mdata_codec::parse(&data).map_err(|source| CacheError::CorruptSidecar {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} fields from {}", metadata.len(), path.display());
    Ok(metadata)
}

/// Serializes `metadata` and replaces the sidecar at `path`.
pub fn save_sidecar<F: AssetFs + ?Sized>(
    fs: &F,
    path: &Path,
    metadata: &MetadataFile,
) -> Result<(), CacheError> {
    let text = mdata_codec::serialize(metadata);
    fs.write(path, text.as_bytes())?;
    debug!("wrote {} fields to {}", metadata.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DiskFs;

    #[test]
    fn appends_extension() {
        assert_eq!(
            sidecar_path(Path::new("data/tree.mesh"), "mdata"),
            PathBuf::from("data/tree.mesh.mdata")
        );
    }

    #[test]
    fn appends_to_extensionless_path() {
        assert_eq!(
            sidecar_path(Path::new("LICENSE"), "meta"),
            PathBuf::from("LICENSE.meta")
        );
    }

    #[test]
    fn missing_sidecar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = load_sidecar(&DiskFs, &dir.path().join("a.png.mdata")).unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn unreadable_sidecar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png.mdata");
        std::fs::create_dir(&path).unwrap();
        let metadata = load_sidecar(&DiskFs, &path).unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png.mdata");
        let mut metadata = MetadataFile::new();
        metadata.set_uint64("size", 42, false).unwrap();
        metadata.set_string("hash", "abc123", true).unwrap();
        save_sidecar(&DiskFs, &path, &metadata).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "uint64 size 42\nstring hash abc123\n"
        );
        let loaded = load_sidecar(&DiskFs, &path).unwrap();
        assert_eq!(loaded.get_uint64("size"), Some(42));
        assert_eq!(loaded.get_string("hash"), Some("abc123"));
    }

    #[test]
    fn corrupt_sidecar_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png.mdata");
        std::fs::write(&path, "int ok 1\ngarbage\n").unwrap();
        let err = load_sidecar(&DiskFs, &path).unwrap_err();
        match err {
            CacheError::CorruptSidecar { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.offset(), 16);
            }
            other => panic!("expected CorruptSidecar, got {other:?}"),
        }
    }
}
