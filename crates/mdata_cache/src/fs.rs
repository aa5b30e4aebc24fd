//! Filesystem access used by the registry.
//!
//! [`AssetFs`] is the seam between the cache and the platform: directory
//! enumeration, modification times, and whole-file reads and writes.
//! [`DiskFs`] is the real implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CacheError;

/// A source asset discovered in the asset tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Path to the asset.
    pub path: PathBuf,
    /// The asset's extension, without the leading dot.
    pub extension: String,
}

impl SourceFile {
    /// Builds a `SourceFile` from a path, or `None` if it has no UTF-8 extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_string();
        Some(Self {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// File operations the registry depends on.
pub trait AssetFs {
    /// Lists every regular file under `root`, sorted by path.
    fn list(&self, root: &Path, recursive: bool) -> Result<Vec<SourceFile>, CacheError>;

    /// Returns the modification time of `path`.
    fn modified(&self, path: &Path) -> Result<SystemTime, CacheError>;

    /// Reads a whole file, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replaces the contents of a file.
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), CacheError>;
}

/// [`AssetFs`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFs;

impl AssetFs for DiskFs {
    fn list(&self, root: &Path, recursive: bool) -> Result<Vec<SourceFile>, CacheError> {
        if !root.is_dir() {
            debug!("asset root {} does not exist", root.display());
            return Ok(Vec::new());
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();
        for entry in WalkDir::new(root).max_depth(max_depth) {
            let entry = entry.map_err(|e| CacheError::Io {
                path: e.path().unwrap_or(root).to_path_buf(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(file) = SourceFile::from_path(entry.path()) {
                files.push(file);
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, CacheError> {
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| CacheError::Io {
                path: path.to_path_buf(),
                source: e,
            })
    }

    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
        match std::fs::read(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), CacheError> {
        std::fs::write(path, data).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
