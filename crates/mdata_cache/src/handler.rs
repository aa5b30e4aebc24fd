//! Per-extension metadata handlers.

use std::path::Path;

use mdata_store::{MetadataFile, StoreError};

use crate::fs::SourceFile;

/// A failure reported by a [`MetadataHandler`].
///
/// Handler failures are recorded and logged but never stop a scan.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    /// Description of the failure.
    pub message: String,
}

impl HandlerError {
    /// Creates a new handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(e: StoreError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Logic for one kind of asset, selected by file extension at registration.
///
/// For every matched source the registry calls [`refresh`](Self::refresh)
/// and then [`consume`](Self::consume), and writes the store back afterwards.
pub trait MetadataHandler {
    /// Recomputes derived fields for `source`.
    ///
    /// `metadata` holds whatever the sidecar contained (or nothing for a new
    /// asset). Derived values are normally written non-sticky so each run
    /// replaces them.
    fn refresh(&mut self, source: &SourceFile, metadata: &mut MetadataFile)
        -> Result<(), HandlerError>;

    /// Uses the finalized fields, e.g. to load the processed asset.
    fn consume(&mut self, path: &Path, metadata: &MetadataFile) -> Result<(), HandlerError>;
}

/// A [`MetadataHandler`] built from two closures.
pub struct FnHandler<R, C> {
    refresh: R,
    consume: C,
}

impl<R, C> FnHandler<R, C>
where
    R: FnMut(&SourceFile, &mut MetadataFile) -> Result<(), HandlerError>,
    C: FnMut(&Path, &MetadataFile) -> Result<(), HandlerError>,
{
    /// Wraps a refresh closure and a consume closure.
    pub fn new(refresh: R, consume: C) -> Self {
        Self { refresh, consume }
    }
}

impl<R, C> MetadataHandler for FnHandler<R, C>
where
    R: FnMut(&SourceFile, &mut MetadataFile) -> Result<(), HandlerError>,
    C: FnMut(&Path, &MetadataFile) -> Result<(), HandlerError>,
{
    fn refresh(
        &mut self,
        source: &SourceFile,
        metadata: &mut MetadataFile,
    ) -> Result<(), HandlerError> {
        (self.refresh)(source, metadata)
    }

    fn consume(&mut self, path: &Path, metadata: &MetadataFile) -> Result<(), HandlerError> {
        (self.consume)(path, metadata)
    }
}
