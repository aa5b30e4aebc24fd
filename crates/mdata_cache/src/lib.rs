//! Sidecar metadata cache for asset import pipelines.
//!
//! A [`Registry`] owns one [`HandlerEntry`] per registered file extension.
//! Registering an extension scans the asset tree, loads or creates the sidecar
//! for every matching source, runs the extension's [`MetadataHandler`] over it,
//! and writes every sidecar back. The registry keeps the stores and their
//! modification-time snapshots so a file watcher can later ask which sources
//! changed and [`reload`](Registry::reload) them one at a time.

#![warn(missing_docs)]

pub mod error;
pub mod fs;
pub mod handler;
pub mod registry;
pub mod sidecar;

pub use error::CacheError;
pub use fs::{AssetFs, DiskFs, SourceFile};
pub use handler::{FnHandler, HandlerError, MetadataHandler};
pub use registry::{
    CachedAsset, HandlerEntry, HandlerFailure, HandlerStage, Registry, RegistryOptions, ScanReport,
};
pub use sidecar::{load_sidecar, save_sidecar, sidecar_path};
