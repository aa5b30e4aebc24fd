//! The extension handler registry.
//!
//! [`Registry`] ties the pieces together for the import pipeline: it scans the
//! asset tree for each registered extension, loads or creates every sidecar,
//! runs the extension's handler, and writes the sidecars back. Entries and their
//! stores live as long as the registry; dropping it releases everything.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use mdata_store::MetadataFile;
use tracing::{debug, info, warn};

use crate::error::CacheError;
use crate::fs::{AssetFs, DiskFs, SourceFile};
use crate::handler::MetadataHandler;
use crate::sidecar::{load_sidecar, save_sidecar, sidecar_path};

/// Where the registry looks for assets and how it names sidecars.
#[derive(Clone, Debug)]
pub struct RegistryOptions {
    /// Root of the asset tree.
    pub asset_root: PathBuf,
    /// Whether to scan subdirectories of the root.
    pub recursive: bool,
    /// Extension appended to a source path to form its sidecar path.
    pub sidecar_extension: String,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("data"),
            recursive: true,
            sidecar_extension: "mdata".to_string(),
        }
    }
}

/// Which handler callback failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerStage {
    /// [`MetadataHandler::refresh`].
    Refresh,
    /// [`MetadataHandler::consume`].
    Consume,
}

/// A handler callback that returned an error for one source.
#[derive(Clone, Debug)]
pub struct HandlerFailure {
    /// The source being processed.
    pub path: PathBuf,
    /// The callback that failed.
    pub stage: HandlerStage,
    /// The handler's error message.
    pub message: String,
}

/// Outcome of a registration scan or a batch of reloads.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    /// Number of sources run through the handler.
    pub processed: usize,
    /// Callback failures, in processing order.
    pub failures: Vec<HandlerFailure>,
}

impl ScanReport {
    /// Returns `true` if every callback succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: ScanReport) {
        self.processed += other.processed;
        self.failures.extend(other.failures);
    }
}

/// Cached state for one matched source.
#[derive(Clone, Debug)]
pub struct CachedAsset {
    /// The source asset.
    pub source: SourceFile,
    /// Path of its sidecar.
    pub sidecar: PathBuf,
    /// Modification time of the source when it was last loaded.
    pub modified: SystemTime,
    /// The source's metadata.
    pub metadata: MetadataFile,
}

/// Everything registered for one extension.
pub struct HandlerEntry {
    extension: String,
    handler: Box<dyn MetadataHandler>,
    assets: Vec<CachedAsset>,
}

impl HandlerEntry {
    /// The extension this entry handles, without a leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The matched sources, in scan order.
    pub fn assets(&self) -> &[CachedAsset] {
        &self.assets
    }

    /// Looks up a matched source by path.
    pub fn asset(&self, path: &Path) -> Option<&CachedAsset> {
        self.assets.iter().find(|a| a.source.path == path)
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("extension", &self.extension)
            .field("assets", &self.assets.len())
            .finish()
    }
}

/// Owner of all handler entries for an import session.
pub struct Registry<F: AssetFs = DiskFs> {
    options: RegistryOptions,
    fs: F,
    entries: Vec<HandlerEntry>,
}

impl Registry<DiskFs> {
    /// Creates an empty registry over the local filesystem.
    pub fn new(options: RegistryOptions) -> Self {
        Self::with_fs(options, DiskFs)
    }
}

impl<F: AssetFs> Registry<F> {
    /// Creates an empty registry over the given filesystem.
    pub fn with_fs(options: RegistryOptions, fs: F) -> Self {
        Self {
            options,
            fs,
            entries: Vec::new(),
        }
    }

    /// The options this registry was created with.
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// The registered entries, in registration order.
    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }

    /// Returns the entry for `extension` (a leading dot is ignored).
    pub fn entry(&self, extension: &str) -> Option<&HandlerEntry> {
        let extension = normalize_extension(extension);
        self.entries.iter().find(|e| e.extension == extension)
    }

    /// Returns the number of registered extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the metadata cached for a source.
    pub fn metadata(&self, path: &Path) -> Option<&MetadataFile> {
        self.entries
            .iter()
            .find_map(|e| e.asset(path))
            .map(|a| &a.metadata)
    }

    /// Returns mutable metadata for a source. Call [`save`](Self::save) to persist edits.
    pub fn metadata_mut(&mut self, path: &Path) -> Option<&mut MetadataFile> {
        self.entries
            .iter_mut()
            .flat_map(|e| e.assets.iter_mut())
            .find(|a| a.source.path == path)
            .map(|a| &mut a.metadata)
    }

    /// Registers `handler` for `extension` and runs the initial import.
    ///
    /// Every source under the asset root with this extension gets its sidecar
    /// loaded (or an empty store), is passed through `refresh` and `consume`,
    /// and after all sources are processed every sidecar is rewritten. Handler
    /// failures are logged and reported without stopping the scan; a corrupt
    /// sidecar aborts the registration and nothing is recorded.
    ///
    /// The sidecar extension itself and already registered extensions are
    /// rejected before scanning.
    pub fn register_extension_handler<H>(
        &mut self,
        extension: &str,
        handler: H,
    ) -> Result<ScanReport, CacheError>
    where
        H: MetadataHandler + 'static,
    {
        let extension = normalize_extension(extension).to_string();
        if extension == normalize_extension(&self.options.sidecar_extension) {
            return Err(CacheError::SidecarExtension { extension });
        }
        if self.entry(&extension).is_some() {
            return Err(CacheError::DuplicateExtension { extension });
        }

        let mut handler: Box<dyn MetadataHandler> = Box::new(handler);
        let mut report = ScanReport::default();
        let mut assets = Vec::new();

        let sources = self
            .fs
            .list(&self.options.asset_root, self.options.recursive)?;
        for source in sources.into_iter().filter(|f| f.extension == extension) {
            let sidecar = sidecar_path(&source.path, &self.options.sidecar_extension);
            let mut metadata = load_sidecar(&self.fs, &sidecar)?;
            let modified = self.fs.modified(&source.path)?;

            info!("importing {}", source.path.display());
            run_handler(handler.as_mut(), &source, &mut metadata, &mut report);

            assets.push(CachedAsset {
                source,
                sidecar,
                modified,
                metadata,
            });
        }

        for asset in &assets {
            save_sidecar(&self.fs, &asset.sidecar, &asset.metadata)?;
        }

        debug!(
            "registered .{} handler with {} assets",
            extension,
            assets.len()
        );
        self.entries.push(HandlerEntry {
            extension,
            handler,
            assets,
        });
        Ok(report)
    }

    /// Returns tracked sources whose modification time no longer matches the
    /// snapshot, including sources that have disappeared.
    pub fn changed_files(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|e| e.assets.iter())
            .filter(|a| match self.fs.modified(&a.source.path) {
                Ok(t) => t != a.modified,
                Err(_) => true,
            })
            .map(|a| a.source.path.clone())
            .collect()
    }

    /// Reruns the load/refresh/consume/save cycle for one tracked source.
    ///
    /// The sidecar is reread from disk and the modification-time snapshot is
    /// updated. Intended to be driven by a file watcher.
    pub fn reload(&mut self, path: &Path) -> Result<ScanReport, CacheError> {
        let Self {
            options,
            fs,
            entries,
        } = self;
        let fs = &*fs;

        let (entry, index) = entries
            .iter_mut()
            .find_map(|e| {
                let index = e.assets.iter().position(|a| a.source.path == path)?;
                Some((e, index))
            })
            .ok_or_else(|| CacheError::UnknownAsset {
                path: path.to_path_buf(),
            })?;

        let source = entry.assets[index].source.clone();
        let sidecar = sidecar_path(&source.path, &options.sidecar_extension);
        let mut metadata = load_sidecar(fs, &sidecar)?;
        let modified = fs.modified(&source.path)?;

        info!("reloading {}", source.path.display());
        let mut report = ScanReport::default();
        run_handler(entry.handler.as_mut(), &source, &mut metadata, &mut report);
        save_sidecar(fs, &sidecar, &metadata)?;

        entry.assets[index] = CachedAsset {
            source,
            sidecar,
            modified,
            metadata,
        };
        Ok(report)
    }

    /// Reloads every source reported by [`changed_files`](Self::changed_files)
    /// that still exists.
    pub fn refresh_changed(&mut self) -> Result<ScanReport, CacheError> {
        let mut report = ScanReport::default();
        for path in self.changed_files() {
            if self.fs.modified(&path).is_err() {
                warn!("{} disappeared, keeping cached metadata", path.display());
                continue;
            }
            report.merge(self.reload(&path)?);
        }
        Ok(report)
    }

    /// Writes the cached metadata of one source back to its sidecar.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let asset = self
            .entries
            .iter()
            .find_map(|e| e.asset(path))
            .ok_or_else(|| CacheError::UnknownAsset {
                path: path.to_path_buf(),
            })?;
        save_sidecar(&self.fs, &asset.sidecar, &asset.metadata)
    }
}

/// Runs both callbacks for one source, recording failures.
fn run_handler(
    handler: &mut dyn MetadataHandler,
    source: &SourceFile,
    metadata: &mut MetadataFile,
    report: &mut ScanReport,
) {
    report.processed += 1;
    if let Err(e) = handler.refresh(source, metadata) {
        warn!("refresh failed for {}: {e}", source.path.display());
        report.failures.push(HandlerFailure {
            path: source.path.clone(),
            stage: HandlerStage::Refresh,
            message: e.message,
        });
    }
    if let Err(e) = handler.consume(&source.path, metadata) {
        warn!("consume failed for {}: {e}", source.path.display());
        report.failures.push(HandlerFailure {
            path: source.path.clone(),
            stage: HandlerStage::Consume,
            message: e.message,
        });
    }
}

fn normalize_extension(extension: &str) -> &str {
    extension.trim_start_matches('.')
}
