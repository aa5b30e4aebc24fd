//! Configuration types deserialized from `mdata.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level cache configuration parsed from `mdata.toml`.
///
/// Every section is optional; an empty file yields [`CacheConfig::default`].
#[derive(Debug, Default, Deserialize)]
pub struct CacheConfig {
    /// Where source assets are discovered.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// How sidecar files are named.
    #[serde(default)]
    pub sidecar: SidecarConfig,
    /// Settings for the `import` command.
    #[serde(default)]
    pub import: ImportConfig,
}

/// Asset discovery settings.
#[derive(Debug, Deserialize)]
pub struct AssetsConfig {
    /// Root directory of the asset tree, relative to the project root.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Whether to descend into subdirectories.
    #[serde(default = "default_true")]
    pub recursive: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            recursive: true,
        }
    }
}

/// Sidecar naming settings.
#[derive(Debug, Deserialize)]
pub struct SidecarConfig {
    /// Extension appended to a source path to form its sidecar path, without a dot.
    #[serde(default = "default_sidecar_extension")]
    pub extension: String,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            extension: default_sidecar_extension(),
        }
    }
}

/// Settings for the built-in fingerprint import.
#[derive(Debug, Default, Deserialize)]
pub struct ImportConfig {
    /// Source extensions to import (e.g., `["mesh", "png"]`).
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_sidecar_extension() -> String {
    "mdata".to_string()
}

fn default_true() -> bool {
    true
}
