//! Shared project helpers for CLI commands.
//!
//! Resolves the project root, loads `mdata.toml`, and derives the registry
//! options and extension list every command works from.

use std::path::{Path, PathBuf};

use mdata_cache::RegistryOptions;
use mdata_config::{CacheConfig, CONFIG_FILE};

use crate::GlobalArgs;

/// A resolved project: its root directory and configuration.
pub struct Project {
    /// Directory containing `mdata.toml` (or the working directory).
    pub root: PathBuf,
    /// The loaded configuration, or defaults if there is no file.
    pub config: CacheConfig,
}

impl Project {
    /// Absolute (or root-relative) path of the asset tree.
    pub fn asset_root(&self) -> PathBuf {
        self.root.join(&self.config.assets.root)
    }

    /// Registry options derived from the configuration.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            asset_root: self.asset_root(),
            recursive: self.config.assets.recursive,
            sidecar_extension: self.config.sidecar.extension.clone(),
        }
    }

    /// Chooses explicit extensions over configured ones, without leading dots.
    ///
    /// Repeats are dropped, keeping the first occurrence.
    pub fn extensions(&self, explicit: &[String]) -> Vec<String> {
        let source = if explicit.is_empty() {
            &self.config.import.extensions
        } else {
            explicit
        };
        let mut extensions: Vec<String> = Vec::new();
        for ext in source {
            let ext = ext.trim_start_matches('.');
            if !ext.is_empty() && !extensions.iter().any(|e| e == ext) {
                extensions.push(ext.to_string());
            }
        }
        extensions
    }
}

/// Walks up from `start` looking for the nearest directory containing `mdata.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolves and loads the project from global CLI args.
///
/// If `--config` names a file, that file is loaded and its directory is the
/// root; if it names a directory, that directory is the root. Otherwise the
/// nearest ancestor with `mdata.toml` is used, falling back to the current
/// directory with default settings.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            let content = std::fs::read_to_string(&p)?;
            let config = mdata_config::load_config_from_str(&content)?;
            let root = p
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            return Ok(Project { root, config });
        }
        let config = mdata_config::load_or_default(&p)?;
        return Ok(Project { root: p, config });
    }

    let cwd = std::env::current_dir()?;
    let root = find_project_root(&cwd).unwrap_or(cwd);
    let config = mdata_config::load_or_default(&root)?;
    Ok(Project { root, config })
}

/// Global args pointing `--config` at `path`, for command tests.
#[cfg(test)]
pub(crate) fn global_for(path: &Path) -> GlobalArgs {
    GlobalArgs {
        quiet: true,
        verbose: false,
        config: Some(path.display().to_string()),
    }
}
