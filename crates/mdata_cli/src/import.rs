//! `mdata import`: refresh sidecars for every matching asset.
//!
//! 1. Resolve the project and its extension list
//! 2. Register a [`FingerprintHandler`] per extension, which scans the asset
//!    tree, refreshes each sidecar, and writes it back
//! 3. Report handler failures

use mdata_cache::{HandlerStage, Registry, ScanReport};

use crate::fingerprint::FingerprintHandler;
use crate::project::load_project;
use crate::{GlobalArgs, ImportArgs};

/// Runs the `mdata import` command.
///
/// Returns exit code 0 if every asset was refreshed, 1 if any handler failed.
pub fn run(args: &ImportArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let extensions = project.extensions(&args.extensions);
    if extensions.is_empty() {
        return Err("no extensions to import; pass --ext or set import.extensions".into());
    }

    let options = project.registry_options();
    if !global.quiet {
        eprintln!("   Importing {}", options.asset_root.display());
    }

    let mut registry = Registry::new(options);
    let mut report = ScanReport::default();
    for extension in &extensions {
        let scan = registry.register_extension_handler(extension, FingerprintHandler)?;
        if !global.quiet {
            eprintln!("   {:>9} .{extension}: {} assets", "Refreshed", scan.processed);
        }
        report.processed += scan.processed;
        report.failures.extend(scan.failures);
    }

    for failure in &report.failures {
        let stage = match failure.stage {
            HandlerStage::Refresh => "refresh",
            HandlerStage::Consume => "consume",
        };
        eprintln!(
            "error: {stage} failed for {}: {}",
            failure.path.display(),
            failure.message
        );
    }

    if !global.quiet {
        eprintln!(
            "    Finished {} assets, {} failures",
            report.processed,
            report.failures.len()
        );
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}
