//! `mdata status`: list assets without sidecars and sidecars without assets.

use std::collections::BTreeSet;
use std::path::PathBuf;

use mdata_cache::{sidecar_path, AssetFs, DiskFs, SourceFile};

use crate::project::load_project;
use crate::{GlobalArgs, StatusArgs};

/// Sidecar coverage of an asset tree.
#[derive(Debug, Default, PartialEq, Eq)]
struct Status {
    /// Assets of the inspected extensions that have no sidecar yet.
    missing: Vec<PathBuf>,
    /// Sidecars whose asset no longer exists.
    orphaned: Vec<PathBuf>,
}

/// Runs the `mdata status` command.
///
/// Always returns exit code 0; the listing is informational.
pub fn run(args: &StatusArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let extensions = project.extensions(&args.extensions);
    let options = project.registry_options();

    let files = DiskFs.list(&options.asset_root, options.recursive)?;
    let status = compute(&files, &extensions, &options.sidecar_extension);

    for path in &status.missing {
        println!("missing  {}", path.display());
    }
    for path in &status.orphaned {
        println!("orphaned {}", path.display());
    }
    if !global.quiet {
        eprintln!(
            "    {} assets without sidecars, {} orphaned sidecars",
            status.missing.len(),
            status.orphaned.len()
        );
    }
    Ok(0)
}

/// Compares the listed files against each other. An empty `extensions` list
/// inspects every non-sidecar file.
fn compute(files: &[SourceFile], extensions: &[String], sidecar_extension: &str) -> Status {
    let present: BTreeSet<&PathBuf> = files.iter().map(|f| &f.path).collect();
    let mut status = Status::default();

    for file in files {
        if file.extension == sidecar_extension {
            let source = file.path.with_extension("");
            if !present.contains(&source) {
                status.orphaned.push(file.path.clone());
            }
            continue;
        }
        let wanted = extensions.is_empty() || extensions.iter().any(|e| *e == file.extension);
        if wanted && !present.contains(&sidecar_path(&file.path, sidecar_extension)) {
            status.missing.push(file.path.clone());
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::global_for;

    fn files(paths: &[&str]) -> Vec<SourceFile> {
        paths
            .iter()
            .filter_map(|p| SourceFile::from_path(std::path::Path::new(p)))
            .collect()
    }

    #[test]
    fn finds_missing_and_orphaned() {
        let listed = files(&[
            "data/a.mesh",
            "data/a.mesh.mdata",
            "data/b.mesh",
            "data/c.png",
            "data/gone.mesh.mdata",
        ]);
        let status = compute(&listed, &["mesh".to_string()], "mdata");
        assert_eq!(status.missing, vec![PathBuf::from("data/b.mesh")]);
        assert_eq!(status.orphaned, vec![PathBuf::from("data/gone.mesh.mdata")]);
    }

    #[test]
    fn no_extensions_inspects_everything() {
        let listed = files(&["data/a.mesh", "data/c.png", "data/c.png.mdata"]);
        let status = compute(&listed, &[], "mdata");
        assert_eq!(status.missing, vec![PathBuf::from("data/a.mesh")]);
        assert!(status.orphaned.is_empty());
    }

    #[test]
    fn run_on_project() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("tree.mesh"), b"mesh").unwrap();
        let args = StatusArgs {
            extensions: vec!["mesh".to_string()],
        };
        assert_eq!(run(&args, &global_for(dir.path())).unwrap(), 0);
    }
}
