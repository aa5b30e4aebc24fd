//! `mdata check`: parse every sidecar under the asset root.

use std::path::Path;

use mdata_cache::{AssetFs, DiskFs};

use crate::project::load_project;
use crate::GlobalArgs;

/// Result of checking one sidecar.
#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Clean,
    /// Removed between listing and reading.
    Gone,
    Corrupt(String),
    Unreadable(String),
}

/// Runs the `mdata check` command.
///
/// Returns exit code 0 if every sidecar parses, 1 if any is corrupt or
/// cannot be read.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let options = project.registry_options();

    let sidecars: Vec<_> = DiskFs
        .list(&options.asset_root, options.recursive)?
        .into_iter()
        .filter(|file| file.extension == options.sidecar_extension)
        .collect();

    let mut failed = 0usize;
    for sidecar in &sidecars {
        match check_sidecar(&DiskFs, &sidecar.path) {
            Verdict::Clean | Verdict::Gone => {}
            Verdict::Corrupt(message) | Verdict::Unreadable(message) => {
                eprintln!("error: {message}");
                failed += 1;
            }
        }
    }

    if !global.quiet {
        eprintln!(
            "    Checked {} sidecars, {} failed",
            sidecars.len(),
            failed
        );
    }

    Ok(if failed == 0 { 0 } else { 1 })
}

fn check_sidecar<F: AssetFs>(fs: &F, path: &Path) -> Verdict {
    match fs.read(path) {
        Ok(Some(data)) => match mdata_codec::parse(&data) {
            Ok(_) => Verdict::Clean,
            Err(e) => Verdict::Corrupt(format!("corrupt sidecar {}: {e}", path.display())),
        },
        Ok(None) => Verdict::Gone,
        Err(e) => Verdict::Unreadable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::global_for;
    use mdata_cache::{CacheError, SourceFile};
    use std::path::PathBuf;
    use std::time::SystemTime;

    /// Filesystem whose reads always fail.
    struct BrokenFs;

    impl AssetFs for BrokenFs {
        fn list(&self, _: &Path, _: bool) -> Result<Vec<SourceFile>, CacheError> {
            Ok(Vec::new())
        }

        fn modified(&self, _: &Path) -> Result<SystemTime, CacheError> {
            Ok(SystemTime::UNIX_EPOCH)
        }

        fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn write(&self, _: &Path, _: &[u8]) -> Result<(), CacheError> {
            Ok(())
        }
    }

    #[test]
    fn clean_tree_passes() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(data.join("sub")).unwrap();
        std::fs::write(data.join("a.mesh.mdata"), "int n 1\n").unwrap();
        std::fs::write(data.join("sub").join("b.png.mdata"), "bin_data x AAE=\n").unwrap();
        assert_eq!(run(&global_for(dir.path())).unwrap(), 0);
    }

    #[test]
    fn corrupt_sidecar_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("a.mesh.mdata"), "int n 1\n").unwrap();
        std::fs::write(data.join("b.mesh.mdata"), "int n notanumber\n").unwrap();
        assert_eq!(run(&global_for(dir.path())).unwrap(), 1);
    }

    #[test]
    fn missing_asset_root_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run(&global_for(dir.path())).unwrap(), 0);
    }

    #[test]
    fn unreadable_sidecar_is_a_failure() {
        let path = PathBuf::from("data/a.mesh.mdata");
        match check_sidecar(&BrokenFs, &path) {
            Verdict::Unreadable(message) => assert!(message.contains("a.mesh.mdata")),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn verdicts_for_disk_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.mesh.mdata");
        let bad = dir.path().join("b.mesh.mdata");
        std::fs::write(&good, "string hash abc\n").unwrap();
        std::fs::write(&bad, "string hash abc").unwrap();

        assert_eq!(check_sidecar(&DiskFs, &good), Verdict::Clean);
        assert!(matches!(check_sidecar(&DiskFs, &bad), Verdict::Corrupt(_)));
        assert_eq!(
            check_sidecar(&DiskFs, &dir.path().join("gone.mesh.mdata")),
            Verdict::Gone
        );
    }
}
