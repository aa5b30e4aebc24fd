//! `mdata dump`: print the fields of one sidecar.

use std::path::{Path, PathBuf};

use mdata_cache::{sidecar_path, AssetFs, DiskFs};
use mdata_store::MetadataFile;

use crate::project::load_project;
use crate::{DumpArgs, DumpFormat, GlobalArgs};

/// Runs the `mdata dump` command.
///
/// `args.path` may name either a sidecar or the asset it describes. Prints the
/// sidecar to stdout in the requested format.
pub fn run(args: &DumpArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let path = resolve_sidecar(Path::new(&args.path), &project.config.sidecar.extension);

    let Some(data) = DiskFs.read(&path)? else {
        return Err(format!("no sidecar at {}", path.display()).into());
    };
    let metadata = mdata_codec::parse(&data)
        .map_err(|e| format!("corrupt sidecar {}: {e}", path.display()))?;

    print!("{}", render(&metadata, args.format)?);
    Ok(0)
}

/// Maps an asset path to its sidecar; sidecar paths are returned unchanged.
fn resolve_sidecar(path: &Path, sidecar_extension: &str) -> PathBuf {
    let is_sidecar = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == sidecar_extension);
    if is_sidecar {
        path.to_path_buf()
    } else {
        sidecar_path(path, sidecar_extension)
    }
}

fn render(metadata: &MetadataFile, format: DumpFormat) -> Result<String, serde_json::Error> {
    match format {
        DumpFormat::Text => Ok(mdata_codec::serialize(metadata)),
        DumpFormat::Json => {
            let fields: Vec<serde_json::Value> = metadata
                .fields()
                .map(|field| {
                    serde_json::json!({
                        "name": field.name().as_str(),
                        "type": field.value().kind().token(),
                        "value": field.value(),
                        "sticky": field.is_sticky(),
                    })
                })
                .collect();
            let mut out = serde_json::to_string_pretty(&fields)?;
            out.push('\n');
            Ok(out)
        }
    }
}
