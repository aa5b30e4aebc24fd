//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CacheConfig;
use std::path::Path;

/// Name of the configuration file within a project directory.
pub const CONFIG_FILE: &str = "mdata.toml";

/// Loads and validates an `mdata.toml` configuration from a project directory.
///
/// Reads `<project_dir>/mdata.toml`, parses it, and validates its values.
pub fn load_config(project_dir: &Path) -> Result<CacheConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but returns the default configuration when the
/// project has no `mdata.toml`.
pub fn load_or_default(project_dir: &Path) -> Result<CacheConfig, ConfigError> {
    if project_dir.join(CONFIG_FILE).is_file() {
        load_config(project_dir)
    } else {
        Ok(CacheConfig::default())
    }
}

/// Parses and validates an `mdata.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CacheConfig, ConfigError> {
    let config: CacheConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that sidecar naming and import extensions are usable.
fn validate_config(config: &CacheConfig) -> Result<(), ConfigError> {
    let ext = &config.sidecar.extension;
    if ext.is_empty() {
        return Err(ConfigError::ValidationError(
            "sidecar.extension is empty".to_string(),
        ));
    }
    if ext.starts_with('.') || ext.contains(|c| c == '/' || c == '\\') {
        return Err(ConfigError::ValidationError(format!(
            "sidecar.extension '{ext}' must be a bare extension"
        )));
    }
    for import_ext in &config.import.extensions {
        if import_ext.trim_start_matches('.').is_empty() {
            return Err(ConfigError::ValidationError(
                "import.extensions contains an empty extension".to_string(),
            ));
        }
        if import_ext.trim_start_matches('.') == ext {
            return Err(ConfigError::ValidationError(format!(
                "import.extensions cannot include the sidecar extension '{ext}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.assets.root, PathBuf::from("data"));
        assert_eq!(config.sidecar.extension, "mdata");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[assets]
root = "assets/raw"
recursive = false

[sidecar]
extension = "meta"

[import]
extensions = ["mesh", ".png"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.assets.root, PathBuf::from("assets/raw"));
        assert!(!config.assets.recursive);
        assert_eq!(config.sidecar.extension, "meta");
        assert_eq!(config.import.extensions, vec!["mesh", ".png"]);
    }

    #[test]
    fn empty_sidecar_extension_errors() {
        let err = load_config_from_str("[sidecar]\nextension = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn dotted_sidecar_extension_errors() {
        let err = load_config_from_str("[sidecar]\nextension = \".mdata\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn importing_sidecar_extension_errors() {
        let err = load_config_from_str("[import]\nextensions = [\"mdata\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(dir.path()).unwrap();
        assert!(config.assets.recursive);
    }

    #[test]
    fn existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[assets]\nroot = \"src\"\n").unwrap();
        let config = load_or_default(dir.path()).unwrap();
        assert_eq!(config.assets.root, PathBuf::from("src"));
    }
}
