//! Parsing and validation of `mdata.toml` cache configuration files.
//!
//! This crate reads the optional project configuration and produces a
//! strongly-typed [`CacheConfig`]: where assets live, how sidecars are named,
//! and which extensions the import command handles.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_or_default, CONFIG_FILE};
pub use types::*;
