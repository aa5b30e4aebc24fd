//! The `mdata` CLI: maintenance commands for asset metadata sidecars.
//!
//! Provides `mdata import` for refreshing sidecars with file fingerprints,
//! `mdata dump` for printing a sidecar, `mdata check` for validating every
//! sidecar in the asset tree, and `mdata status` for listing sources without
//! sidecars and sidecars without sources.

#![warn(missing_docs)]

mod check;
mod dump;
mod fingerprint;
mod hash;
mod import;
mod project;
mod status;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Command-line interface for the asset metadata sidecar cache.
#[derive(Parser, Debug)]
#[command(name = "mdata", version, about = "Asset metadata sidecar cache")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `mdata.toml` configuration file or project directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh sidecars for every matching asset.
    Import(ImportArgs),
    /// Print the fields of one sidecar.
    Dump(DumpArgs),
    /// Parse every sidecar under the asset root and report corrupt ones.
    Check,
    /// List assets without sidecars and sidecars without assets.
    Status(StatusArgs),
}

/// Arguments for the `mdata import` subcommand.
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Extensions to import (default: `import.extensions` from `mdata.toml`).
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Vec<String>,
}

/// Arguments for the `mdata dump` subcommand.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// An asset path or a sidecar path.
    pub path: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = DumpFormat::Text)]
    pub format: DumpFormat,
}

/// Arguments for the `mdata status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Extensions to inspect (default: `import.extensions` from `mdata.toml`).
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Vec<String>,
}

/// Output format for `mdata dump`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// The sidecar text format.
    Text,
    /// Machine-readable JSON with sticky flags.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file or project directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Import(ref args) => import::run(args, &global),
        Command::Dump(ref args) => dump::run(args, &global),
        Command::Check => check::run(&global),
        Command::Status(ref args) => status::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` directives are honored on
/// top of the level chosen by `--quiet` / `--verbose`.
fn init_logging(global: &GlobalArgs) {
    let level = if global.quiet {
        tracing::Level::ERROR
    } else if global.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
