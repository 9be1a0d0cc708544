//! Command-line interface for GOM.
//!
//! ```text
//! gom [--verbose | --quiet] [--project-dir DIR] gen <TARGET>
//!
//! TARGET:
//!   gomfile      scan the project's imports and write Gomfile
//!   lock         pin vendored revisions into Gomfile.lock, then sanitize _vendor
//!   travis-yml   write .travis.yml
//! ```
//!
//! # Environment
//!
//! - `GOM_ENV` - active build context(s) for `gen lock` (comma separated, default `development`)
//! - `GOOS` - target operating system for `gen lock` (default: the host OS)
//! - `GOM_VENDOR_NAME` - vendor directory (default `_vendor`)
//! - `GOPATH` - additional package search roots for `gen gomfile`
//! - `RUST_LOG` - log filter when neither `--verbose` nor `--quiet` is given
//!
//! Flags take precedence over environment variables. Logs go to stderr; the
//! "... is generated" messages go to stdout.

pub mod generate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Logging configuration derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// `EnvFilter` directive, or `None` to defer to `RUST_LOG`
    pub log_filter: Option<String>,
}

impl CliConfig {
    /// Installs the global `tracing` subscriber writing to stderr.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = match &self.log_filter {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }
}

/// Gomfile generator for Go source trees
#[derive(Parser, Debug)]
#[command(
    name = "gom",
    about = "Gomfile generator - record and pin the packages a Go project imports",
    version,
    long_about = "Scans a Go source tree for third-party imports, writes them to a Gomfile and pins \
                  the vendored copies in Gomfile.lock."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output (equivalent to `RUST_LOG=debug`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable logging. Errors are still reported.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Project directory containing the Go sources and the generated files.
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate project files.
    ///
    /// See [`generate::GenCommand`] for the available targets.
    Gen(generate::GenCommand),
}

impl Cli {
    /// Sets up logging and runs the selected command.
    pub fn execute(self) -> Result<()> {
        self.build_config().init_logging();

        match self.command {
            Commands::Gen(cmd) => cmd.execute(&self.project_dir),
        }
    }

    /// Derives the logging configuration from `--verbose` / `--quiet`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_filter = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("off".to_string())
        } else {
            None
        };

        CliConfig {
            log_filter,
        }
    }
}
