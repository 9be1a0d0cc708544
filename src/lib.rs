//! GOM - Gomfile generator for Go source trees
//!
//! Discovers the third-party packages a Go source tree imports, records them in a
//! `Gomfile`, and pins each one to the revision currently checked out under the
//! project's vendor directory in `Gomfile.lock`. After pinning, version-control
//! metadata is stripped from the vendored trees so they can be committed without
//! nested repositories.
//!
//! # Architecture Overview
//!
//! The pipeline is manifest/lockfile based:
//! - `Gomfile` lists external import paths (sorted, one `gom '...'` line each)
//! - `Gomfile.lock` lists the subset that applies to the current build context,
//!   each with a `:commit` when the vendored copy lives in a known repository
//! - The vendor tree (`_vendor/src/<import path>`) is never fetched, only read
//!   and sanitized
//!
//! # Core Modules
//!
//! - [`import`] - Recursive import-graph scanner, the Go package loader and build constraints
//! - [`vcs`] - Backend descriptors (git, hg, bzr), root locator, revision queries
//! - [`manifest`] - Gomfile entries, parser, renderer and the conditional filter
//! - [`lockfile`] - Lock generation and vendor sanitization
//! - [`generate`] - Orchestration behind the `gom gen ...` commands
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface and logging setup
//! - [`config`] - Build context and search-root resolution
//! - [`core`] - Error types and user-facing error formatting
//! - [`templates`] - Static CI configuration writer
//! - [`utils`] - Filesystem and platform helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use gom_cli::config::{BuildContext, Settings};
//! use gom_cli::generate::{gen_gomfile, gen_lockfile};
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = Settings::new(".", "_vendor", BuildContext::new(["development"], "linux"));
//! gen_gomfile(&settings)?;
//! gen_lockfile(&settings)?;
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Dependency discovery and pinning
pub mod import;
pub mod lockfile;
pub mod manifest;
pub mod vcs;

// Supporting modules
pub mod generate;
pub mod templates;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
