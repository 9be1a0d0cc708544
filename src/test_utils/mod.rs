//! Test utilities for GOM
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`GoTree`] builds throwaway Go source trees and vendor directories
//! - [`TestGit`] drives the `git` binary to create vendored repositories
//! - [`init_test_logging`] wires `tracing` output into the test harness
//!
//! # Example
//!
//! ```rust,no_run
//! use gom_cli::test_utils::GoTree;
//!
//! let tree = GoTree::new();
//! tree.write_package("project", "main", &["fmt", "example.com/lib"]);
//! tree.write_package("project/_vendor/src/example.com/lib", "lib", &[]);
//! assert!(tree.path("project/main.go").exists());
//! ```

pub mod fixtures;
pub mod git_helper;

pub use fixtures::GoTree;
pub use git_helper::TestGit;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None`, logging is enabled only when
/// `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=vcs=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
