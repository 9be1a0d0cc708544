//! Run configuration for the generators.
//!
//! [`Settings`] gathers everything a generator needs to know about where it runs:
//! the project directory, the vendor directory, the GOPATH entries used as extra
//! package search roots, and the [`BuildContext`] the conditional filter matches
//! against. The CLI builds it from flags and environment variables (flags win);
//! library code only ever reads it.
//!
//! # Vendor layout
//!
//! The vendor directory is a GOPATH entry of its own:
//!
//! ```text
//! <project>/_vendor/
//! └── src/
//!     ├── github.com/org/repo/   <- dependency sources (+ .git until sanitized)
//!     └── _internal_roots/       <- synthetic roots, removed after pinning
//! ```

use std::path::PathBuf;

use crate::constants::{ENV_GOPATH, GOMFILE, GOMFILE_LOCK, TRAVIS_YML, VENDOR_SRC_DIR};

pub use crate::manifest::filter::BuildContext;

/// Resolved settings for a single generator invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory containing the Go sources and the generated files
    pub project_dir: PathBuf,
    /// Vendor directory, absolute or relative to `project_dir`
    pub vendor_dir: PathBuf,
    /// GOPATH `src` directories searched after the vendor tree
    pub gopath_src: Vec<PathBuf>,
    /// Active build context for the conditional filter
    pub context: BuildContext,
}

impl Settings {
    /// Creates settings with GOPATH search roots taken from the environment.
    pub fn new(
        project_dir: impl Into<PathBuf>,
        vendor_dir: impl Into<PathBuf>,
        context: BuildContext,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            vendor_dir: vendor_dir.into(),
            gopath_src: go_search_roots(),
            context,
        }
    }

    /// Replaces the GOPATH search roots.
    #[must_use]
    pub fn with_gopath_src(mut self, roots: Vec<PathBuf>) -> Self {
        self.gopath_src = roots;
        self
    }

    /// Path of the `Gomfile`.
    #[must_use]
    pub fn gomfile_path(&self) -> PathBuf {
        self.project_dir.join(GOMFILE)
    }

    /// Path of the `Gomfile.lock`.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.project_dir.join(GOMFILE_LOCK)
    }

    /// Path of the `.travis.yml`.
    #[must_use]
    pub fn travis_path(&self) -> PathBuf {
        self.project_dir.join(TRAVIS_YML)
    }

    /// The vendor directory. `Path::join` keeps absolute vendor paths as they are.
    #[must_use]
    pub fn vendor_root(&self) -> PathBuf {
        self.project_dir.join(&self.vendor_dir)
    }

    /// The `src` directory under the vendor root, where dependencies live.
    #[must_use]
    pub fn vendor_src(&self) -> PathBuf {
        self.vendor_root().join(VENDOR_SRC_DIR)
    }

    /// Package search roots in lookup order: vendor tree first, then GOPATH.
    #[must_use]
    pub fn search_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(self.gopath_src.len() + 1);
        roots.push(self.vendor_src());
        for root in &self.gopath_src {
            if !roots.contains(root) {
                roots.push(root.clone());
            }
        }
        roots
    }
}

/// Returns the `src` directories of every GOPATH entry.
///
/// Honours `GOPATH` (split with the platform path-list separator). When unset or
/// empty, falls back to Go's default of `$HOME/go`.
#[must_use]
pub fn go_search_roots() -> Vec<PathBuf> {
    if let Some(value) = std::env::var_os(ENV_GOPATH).filter(|v| !v.is_empty()) {
        return gopath_entries(&value);
    }

    dirs::home_dir().map(|home| vec![home.join("go").join("src")]).unwrap_or_default()
}

fn gopath_entries(value: &std::ffi::OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join("src"))
        .collect()
}
