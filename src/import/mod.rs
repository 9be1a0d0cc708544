//! Import graph scanning
//!
//! Walks the import graph of a Go package and collects every external import
//! path reachable from it. Each declared import is classified with a fixed
//! heuristic ([`classify`]):
//!
//! - **standard**: the path contains no `.` (`fmt`, `net/http`); ignored
//! - **local**: a relative path (`./util`, `../shared`); explored, never recorded
//! - **external**: everything else; recorded *and* explored
//!
//! Distinct import strings are kept distinct: `host/org/repo` and
//! `host/org/repo/sub` are two entries even though they share a repository.
//!
//! Package lookup and parsing sit behind the [`PackageLoader`] trait so the
//! traversal can be exercised without a Go tree on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use gom_cli::import::{ImportScanner, loader::GoPackageLoader};
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> anyhow::Result<()> {
//! let loader = GoPackageLoader::new(vec![PathBuf::from("_vendor/src")]);
//! let mut scanner = ImportScanner::new(loader);
//! let externals = scanner.scan(".", Path::new("."))?;
//! for path in &externals {
//!     println!("gom '{path}'");
//! }
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod loader;
pub mod source;

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::core::GomError;

/// Classification of an import path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Part of the Go distribution, never vendored
    Standard,
    /// Relative to the importing package
    Local,
    /// Third-party dependency
    External,
}

/// Returns `true` for `.`, `..` and paths starting with `./` or `../`.
#[must_use]
pub fn is_local_import(path: &str) -> bool {
    path == "." || path == ".." || path.starts_with("./") || path.starts_with("../")
}

/// Classifies an import path.
///
/// A path without any `.` is standard. This is an approximation kept exactly
/// as the Go tooling convention defines it.
#[must_use]
pub fn classify(path: &str) -> ImportKind {
    if !path.contains('.') {
        ImportKind::Standard
    } else if is_local_import(path) {
        ImportKind::Local
    } else {
        ImportKind::External
    }
}

/// Resolves import paths to package directories and lists their imports
pub trait PackageLoader {
    /// Resolves `import_path` as seen from the package in `src_dir`.
    ///
    /// The returned directory identifies the package: two calls that return
    /// the same directory refer to the same package.
    fn locate(&self, import_path: &str, src_dir: &Path) -> Result<PathBuf, GomError>;

    /// Lists the imports declared by the package in `dir`.
    fn imports(&self, dir: &Path) -> Result<Vec<String>, GomError>;
}

/// Recursive import-graph walker
///
/// Each call to [`scan`](Self::scan) starts from an empty visited set. Within
/// one scan a package reached through several import chains is loaded once.
pub struct ImportScanner<L: PackageLoader> {
    loader: L,
}

impl<L: PackageLoader> ImportScanner<L> {
    /// Creates a scanner backed by `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
        }
    }

    /// Collects the external imports reachable from `import_path`.
    ///
    /// # Errors
    ///
    /// Fails with [`GomError::PackageResolution`] on the first package that
    /// cannot be located or parsed; nothing collected so far is returned.
    pub fn scan(&mut self, import_path: &str, search_dir: &Path) -> Result<BTreeSet<String>, GomError> {
        let mut found = BTreeSet::new();
        let mut visited = HashSet::new();
        self.visit(import_path, search_dir, &mut visited, &mut found)?;
        tracing::info!("Found {} external imports from '{}'", found.len(), import_path);
        Ok(found)
    }

    fn visit(
        &self,
        import_path: &str,
        search_dir: &Path,
        visited: &mut HashSet<PathBuf>,
        found: &mut BTreeSet<String>,
    ) -> Result<(), GomError> {
        let dir = self.loader.locate(import_path, search_dir)?;
        if !visited.insert(dir.clone()) {
            tracing::trace!("Already scanned {}", dir.display());
            return Ok(());
        }
        tracing::debug!("Scanning '{}' in {}", import_path, dir.display());

        for imp in self.loader.imports(&dir)? {
            match classify(&imp) {
                ImportKind::Standard => {}
                ImportKind::External => {
                    record(found, &imp);
                    self.visit(&imp, &dir, visited, found)?;
                }
                ImportKind::Local => {
                    self.visit(&imp, &dir, visited, found)?;
                }
            }
        }
        Ok(())
    }

    /// Consumes the scanner, returning its loader.
    pub fn into_loader(self) -> L {
        self.loader
    }
}

fn record(found: &mut BTreeSet<String>, import_path: &str) {
    if found.insert(import_path.to_string()) {
        tracing::debug!("Recorded external import '{}'", import_path);
    }
}
