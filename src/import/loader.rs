//! Go package loader backed by the filesystem.
//!
//! Resolves import paths the way a GOPATH-style Go workspace does: local imports
//! (`./x`, `../x`) relative to the importing package's directory, everything else
//! under the first search root that contains it. The project's vendor `src`
//! directory is normally the first root, followed by the GOPATH entries.
//!
//! Files excluded by build constraints for the loader's [`BuildTarget`] are
//! skipped before their imports are read.

use std::fs;
use std::path::{Path, PathBuf};

use super::constraint::BuildTarget;
use super::source::parse_header;
use super::{PackageLoader, is_local_import};
use crate::core::GomError;

/// [`PackageLoader`] reading `.go` files from disk
#[derive(Debug, Clone)]
pub struct GoPackageLoader {
    roots: Vec<PathBuf>,
    target: BuildTarget,
}

impl GoPackageLoader {
    /// Creates a loader searching `roots` in order for non-local imports,
    /// building for the host platform.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            target: BuildTarget::host(),
        }
    }

    /// Evaluates build constraints against `target` instead of the host.
    #[must_use]
    pub fn with_target(mut self, target: BuildTarget) -> Self {
        self.target = target;
        self
    }

    /// The platform build constraints are evaluated against.
    #[must_use]
    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    /// The search roots, in lookup order.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidate(&self, import_path: &str, src_dir: &Path) -> Option<PathBuf> {
        if is_local_import(import_path) {
            let dir = src_dir.join(import_path);
            return dir.is_dir().then_some(dir);
        }
        self.roots.iter().map(|root| root.join(import_path)).find(|dir| dir.is_dir())
    }
}

impl PackageLoader for GoPackageLoader {
    fn locate(&self, import_path: &str, src_dir: &Path) -> Result<PathBuf, GomError> {
        let resolution_error = |reason: String| GomError::PackageResolution {
            import_path: import_path.to_string(),
            dir: src_dir.display().to_string(),
            reason,
        };

        let dir = self.candidate(import_path, src_dir).ok_or_else(|| {
            if is_local_import(import_path) {
                resolution_error("directory does not exist".to_string())
            } else {
                let searched: Vec<String> =
                    self.roots.iter().map(|r| r.display().to_string()).collect();
                resolution_error(format!("not found in any of [{}]", searched.join(", ")))
            }
        })?;

        // Canonical form so the same package reached through different spellings
        // is only scanned once.
        fs::canonicalize(&dir).map_err(|e| resolution_error(e.to_string()))
    }

    fn imports(&self, dir: &Path) -> Result<Vec<String>, GomError> {
        let resolution_error = |reason: String| GomError::PackageResolution {
            import_path: dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            dir: dir.display().to_string(),
            reason,
        };

        let mut files = Vec::new();
        let entries = fs::read_dir(dir).map_err(|e| resolution_error(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| resolution_error(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_buildable_go_file(&name) && entry.path().is_file() {
                files.push(name);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(resolution_error("no buildable Go source files".to_string()));
        }

        let mut package: Option<(String, String)> = None;
        let mut imports: Vec<String> = Vec::new();
        for name in &files {
            if !self.target.matches_file_name(name) {
                tracing::trace!("Skipping {name}: file name excludes {}/{}", self.target.goos, self.target.goarch);
                continue;
            }
            let path = dir.join(name);
            let src = fs::read_to_string(&path)
                .map_err(|e| resolution_error(format!("cannot read {name}: {e}")))?;
            let included = self
                .target
                .matches_source(&src)
                .map_err(|reason| resolution_error(format!("{name}: {reason}")))?;
            if !included {
                tracing::trace!("Skipping {name}: build constraints exclude it");
                continue;
            }
            let header = parse_header(&src).map_err(|reason| resolution_error(format!("{name}: {reason}")))?;

            match &package {
                Some((first_pkg, first_file)) if *first_pkg != header.package => {
                    return Err(resolution_error(format!(
                        "found packages {first_pkg} ({first_file}) and {} ({name})",
                        header.package
                    )));
                }
                Some(_) => {}
                None => package = Some((header.package.clone(), name.clone())),
            }

            for imp in header.imports {
                if !imports.contains(&imp) {
                    imports.push(imp);
                }
            }
        }

        if package.is_none() {
            return Err(resolution_error(format!(
                "build constraints exclude all Go files for {}/{}",
                self.target.goos, self.target.goarch
            )));
        }

        tracing::trace!("{}: {} files, imports {:?}", dir.display(), files.len(), imports);
        Ok(imports)
    }
}

/// Files the loader considers part of a package.
fn is_buildable_go_file(name: &str) -> bool {
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('_')
        && !name.starts_with('.')
}
