//! Throwaway Go source trees

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding Go packages, vendor trees and GOPATH roots
///
/// Panics on I/O failure; meant for tests only.
pub struct GoTree {
    temp_dir: TempDir,
}

impl GoTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    #[must_use]
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Writes `content` to `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes a one-file Go package at `dir` declaring `package` and importing
    /// `imports`. The file is named after the package (`main.go`, `lib.go`, ...).
    pub fn write_package(&self, dir: &str, package: &str, imports: &[&str]) -> PathBuf {
        let rel = format!("{dir}/{package}.go");
        self.write_file(&rel, &go_source(package, imports))
    }

    /// Creates an empty directory (e.g. a fake `.hg` metadata dir).
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }
}

impl Default for GoTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a minimal Go file with a grouped import block.
#[must_use]
pub fn go_source(package: &str, imports: &[&str]) -> String {
    let mut src = format!("package {package}\n\n");
    if !imports.is_empty() {
        src.push_str("import (\n");
        for imp in imports {
            src.push_str(&format!("\t\"{imp}\"\n"));
        }
        src.push_str(")\n\n");
    }
    if package == "main" {
        src.push_str("func main() {}\n");
    }
    src
}
