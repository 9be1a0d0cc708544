//! Common test utilities for GOM integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use gom_cli::test_utils::GoTree;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A project directory plus a private GOPATH, both inside one temp tree
///
/// ```text
/// <tmp>/project/            Go sources, Gomfile, Gomfile.lock
/// <tmp>/project/_vendor/src vendored dependencies
/// <tmp>/gopath/src          GOPATH packages
/// ```
pub struct TestProject {
    pub tree: GoTree,
}

impl TestProject {
    pub fn new() -> Self {
        let tree = GoTree::new();
        tree.mkdir("project");
        tree.mkdir("gopath/src");
        Self {
            tree,
        }
    }

    pub fn project_path(&self) -> PathBuf {
        self.tree.path("project")
    }

    pub fn vendor_src(&self) -> PathBuf {
        self.tree.path("project/_vendor/src")
    }

    /// Writes a package of the project itself (`rel` is relative to the project).
    pub fn project_package(&self, rel: &str, package: &str, imports: &[&str]) {
        let dir = if rel.is_empty() { "project".to_string() } else { format!("project/{rel}") };
        self.tree.write_package(&dir, package, imports);
    }

    /// Writes a vendored package at `_vendor/src/<import_path>`.
    pub fn vendor_package(&self, import_path: &str, package: &str, imports: &[&str]) -> PathBuf {
        self.tree.write_package(&format!("project/_vendor/src/{import_path}"), package, imports);
        self.vendor_src().join(import_path)
    }

    /// Writes a package under the private GOPATH.
    pub fn gopath_package(&self, import_path: &str, package: &str, imports: &[&str]) {
        self.tree.write_package(&format!("gopath/src/{import_path}"), package, imports);
    }

    pub fn write_gomfile(&self, content: &str) {
        self.tree.write_file("project/Gomfile", content);
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.project_path().join(rel)).unwrap()
    }

    /// `gom` with the project dir set and the environment isolated from the host.
    pub fn gom(&self) -> Command {
        let mut cmd = Command::cargo_bin("gom").unwrap();
        cmd.current_dir(self.tree.root())
            .arg("--project-dir")
            .arg(self.project_path())
            .env("GOPATH", self.tree.path("gopath"))
            .env("NO_COLOR", "1")
            .env_remove("GOM_ENV")
            .env_remove("GOOS")
            .env_remove("GOM_VENDOR_NAME")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Number of files under `root`, skipping anything inside a directory named `skip`.
pub fn count_files(root: &Path, skip: &str) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != skip)
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}

/// Whether the `git` binary is usable; tests needing it return early otherwise.
pub fn git_available() -> bool {
    gom_cli::test_utils::TestGit::available()
}
