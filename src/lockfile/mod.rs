//! Lock generation for `Gomfile.lock`.
//!
//! The lock is a filtered projection of the `Gomfile`: entries that do not apply
//! to the active [`BuildContext`] are dropped, the rest keep their order and are
//! pinned to the revision checked out under the vendor tree when one can be
//! determined.
//!
//! # Format
//!
//! ```text
//! gom 'github.com/mattn/go-sqlite3', :commit => '3f45aefa8dc8e0b8bd2b1ba1b3b0e1b9c1a6d1b2'
//! gom 'example.com/unversioned'
//! ```
//!
//! Pinning is best-effort. A dependency without a repository root, a missing
//! VCS executable or a failing revision command only means that entry has no
//! `:commit`; it never aborts lock generation. Writing the lock file is the
//! only fatal step.
//!
//! After the lock is written, [`sanitize`] strips the vendor tree of VCS
//! metadata so it can be committed as plain files.

pub mod sanitize;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::manifest::filter::BuildContext;
use crate::manifest::Dependency;
use crate::utils::fs::write_new_file;
use crate::vcs::{RevisionSource, VcsRoot, locate_root};

/// Resolves manifest entries against a vendor tree
pub struct LockGenerator<'a, R: RevisionSource> {
    vendor_src: PathBuf,
    context: &'a BuildContext,
    revisions: R,
}

impl<'a, R: RevisionSource> LockGenerator<'a, R> {
    /// Creates a generator for the vendor `src` directory `vendor_src`.
    pub fn new(vendor_src: impl Into<PathBuf>, context: &'a BuildContext, revisions: R) -> Self {
        Self {
            vendor_src: vendor_src.into(),
            context,
            revisions,
        }
    }

    /// Filters and pins `entries`.
    ///
    /// Entries are processed in the order given; the result keeps that order.
    pub fn generate(&self, entries: impl IntoIterator<Item = Dependency>) -> LockManifest {
        let mut lock = LockManifest::default();

        for mut dep in self.context.filter(entries) {
            if let Some(root) = locate_root(&self.vendor_src, &dep.name) {
                match self.revisions.revision(&root) {
                    Some(rev) => {
                        tracing::debug!("Pinned '{}' to {} {}", dep.name, root.vcs.kind, rev);
                        dep.set_commit(rev);
                    }
                    None => tracing::info!("'{}' left unpinned", dep.name),
                }
                if !lock.roots.contains(&root) {
                    lock.roots.push(root);
                }
            } else {
                tracing::info!("'{}' has no repository under {}", dep.name, self.vendor_src.display());
            }
            lock.entries.push(dep);
        }

        lock
    }
}

/// The resolved lock: entries plus the repository roots they resolved to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockManifest {
    /// Filtered entries in manifest order
    pub entries: Vec<Dependency>,
    /// Distinct repository roots found while pinning, in discovery order
    pub roots: Vec<VcsRoot>,
}

impl LockManifest {
    /// Renders the lock, one line per entry.
    ///
    /// Only the `commit` option is written; `group`/`goos` tags have already been
    /// applied.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for dep in &self.entries {
            match dep.commit() {
                Some(rev) => out.push_str(&format!("gom '{}', :commit => '{}'\n", dep.name, rev)),
                None => out.push_str(&format!("gom '{}'\n", dep.name)),
            }
        }
        out
    }

    /// Number of entries without a pinned revision.
    #[must_use]
    pub fn unpinned_count(&self) -> usize {
        self.entries.iter().filter(|d| d.commit().is_none()).count()
    }

    /// Writes the lock to a new file, refusing to overwrite.
    pub fn write_new(&self, path: &Path) -> Result<()> {
        write_new_file(path, &self.render())
    }
}
