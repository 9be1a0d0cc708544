//! Vendor tree cleanup after pinning.
//!
//! Only two kinds of directories are ever removed: the `_internal_roots` sentinel
//! directory under the vendor `src` directory, and the metadata directory
//! (`.git`, `.hg`, `.bzr`) of each repository root found while pinning. Source
//! files are never touched. Every removal is best-effort.

use std::path::Path;

use crate::constants::INTERNAL_ROOTS_DIR;
use crate::utils::fs::remove_dir_best_effort;
use crate::vcs::VcsRoot;

/// Removes the `_internal_roots` placeholder tree. Returns `true` if it existed.
pub fn remove_internal_roots(vendor_src: &Path) -> bool {
    remove_dir_best_effort(&vendor_src.join(INTERNAL_ROOTS_DIR))
}

/// Deletes the metadata directory of each root, returning how many were removed.
pub fn sanitize<'a>(roots: impl IntoIterator<Item = &'a VcsRoot>) -> usize {
    let mut removed = 0;
    for root in roots {
        let metadata = root.metadata_path();
        if remove_dir_best_effort(&metadata) {
            tracing::debug!("Stripped {} metadata from {}", root.vcs.kind, root.path.display());
            removed += 1;
        }
    }
    removed
}
