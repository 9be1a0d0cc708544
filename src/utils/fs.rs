//! File system helpers for generated files and vendor cleanup.
//!
//! Two policies live here:
//! - Output files (`Gomfile`, `Gomfile.lock`, `.travis.yml`) are created with
//!   create-new semantics and written atomically: content goes to a temporary file
//!   in the target directory which is then linked into place without clobbering.
//!   A failure leaves no partial file behind and an existing file is reported as
//!   [`GomError::AlreadyExists`].
//! - Cleanup removals are best-effort: failures are logged and reported as `false`
//!   so a single unreadable directory never blocks the rest of a cleanup pass.

use crate::core::GomError;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Fails with [`GomError::AlreadyExists`] if `path` exists.
///
/// Generators call this before doing any work so a refused run has no side effects.
pub fn ensure_absent(path: &Path) -> Result<(), GomError> {
    if path.exists() {
        return Err(GomError::AlreadyExists {
            path: display_name(path),
        });
    }
    Ok(())
}

/// Atomically creates `path` with `content`, refusing to overwrite.
///
/// # Errors
///
/// - [`GomError::AlreadyExists`] if `path` exists, including when another process
///   created it between the check and the final link
/// - [`GomError::FileSystem`] if the temporary file cannot be created, written or
///   moved into place
pub fn write_new_file(path: &Path, content: &str) -> Result<()> {
    ensure_absent(path)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".gom-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|_| GomError::FileSystem {
            operation: "create temporary file in".to_string(),
            path: parent.display().to_string(),
        })?;

    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;

    temp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            GomError::AlreadyExists {
                path: display_name(path),
            }
        } else {
            tracing::debug!("persist of {} failed: {}", path.display(), e.error);
            GomError::FileSystem {
                operation: "write".to_string(),
                path: path.display().to_string(),
            }
        }
    })?;

    tracing::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Recursively removes a directory, ignoring failures.
///
/// Returns `true` when something was removed. A missing directory is not a failure
/// and is not logged; any other error is logged at `warn` level.
pub fn remove_dir_best_effort(path: &Path) -> bool {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!("Removed {}", path.display());
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Returns `true` if `path` is an existing directory (symlinks followed).
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

// File name for messages, matching how users refer to generated files.
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
