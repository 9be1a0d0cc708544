//! Version-control backends for vendored dependencies
//!
//! Vendored dependencies are plain directories under `<vendor>/src`. Some of them are
//! (or live inside) working copies of a git, Mercurial or Bazaar repository. This
//! module answers two questions about a dependency:
//!
//! 1. **Where is its repository root, and which backend owns it?**
//!    [`locate_root`] starts at `<vendor src>/<import path>` and walks up one import
//!    path segment at a time, checking for each backend's metadata directory in the
//!    fixed priority order of [`BACKENDS`] (git, then hg, then bzr). A dependency
//!    imported through a sub-package such as `github.com/org/repo/sub` therefore
//!    still resolves to the root at `github.com/org/repo`.
//! 2. **Which revision is checked out there?** [`VcsDescriptor::revision`] runs the
//!    backend's command and reports failures as errors;
//!    [`RevisionSource::revision`] is the best-effort form used by lock generation,
//!    which turns every failure into "no revision".
//!
//! Adding a backend means adding a [`VcsKind`] and one entry to [`BACKENDS`]; the
//! locator itself never changes.

pub mod command_builder;

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::fs::is_dir;
use command_builder::VcsCommand;

/// Supported version-control systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    /// Git (`.git`)
    Git,
    /// Mercurial (`.hg`)
    Hg,
    /// Bazaar (`.bzr`)
    Bzr,
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Hg => write!(f, "hg"),
            Self::Bzr => write!(f, "bzr"),
        }
    }
}

/// Static description of one backend
#[derive(Debug, PartialEq, Eq)]
pub struct VcsDescriptor {
    /// Which backend this describes
    pub kind: VcsKind,
    /// Name of the metadata directory marking a repository root
    pub metadata_dir: &'static str,
    /// Executable used for revision queries
    pub command: &'static str,
    /// Arguments printing the working copy's revision
    pub revision_args: &'static [&'static str],
}

/// Backends in detection priority order.
pub static BACKENDS: [VcsDescriptor; 3] = [
    VcsDescriptor {
        kind: VcsKind::Git,
        metadata_dir: ".git",
        command: "git",
        revision_args: &["rev-parse", "HEAD"],
    },
    VcsDescriptor {
        kind: VcsKind::Hg,
        metadata_dir: ".hg",
        command: "hg",
        revision_args: &["id", "-i", "--debug"],
    },
    VcsDescriptor {
        kind: VcsKind::Bzr,
        metadata_dir: ".bzr",
        command: "bzr",
        revision_args: &["revno", "--tree"],
    },
];

impl VcsDescriptor {
    /// Returns the descriptor for `kind`.
    #[must_use]
    pub fn for_kind(kind: VcsKind) -> &'static Self {
        match kind {
            VcsKind::Git => &BACKENDS[0],
            VcsKind::Hg => &BACKENDS[1],
            VcsKind::Bzr => &BACKENDS[2],
        }
    }

    /// Builds the command that prints the revision of the working copy at `root`.
    #[must_use]
    pub fn revision_command(&self, root: &Path) -> VcsCommand {
        VcsCommand::new(self.command).args(self.revision_args.iter().copied()).current_dir(root)
    }

    /// Queries the revision checked out at `root`.
    ///
    /// Returns an empty string if the command succeeded but printed nothing.
    ///
    /// # Errors
    ///
    /// Fails if the executable is missing or the command exits unsuccessfully
    /// (for example when `root` is not a working copy).
    pub fn revision(&self, root: &Path) -> Result<String> {
        let stdout = self
            .revision_command(root)
            .with_context(root.display().to_string())
            .execute_stdout()?;
        Ok(self.normalize_revision(&stdout))
    }

    fn normalize_revision(&self, stdout: &str) -> String {
        let first = stdout.lines().next().unwrap_or_default().trim();
        match self.kind {
            // hg marks uncommitted changes with a trailing '+'
            VcsKind::Hg => first.trim_end_matches('+').to_string(),
            VcsKind::Git | VcsKind::Bzr => first.to_string(),
        }
    }
}

/// A repository root found under the vendor tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsRoot {
    /// The directory containing the metadata directory
    pub path: PathBuf,
    /// The backend owning it
    pub vcs: &'static VcsDescriptor,
}

impl VcsRoot {
    /// Path of the metadata directory (`<root>/.git` etc.).
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(self.vcs.metadata_dir)
    }
}

/// Returns the first backend, in priority order, whose metadata directory exists
/// directly inside `path`.
#[must_use]
pub fn detect_backend(path: &Path) -> Option<&'static VcsDescriptor> {
    BACKENDS.iter().find(|vcs| {
        let probe = path.join(vcs.metadata_dir);
        tracing::trace!("probing {}", probe.display());
        is_dir(&probe)
    })
}

/// Finds the repository root owning the dependency `name` under `vendor_src`.
///
/// Starts at `vendor_src/name` and drops one trailing path segment per step until a
/// metadata directory is found. `vendor_src` itself is never considered a root.
/// Absence is a normal outcome and yields `None`.
#[must_use]
pub fn locate_root(vendor_src: &Path, name: &str) -> Option<VcsRoot> {
    let mut candidate = name.trim_matches('/');

    if candidate.split('/').any(|segment| segment == "..") {
        tracing::debug!("Refusing to locate VCS root outside the vendor tree for '{}'", name);
        return None;
    }

    while !candidate.is_empty() && candidate != "." {
        let path = vendor_src.join(candidate);
        if let Some(vcs) = detect_backend(&path) {
            tracing::debug!("Found {} root for '{}' at {}", vcs.kind, name, path.display());
            return Some(VcsRoot {
                path,
                vcs,
            });
        }

        candidate = match candidate.rsplit_once('/') {
            Some((parent, _)) => parent,
            None => break,
        };
    }

    tracing::debug!("No VCS root found for '{}'", name);
    None
}

/// Best-effort revision lookup used by lock generation.
///
/// Implementations never fail: anything that prevents determining a revision is
/// reported as `None`.
pub trait RevisionSource {
    /// Returns the non-empty revision checked out at `root`, if it can be determined.
    fn revision(&self, root: &VcsRoot) -> Option<String>;
}

/// [`RevisionSource`] that runs the backend's command line tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandRevisions;

impl RevisionSource for CommandRevisions {
    fn revision(&self, root: &VcsRoot) -> Option<String> {
        match root.vcs.revision(&root.path) {
            Ok(rev) if !rev.is_empty() => Some(rev),
            Ok(_) => {
                tracing::info!("{} reported no revision for {}", root.vcs.kind, root.path.display());
                None
            }
            Err(e) => {
                tracing::info!("Cannot determine revision of {}: {}", root.path.display(), e);
                None
            }
        }
    }
}
