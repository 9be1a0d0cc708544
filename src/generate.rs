//! Orchestration behind the `gom gen ...` commands.
//!
//! Every generator checks that its output file is absent before doing any work,
//! so a refused run scans nothing, queries nothing and deletes nothing.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Settings;
use crate::constants::{GOMFILE, GOMFILE_LOCK, TRAVIS_YML};
use crate::import::ImportScanner;
use crate::import::constraint::BuildTarget;
use crate::import::loader::GoPackageLoader;
use crate::lockfile::LockGenerator;
use crate::lockfile::sanitize::{remove_internal_roots, sanitize};
use crate::manifest::Manifest;
use crate::templates::write_travis_yml;
use crate::utils::fs::ensure_absent;
use crate::utils::platform::host_goarch;
use crate::vcs::CommandRevisions;

/// Summary of a `gen lock` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSummary {
    /// Entries written to the lock
    pub entries: usize,
    /// Entries written without `:commit`
    pub unpinned: usize,
    /// Metadata directories removed from the vendor tree
    pub sanitized: usize,
}

/// Scans the project's imports and writes a sorted `Gomfile`.
///
/// # Errors
///
/// - `AlreadyExists` if the `Gomfile` is present
/// - `PackageResolution` if any package in the import graph cannot be loaded;
///   no file is written in that case
pub fn gen_gomfile(settings: &Settings) -> Result<Manifest> {
    let path = settings.gomfile_path();
    ensure_absent(&path)?;

    let target = BuildTarget::new(settings.context.goos.clone(), host_goarch());
    let loader = GoPackageLoader::new(settings.search_roots()).with_target(target);
    tracing::debug!("Search roots: {:?}, target {:?}", loader.roots(), loader.target());

    let imports = ImportScanner::new(loader)
        .scan(".", &settings.project_dir)
        .with_context(|| format!("Failed to scan imports of {}", settings.project_dir.display()))?;

    let manifest = Manifest::from_imports(&imports);
    manifest.write_new(&path)?;

    println!("{} is generated", GOMFILE.green());
    Ok(manifest)
}

/// Pins the `Gomfile` entries that apply to the active build context, writes
/// `Gomfile.lock`, then strips VCS metadata from the vendor tree.
///
/// # Errors
///
/// - `AlreadyExists` if the lock is present
/// - the `Gomfile` cannot be read or parsed
/// - the lock cannot be written
///
/// Revision lookups and cleanup removals never fail the run.
pub fn gen_lockfile(settings: &Settings) -> Result<LockSummary> {
    let lock_path = settings.lock_path();
    ensure_absent(&lock_path)?;

    let manifest = Manifest::load(&settings.gomfile_path())?;
    let vendor_src = settings.vendor_src();

    let generator = LockGenerator::new(&vendor_src, &settings.context, CommandRevisions);
    let lock = generator.generate(manifest);
    lock.write_new(&lock_path)?;

    let unpinned = lock.unpinned_count();
    println!("{} is generated", GOMFILE_LOCK.green());
    if unpinned > 0 {
        println!("{} of {} entries have no pinned revision", unpinned, lock.entries.len());
    }

    if remove_internal_roots(&vendor_src) {
        tracing::info!("Removed internal roots under {}", vendor_src.display());
    }
    let sanitized = sanitize(&lock.roots);
    tracing::info!("Sanitized {} repositories", sanitized);

    Ok(LockSummary {
        entries: lock.entries.len(),
        unpinned,
        sanitized,
    })
}

/// Writes `.travis.yml` into the project directory.
pub fn gen_travis_yml(settings: &Settings) -> Result<()> {
    let path = settings.travis_path();
    write_travis_yml(&path)?;
    println!("{} is generated", TRAVIS_YML.green());
    Ok(())
}
