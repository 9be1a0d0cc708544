//! The `gom gen` command family.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{BuildContext, Settings};
use crate::constants::{DEFAULT_GROUP, DEFAULT_VENDOR_DIR, ENV_GOOS, ENV_GROUP, ENV_VENDOR_NAME};
use crate::generate::{gen_gomfile, gen_lockfile, gen_travis_yml};
use crate::utils::platform::host_goos;

/// Generate `Gomfile`, `Gomfile.lock` or `.travis.yml`
#[derive(Args, Debug)]
pub struct GenCommand {
    #[command(subcommand)]
    target: GenTarget,
}

#[derive(Subcommand, Debug)]
enum GenTarget {
    /// Scan the project's imports and write a sorted Gomfile.
    Gomfile(VendorArgs),

    /// Pin the vendored revisions of the Gomfile entries into Gomfile.lock.
    ///
    /// Entries whose `group`/`goos` do not match the build context are left out.
    /// VCS metadata directories are removed from the vendor tree afterwards.
    Lock(LockArgs),

    /// Write a .travis.yml that installs and tests through gom.
    TravisYml,
}

/// Vendor directory selection
#[derive(Args, Debug, Clone)]
pub struct VendorArgs {
    /// Vendor directory, relative to the project directory.
    #[arg(long, env = ENV_VENDOR_NAME, default_value = DEFAULT_VENDOR_DIR)]
    vendor: PathBuf,
}

/// Options of `gom gen lock`
#[derive(Args, Debug, Clone)]
pub struct LockArgs {
    #[command(flatten)]
    vendor: VendorArgs,

    /// Active build context(s); repeat or separate with commas.
    #[arg(long = "group", env = ENV_GROUP, value_delimiter = ',', default_value = DEFAULT_GROUP)]
    groups: Vec<String>,

    /// Target operating system in Go naming (linux, darwin, windows, ...).
    #[arg(long, env = ENV_GOOS, default_value = host_goos())]
    goos: String,
}

impl LockArgs {
    fn context(&self) -> BuildContext {
        let groups = self.groups.iter().map(|g| g.trim()).filter(|g| !g.is_empty());
        BuildContext::new(groups, self.goos.clone())
    }
}

impl GenCommand {
    /// Runs the selected generator against `project_dir`.
    pub fn execute(self, project_dir: &Path) -> Result<()> {
        match self.target {
            GenTarget::Gomfile(args) => {
                let context = BuildContext::new([DEFAULT_GROUP], host_goos());
                let settings = Settings::new(project_dir, &args.vendor, context);
                gen_gomfile(&settings)?;
            }
            GenTarget::Lock(args) => {
                let context = args.context();
                tracing::debug!("Build context: groups={:?} goos={}", context.groups, context.goos);
                let settings = Settings::new(project_dir, &args.vendor.vendor, context);
                gen_lockfile(&settings)?;
            }
            GenTarget::TravisYml => {
                let settings = Settings::new(
                    project_dir,
                    DEFAULT_VENDOR_DIR,
                    BuildContext::new([DEFAULT_GROUP], host_goos()),
                );
                gen_travis_yml(&settings)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        lock: LockArgs,
    }

    #[test]
    fn test_group_list_and_repeat() {
        let cli = TestCli::try_parse_from(["test", "--group", "test,production", "--group", "ci"]).unwrap();
        assert_eq!(cli.lock.groups, vec!["test", "production", "ci"]);
    }

    #[test]
    fn test_context_from_flags() {
        let cli = TestCli::try_parse_from(["test", "--group", "test, ", "--goos", "darwin", "--vendor", "vendor"])
            .unwrap();
        let ctx = cli.lock.context();
        assert_eq!(ctx.groups, vec!["test"]);
        assert_eq!(ctx.goos, "darwin");
        assert_eq!(cli.lock.vendor.vendor, PathBuf::from("vendor"));
    }
}
