//! Static CI configuration.
//!
//! `gom gen travis-yml` drops a Travis CI configuration that installs `gom`,
//! restores the vendored dependencies and runs the tests through it.

use anyhow::Result;
use std::path::Path;

use crate::utils::fs::write_new_file;

/// Content written to `.travis.yml`.
pub const TRAVIS_YML_CONTENT: &str = "language: go
go:
  - tip
before_install:
  - go get github.com/mattn/gom
script:
  - $HOME/gopath/bin/gom install
  - $HOME/gopath/bin/gom test
";

/// Writes [`TRAVIS_YML_CONTENT`] to `path`, refusing to overwrite.
pub fn write_travis_yml(path: &Path) -> Result<()> {
    write_new_file(path, TRAVIS_YML_CONTENT)
}
