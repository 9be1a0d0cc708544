//! Global constants used throughout the GOM codebase.
//!
//! File names, directory names and environment variable names that are shared
//! between the generators, the CLI and the tests. Defining them centrally keeps
//! the on-disk layout discoverable in one place.

/// Name of the unresolved manifest written by `gom gen gomfile`.
pub const GOMFILE: &str = "Gomfile";

/// Name of the pinned manifest written by `gom gen lock`.
pub const GOMFILE_LOCK: &str = "Gomfile.lock";

/// Name of the CI configuration written by `gom gen travis-yml`.
pub const TRAVIS_YML: &str = ".travis.yml";

/// Default vendor directory, relative to the project directory.
///
/// The vendor directory is laid out like a GOPATH entry: sources live under
/// `<vendor>/src/<import path>`.
pub const DEFAULT_VENDOR_DIR: &str = "_vendor";

/// Subdirectory of the vendor directory holding package sources.
pub const VENDOR_SRC_DIR: &str = "src";

/// Sentinel directory under `<vendor>/src` holding synthetic placeholder roots.
///
/// Its contents only exist to make internal packages importable while
/// dependencies are materialized, so it is removed once revisions are pinned.
pub const INTERNAL_ROOTS_DIR: &str = "_internal_roots";

/// Build context used by the conditional filter when none is supplied.
pub const DEFAULT_GROUP: &str = "development";

/// Environment variable selecting the active build context(s).
pub const ENV_GROUP: &str = "GOM_ENV";

/// Environment variable overriding the target operating system.
pub const ENV_GOOS: &str = "GOOS";

/// Environment variable overriding the vendor directory name.
pub const ENV_VENDOR_NAME: &str = "GOM_VENDOR_NAME";

/// Environment variable listing GOPATH entries.
pub const ENV_GOPATH: &str = "GOPATH";
