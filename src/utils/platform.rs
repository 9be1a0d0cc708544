//! Platform-specific utilities
//!
//! Maps the host platform onto Go's naming (the `goos` values a Gomfile uses)
//! and checks for the presence of external version-control executables.

/// Returns `true` when running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the Go `GOOS` identifier for the host operating system.
///
/// Rust and Go agree on most names; the exceptions are translated here.
///
/// # Examples
///
/// ```rust,no_run
/// use gom_cli::utils::platform::host_goos;
///
/// // On a Mac this prints "darwin", not "macos"
/// println!("{}", host_goos());
/// ```
#[must_use]
pub fn host_goos() -> &'static str {
    rust_os_to_goos(std::env::consts::OS)
}

/// Translates a Rust `target_os` name into Go's `GOOS` name.
#[must_use]
pub fn rust_os_to_goos(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Returns the Go `GOARCH` identifier for the host architecture.
#[must_use]
pub fn host_goarch() -> &'static str {
    rust_arch_to_goarch(std::env::consts::ARCH)
}

/// Translates a Rust `target_arch` name into Go's `GOARCH` name.
#[must_use]
pub fn rust_arch_to_goarch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// Returns the platform-specific executable name for a VCS tool.
#[must_use]
pub fn vcs_executable(command: &'static str) -> String {
    if is_windows() {
        format!("{command}.exe")
    } else {
        command.to_string()
    }
}

/// Checks if a command is available in the system PATH.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}
