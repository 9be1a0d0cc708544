//! Fluent builder for version-control command execution
//!
//! Wraps `std::process::Command` so every `git`, `hg` and `bzr` invocation is
//! logged the same way, fails with the same error types, and captures output
//! consistently. Commands run synchronously and without a timeout; a hung VCS
//! process blocks the caller.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::GomError;
use crate::utils::platform::{command_exists, vcs_executable};

/// Builder for a single VCS command.
///
/// # Examples
///
/// ```rust,no_run
/// use gom_cli::vcs::command_builder::VcsCommand;
///
/// # fn example() -> anyhow::Result<()> {
/// let head = VcsCommand::new("git")
///     .args(["rev-parse", "HEAD"])
///     .current_dir("/path/to/repo")
///     .with_context("github.com/org/repo")
///     .execute_stdout()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VcsCommand {
    /// Executable base name (`git`, `hg`, `bzr`)
    program: &'static str,

    /// Arguments passed to the executable
    args: Vec<String>,

    /// Working directory of the child process
    current_dir: Option<PathBuf>,

    /// Optional context string prefixed to log lines
    context: Option<String>,
}

impl VcsCommand {
    /// Creates a command for the given VCS executable.
    pub fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
            current_dir: None,
            context: None,
        }
    }

    /// Sets the working directory of the child process.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Appends a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a context label (usually the dependency name) to log output.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Executes the command and returns its standard output.
    ///
    /// # Errors
    ///
    /// - [`GomError::VcsNotFound`] if the executable is not on `PATH`
    /// - [`GomError::VcsCommand`] if the process exits unsuccessfully
    pub fn execute(self) -> Result<String> {
        let executable = vcs_executable(self.program);
        if !command_exists(&executable) {
            return Err(GomError::VcsNotFound {
                command: self.program.to_string(),
            }
            .into());
        }

        let command_line = self.command_line();
        let label = self.context.as_deref().unwrap_or("-");
        tracing::debug!(target: "vcs", "({}) Executing command: {}", label, command_line);

        let mut cmd = Command::new(&executable);
        cmd.args(&self.args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().with_context(|| format!("Failed to execute {command_line}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "vcs",
                "({}) Command failed with exit code {:?}: {}",
                label,
                output.status.code(),
                stderr.trim()
            );
            return Err(GomError::VcsCommand {
                operation: command_line,
                stderr,
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::debug!(target: "vcs", "({}) {}", label, stdout.trim());
        }

        Ok(stdout)
    }

    /// Executes the command and returns stdout trimmed of surrounding whitespace.
    pub fn execute_stdout(self) -> Result<String> {
        let stdout = self.execute()?;
        Ok(stdout.trim().to_string())
    }
}
