//! Error handling for GOM
//!
//! This module provides the error taxonomy and user-friendly error reporting for the
//! Gomfile generator. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Fatal vs. degraded failures
//!
//! Only fatal conditions are represented as [`GomError`] values that propagate to the
//! caller: an existing output file, an unresolvable package during the import scan,
//! an unparsable Gomfile, or an I/O failure while writing output. Revision lookups and
//! cleanup deletions are best-effort; their failures are logged and swallowed where
//! they happen and never reach this module's formatting code.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gom_cli::core::{GomError, ErrorContext, user_friendly_error};
//!
//! let error = GomError::AlreadyExists {
//!     path: "Gomfile".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for GOM operations
///
/// Each variant maps to one failure mode of the generators. Variants carry the
/// path, import path or command involved so the CLI can print actionable output.
#[derive(Error, Debug, Clone)]
pub enum GomError {
    /// Output file already exists
    ///
    /// `Gomfile`, `Gomfile.lock` and `.travis.yml` are never overwritten; the
    /// user must remove the existing file to regenerate it.
    #[error("{path} already exists")]
    AlreadyExists {
        /// The file that would have been overwritten
        path: String,
    },

    /// A package could not be located or parsed during the import scan
    #[error("Cannot resolve package '{import_path}' from {dir}: {reason}")]
    PackageResolution {
        /// The import path being resolved
        import_path: String,
        /// The directory the import was resolved relative to
        dir: String,
        /// Why resolution failed
        reason: String,
    },

    /// A Gomfile line could not be parsed
    #[error("Invalid syntax in {file} at line {line}: {reason}")]
    ManifestParse {
        /// The manifest file being parsed
        file: String,
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A version-control executable is not installed
    #[error("{command} is not installed or not found in PATH")]
    VcsNotFound {
        /// The missing executable (`git`, `hg`, `bzr`)
        command: String,
    },

    /// A version-control command exited unsuccessfully
    #[error("VCS operation failed: {operation}")]
    VcsCommand {
        /// The command line that failed
        operation: String,
        /// The error output of the command
        stderr: String,
    },

    /// Creating or writing an output file failed
    #[error("File system error: {operation} {path}")]
    FileSystem {
        /// What was being attempted
        operation: String,
        /// The path involved
        path: String,
    },

    /// Generic error for cases not covered above
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`GomError`] with an optional suggestion (what to do) and optional
/// details (why it happened). Built by [`user_friendly_error`] for CLI display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying GOM error
    pub error: GomError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details
    pub const fn new(error: GomError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`GomError`] variants anywhere in the context chain and
/// [`std::io::Error`] kinds; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(gom_error) = error.downcast_ref::<GomError>() {
        return create_error_context(gom_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(GomError::FileSystem {
                    operation: "permission denied accessing".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the project and vendor directories")
                .with_details(error.to_string());
            }
            std::io::ErrorKind::AlreadyExists => {
                return ErrorContext::new(GomError::FileSystem {
                    operation: "file creation".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Remove the existing file and run the command again")
                .with_details(error.to_string());
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(GomError::Other {
        message,
    })
}

fn create_error_context(error: GomError) -> ErrorContext {
    match &error {
        GomError::AlreadyExists {
            path,
        } => {
            let suggestion = format!("Remove {path} and run the command again");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Generated files are never overwritten")
        }
        GomError::PackageResolution {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Make sure every imported package exists under the vendor directory or GOPATH and that its Go files parse",
            )
            .with_details("The import scan stops at the first package it cannot load; no Gomfile was written"),
        GomError::ManifestParse {
            file,
            ..
        } => {
            let suggestion = format!(
                "Check the syntax in {file}. Each entry looks like: gom 'host/org/repo', :group => 'test'"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        GomError::VcsNotFound {
            command,
        } => {
            let suggestion = format!("Install {command} and make sure it is in your PATH");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        GomError::FileSystem {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the project directory exists and is writable"),
        GomError::VcsCommand {
            stderr,
            ..
        } => {
            let details = stderr.trim().to_string();
            ErrorContext::new(error).with_details(details)
        }
        GomError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
