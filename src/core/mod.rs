//! Core types for GOM
//!
//! Currently this is the error layer shared by every other module:
//! - [`GomError`] - Enumerated error types covering GOM's fatal failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format

pub mod error;

pub use error::{ErrorContext, GomError, user_friendly_error};
