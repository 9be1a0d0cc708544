//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Atomic create-new writes and best-effort removals
//! - [`platform`] - Host OS naming and executable detection

pub mod fs;
pub mod platform;

pub use fs::{ensure_absent, is_dir, remove_dir_best_effort, write_new_file};
pub use platform::{command_exists, host_goarch, host_goos, is_windows};
