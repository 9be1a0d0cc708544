//! Integration test suite for GOM
//!
//! End-to-end tests driving the `gom` binary against temporary Go trees.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **gen_gomfile**: import scanning and `Gomfile` output
//! - **gen_lock**: filtering, pinning and vendor sanitization
//! - **travis_yml**: the static CI configuration

#[path = "../common/mod.rs"]
mod common;

mod gen_gomfile;
mod gen_lock;
mod travis_yml;
