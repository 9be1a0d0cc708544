//! GOM CLI entry point
//!
//! This is the main executable for the Gomfile generator. It handles command-line
//! argument parsing, logging setup, error display, and command execution.
//!
//! The CLI supports the following commands:
//! - `gen gomfile` - Scan the project imports and write a `Gomfile`
//! - `gen lock` - Pin vendored revisions into `Gomfile.lock` and sanitize the vendor tree
//! - `gen travis-yml` - Write a `.travis.yml` for the project

use anyhow::Result;
use clap::Parser;
use gom_cli::cli;
use gom_cli::core::error::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
