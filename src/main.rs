//! gladgen CLI entry point
//!
//! This is the main executable for the gladgen loader generator. It handles
//! command-line argument parsing, error display, and command execution.
//!
//! The CLI supports two commands:
//! - `generate` - resolve a feature set per requested api and render the
//!   planned output documents from a template directory
//! - `plan` - print the resolution result as JSON without rendering

use anyhow::Result;
use clap::Parser;
use gladgen::cli;
use gladgen::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
