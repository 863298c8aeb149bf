//! Command-line interface for gladgen.
//!
//! Two subcommands cover the tool's surface:
//!
//! - `generate` - resolve a feature set for every requested api, apply the
//!   generator's fix-ups, render the planned documents from a template
//!   directory, and write them under the output root
//! - `plan` - run the same resolution pipeline and print the result as JSON
//!   instead of rendering (useful for inspecting a configuration and for
//!   driving external renderers)
//!
//! Each requested api is processed independently: a resolution failure for
//! one api is reported and does not abort or corrupt the others. The
//! process exits non-zero if any api failed.
//!
//! # Examples
//!
//! ```bash
//! # Core-profile OpenGL 3.3 with two extensions
//! gladgen generate --registry gl.xml --api gl:core=3.3 \
//!     --extensions GL_ARB_debug_output,GL_EXT_texture_filter_anisotropic \
//!     --templates templates/c --out-dir generated
//!
//! # Several apis from one registry, newest version each
//! gladgen generate --registry gl.xml --api gl --api gles2 \
//!     --templates templates/c --out-dir generated --alias --loader
//!
//! # Inspect without rendering
//! gladgen plan --registry gl.xml --api gl=4.6 --mx --mx-global
//! ```

pub mod common;
mod generate;
mod plan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure for gladgen.
#[derive(Parser)]
#[command(
    name = "gladgen",
    about = "Generate API loader source from a Khronos-style registry",
    version,
    long_about = "gladgen resolves the effective surface of an API for a requested \
                  version/profile/extension configuration and renders loader source \
                  code from caller-supplied templates."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve and render loader source for one or more apis.
    Generate(generate::GenerateCommand),

    /// Print the resolution result as JSON without rendering.
    Plan(plan::PlanCommand),
}

impl Cli {
    /// Executes the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error, or a summary error when individual
    /// apis failed while others succeeded.
    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        match self.command {
            Commands::Generate(command) => command.execute(),
            Commands::Plan(command) => command.execute(),
        }
    }
}

/// Initializes the tracing subscriber once, honoring `RUST_LOG` unless a
/// verbosity flag overrides it.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate_invocation() {
        let cli = Cli::try_parse_from([
            "gladgen",
            "generate",
            "--registry",
            "gl.xml",
            "--api",
            "gl:core=3.3",
            "--templates",
            "templates",
            "--out-dir",
            "out",
            "--alias",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn cli_rejects_verbose_with_quiet() {
        let result = Cli::try_parse_from([
            "gladgen", "plan", "--registry", "gl.xml", "--api", "gl", "--verbose", "--quiet",
        ]);
        assert!(result.is_err());
    }
}
