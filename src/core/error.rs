//! Error handling for gladgen
//!
//! The error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise handling in code - every failure
//!    mode of resolution, validation, parsing, and rendering is a
//!    [`GladgenError`] variant.
//! 2. **User-friendly messages** with actionable suggestions for CLI users -
//!    [`user_friendly_error`] wraps any error chain in an [`ErrorContext`]
//!    that prints a colored report and, where possible, a hint.
//!
//! # Error Categories
//!
//! - **Resolution**: [`GladgenError::UnknownApi`],
//!   [`GladgenError::UnsupportedVersion`], [`GladgenError::UnknownExtension`].
//!   These abort generation for the requested api only; the CLI continues
//!   with the remaining apis of the invocation.
//! - **Option validation**: [`GladgenError::Constraint`], reported before any
//!   resolution work begins.
//! - **Input and output**: [`GladgenError::RegistryParse`],
//!   [`GladgenError::TemplateLoad`], [`GladgenError::Render`],
//!   [`GladgenError::Io`].
//!
//! Alias-merge inconsistencies (dangling alias targets) and unresolvable
//! entity names in requirement blocks are *not* errors: the registry's known
//! imperfections are recovered silently by omission and logged via `tracing`.
//!
//! # Examples
//!
//! ```rust
//! use gladgen::core::GladgenError;
//!
//! fn handle(error: GladgenError) {
//!     match error {
//!         GladgenError::UnknownApi { api } => {
//!             eprintln!("registry does not describe '{api}'");
//!         }
//!         GladgenError::Constraint { rule } => {
//!             eprintln!("fix the generator options: {rule}");
//!         }
//!         other => eprintln!("{other}"),
//!     }
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::registry::Version;

/// The main error type for gladgen operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to report it precisely: the api being resolved, the offending
/// extension name, the violated constraint rule, and so on.
#[derive(Error, Debug)]
pub enum GladgenError {
    /// The requested api has no feature chain in the loaded registry.
    #[error("API '{api}' is not described by this registry")]
    UnknownApi {
        /// The api name that was requested
        api: String,
    },

    /// No feature of the api's chain is less than or equal to the requested
    /// version.
    #[error("no version of API '{api}' satisfies '{version}'")]
    UnsupportedVersion {
        /// The api whose feature chain was searched
        api: String,
        /// The version that could not be satisfied
        version: Version,
    },

    /// An extension name is not defined for the requested api.
    ///
    /// Carries a closest-match suggestion when a defined extension name is
    /// similar enough to the requested one.
    #[error("unknown extension '{name}' for API '{api}'{}", suggestion_suffix(.suggestion))]
    UnknownExtension {
        /// The api the extension was requested for
        api: String,
        /// The extension name that could not be found
        name: String,
        /// A defined extension name within the similarity threshold, if any
        suggestion: Option<String>,
    },

    /// A generation option failed validation.
    ///
    /// Raised for unknown option names, unparseable boolean values, and
    /// violated cross-option constraints. `rule` names the violated rule,
    /// e.g. `MX_GLOBAL requires MX`.
    #[error("option constraint violated: {rule}")]
    Constraint {
        /// Human-readable statement of the violated rule
        rule: String,
    },

    /// The registry document could not be parsed.
    #[error("invalid registry document '{path}': {reason}")]
    RegistryParse {
        /// Path or name of the registry document
        path: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// The template directory could not be loaded.
    #[error("failed to load templates from '{path}'")]
    TemplateLoad {
        /// The directory or pattern that failed to load
        path: String,
        /// The underlying Tera error
        #[source]
        source: Box<tera::Error>,
    },

    /// Rendering a single output document failed.
    #[error("failed to render template '{template}'")]
    Render {
        /// The template identifier that failed to render
        template: String,
        /// The underlying Tera error
        #[source]
        source: Box<tera::Error>,
    },

    /// I/O error from [`std::io::Error`].
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion.as_deref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default()
}

/// Error wrapper that adds a user-facing hint to an error chain.
///
/// Produced by [`user_friendly_error`]; the CLI calls [`ErrorContext::display`]
/// to print a colored report to stderr.
#[derive(Debug)]
pub struct ErrorContext {
    error: anyhow::Error,
    suggestion: Option<String>,
}

impl ErrorContext {
    /// Attach a hint to be printed under the error chain.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Print the error chain and any hint to stderr, colored for terminals.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".red(), cause);
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("  {} {}", "hint:".yellow(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        for cause in self.error.chain().skip(1) {
            write!(f, "\n  caused by: {cause}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly format with contextual hints.
///
/// Known [`GladgenError`] variants get a hint about how to recover; anything
/// else is reported as-is.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<GladgenError>() {
        Some(GladgenError::UnknownExtension { suggestion: Some(s), .. }) => {
            Some(format!("did you mean '{s}'?"))
        }
        Some(GladgenError::UnknownExtension { .. }) => {
            Some("list the registry's extension names with 'gladgen plan'".to_string())
        }
        Some(GladgenError::UnsupportedVersion { api, .. }) => {
            Some(format!("pick a version present in the '{api}' feature chain"))
        }
        Some(GladgenError::Constraint { .. }) => {
            Some("adjust the option flags or the [options] table in gladgen.toml".to_string())
        }
        _ => None,
    };

    ErrorContext { error, suggestion }
}
