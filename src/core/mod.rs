//! Core types and error handling for gladgen.
//!
//! This module provides the crate-wide error type and the user-facing error
//! reporting helpers used by the CLI. Resolution and validation code returns
//! the strongly-typed [`GladgenError`]; the CLI converts whatever bubbles up
//! into an [`ErrorContext`] for colored terminal display.

pub mod error;

pub use error::{ErrorContext, GladgenError, user_friendly_error};
