//! Global constants used throughout the gladgen codebase.
//!
//! This module contains the identifier markers and output-layout conventions
//! that are shared across multiple modules. Defining them centrally keeps the
//! generated-code surface consistent between the naming transform, the output
//! plan, and the templates.

/// Directory namespace used in generated document paths.
///
/// Headers land in `include/{OUTPUT_NAMESPACE}/{api}.h` and implementation
/// files in `src/{OUTPUT_NAMESPACE}/{api}.c`.
pub const OUTPUT_NAMESPACE: &str = "glad";

/// Prefix carried by loader-owned symbols in generated code.
///
/// The multi-context naming transform strips this marker before applying the
/// api-prefix rewrite, so `GLAD_glViewport` and `glViewport` both resolve to
/// the same context member.
pub const SYMBOL_PREFIX: &str = "GLAD_";

/// Accessor prepended to identifiers when multi-context mode is enabled.
pub const CONTEXT_ACCESSOR: &str = "context->";

/// Maximum allowed Levenshtein distance as a percentage of the candidate
/// length when suggesting extension names for a failed lookup.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
