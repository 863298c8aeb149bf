//! The pluggable generator contract.
//!
//! A generator maps (registry, final feature set, validated options) to an
//! ordered list of output documents, plus an auxiliary-data bundle the
//! template renderer may query. Each target binding style is one concrete
//! [`Generator`] implementation behind the same trait - variants, not a
//! class hierarchy - selected by the CLI's `--generator` flag via
//! [`by_name`].
//!
//! A generator declares three things:
//!
//! 1. **A configuration schema**: its recognized options
//!    ([`options::OptionDescriptor`]) and the cross-option rules
//!    ([`options::Constraint`]) that combinations must satisfy. Validation
//!    happens before any resolution work begins.
//! 2. **Feature-set post-processing**: registry fix-ups and, when aliasing
//!    is enabled, the extension-closure expansion
//!    ([`Generator::modify_feature_set`]).
//! 3. **The output plan**: which template renders to which document path
//!    ([`Generator::output_plan`]), together with the naming transform and
//!    alias table the templates need ([`Generator::auxiliary_data`]).
//!
//! The only in-tree implementation is the C backend in [`c`].

pub mod c;
pub mod options;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::alias::AliasMap;
use crate::core::GladgenError;
use crate::registry::Registry;
use crate::resolver::FeatureSet;

pub use c::naming::NameTransform;
pub use options::{Constraint, OptionDescriptor, OptionSet};

/// One planned output document: a template identifier bound to the path the
/// rendered text is written to (relative to the output root).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Document {
    /// Template identifier, resolved against the template directory
    pub template: String,
    /// Output path relative to the output root
    pub path: PathBuf,
}

/// Per-generation data the template renderer may query beyond the feature
/// set itself.
#[derive(Debug, Clone)]
pub struct AuxiliaryData {
    /// The identifier-rewriting policy for the requested configuration
    pub naming: NameTransform,
    /// Alias groups over the final feature set's commands
    pub aliases: AliasMap,
}

/// The generator contract: one implementation per target binding style.
pub trait Generator {
    /// The configuration-flag name this generator is selected by.
    fn name(&self) -> &'static str;

    /// The options this generator recognizes.
    fn options(&self) -> &'static [OptionDescriptor];

    /// The cross-option rules validated after individual option parsing.
    fn constraints(&self) -> &'static [Constraint];

    /// Validates a raw option map against the declared schema.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::Constraint`] naming the violated rule for
    /// unknown options, unparseable values, and violated cross-option
    /// constraints.
    fn validate_options(
        &self,
        raw: &BTreeMap<String, String>,
    ) -> Result<OptionSet, GladgenError> {
        options::validate(self.options(), self.constraints(), raw)
    }

    /// Applies this generator's fix-ups and optional expansion to a freshly
    /// resolved feature set.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors from re-resolution after the extension
    /// set grew.
    fn modify_feature_set(
        &self,
        registry: &Registry,
        feature_set: FeatureSet,
        options: &OptionSet,
    ) -> Result<FeatureSet, GladgenError>;

    /// Derives the auxiliary data bundle for the final feature set.
    fn auxiliary_data(&self, feature_set: &FeatureSet, options: &OptionSet) -> AuxiliaryData;

    /// The ordered output documents to render for the final feature set.
    fn output_plan(
        &self,
        registry: &Registry,
        feature_set: &FeatureSet,
        options: &OptionSet,
    ) -> Vec<Document>;
}

/// Looks up a generator backend by its configuration-flag name.
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn Generator>> {
    match name {
        "c" => Some(Box::new(c::CGenerator)),
        _ => None,
    }
}
