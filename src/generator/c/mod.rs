//! The C generator backend.
//!
//! Generates a C loader: a header with type declarations, enumerant defines
//! and command prototypes, plus an implementation file with the function
//! pointers and (optionally) a runtime symbol loader. Multi-context mode
//! moves the whole surface behind a per-context struct; debug mode wraps
//! every call in pre/post callback hooks.
//!
//! This module owns everything C-specific: the option schema and its
//! constraints, the registry fix-ups, C declaration formatting, the
//! multi-context naming transform ([`naming`]), and the debug-wrap
//! derivation ([`debug`]).

pub mod debug;
pub mod fixups;
pub mod naming;

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::{AuxiliaryData, Constraint, Document, Generator, OptionDescriptor, OptionSet};
use crate::alias::build_alias_map;
use crate::constants::OUTPUT_NAMESPACE;
use crate::core::GladgenError;
use crate::registry::{Param, Registry};
use crate::resolver::expand::expand_aliased_extensions;
use crate::resolver::FeatureSet;

use naming::NameTransform;

/// The C backend's recognized options.
pub const OPTIONS: &[OptionDescriptor] = &[
    OptionDescriptor {
        name: "DEBUG",
        default: false,
        description: "Wrap every call with pre/post callback hooks",
    },
    OptionDescriptor {
        name: "ALIAS",
        default: false,
        description: "Resolve function aliases across extensions at load time",
    },
    OptionDescriptor {
        name: "MX",
        default: false,
        description: "Put all functions and constants behind a per-context handle",
    },
    OptionDescriptor {
        name: "MX_GLOBAL",
        default: false,
        description: "Also emit global entry points dispatching through a current-context pointer",
    },
    OptionDescriptor {
        name: "HEADER_ONLY",
        default: false,
        description: "Merge all outputs into one header guarded by an implementation macro",
    },
    OptionDescriptor {
        name: "LOADER",
        default: false,
        description: "Include a runtime symbol-loading implementation",
    },
];

/// Cross-option rules: the global context needs the context struct, and the
/// debug indirection has no multi-context variant.
pub const CONSTRAINTS: &[Constraint] = &[
    Constraint::Requires { when: &["MX_GLOBAL"], requires: "MX" },
    Constraint::Unsupported { when: &["MX"], unsupported: "DEBUG" },
];

/// The C loader generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CGenerator;

impl Generator for CGenerator {
    fn name(&self) -> &'static str {
        "c"
    }

    fn options(&self) -> &'static [OptionDescriptor] {
        OPTIONS
    }

    fn constraints(&self) -> &'static [Constraint] {
        CONSTRAINTS
    }

    fn modify_feature_set(
        &self,
        registry: &Registry,
        feature_set: FeatureSet,
        options: &OptionSet,
    ) -> Result<FeatureSet, GladgenError> {
        let feature_set = fixups::ensure_wgl_extension_strings(registry, feature_set)?;
        let mut feature_set = if options.is_enabled("ALIAS") {
            expand_aliased_extensions(registry, &feature_set)?
        } else {
            feature_set
        };
        fixups::patch_apple_pointer_types(&mut feature_set);
        Ok(feature_set)
    }

    fn auxiliary_data(&self, feature_set: &FeatureSet, options: &OptionSet) -> AuxiliaryData {
        let mx = options.is_enabled("MX") && feature_set.api.starts_with("gl");
        AuxiliaryData {
            naming: NameTransform::new(mx, &feature_set.api),
            aliases: build_alias_map(&feature_set.commands),
        }
    }

    fn output_plan(
        &self,
        registry: &Registry,
        feature_set: &FeatureSet,
        options: &OptionSet,
    ) -> Vec<Document> {
        let header =
            PathBuf::from(format!("include/{OUTPUT_NAMESPACE}/{}.h", feature_set.api));
        let source = PathBuf::from(format!("src/{OUTPUT_NAMESPACE}/{}.c", feature_set.api));

        if options.is_enabled("HEADER_ONLY") {
            vec![Document { template: "header_only.h".to_string(), path: header }]
        } else {
            vec![
                Document { template: format!("{}.h", registry.name()), path: header },
                Document { template: format!("{}.c", registry.name()), path: source },
            ]
        }
    }
}

static ARRAY_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Renders a clean C type from a declaration's type text.
///
/// Array suffixes become pointers (`GLuint [2]` -> `GLuint *`), matching how
/// the parameters are passed through the loader's indirection.
#[must_use]
pub fn to_c_type(type_text: &str) -> String {
    let array_suffix =
        ARRAY_SUFFIX.get_or_init(|| Regex::new(r"\[\d*\]").expect("valid literal pattern"));
    array_suffix.replace_all(type_text, "*").trim().to_string()
}

/// Joins a parameter list into its C declaration form.
#[must_use]
pub fn params_to_c(params: &[Param]) -> String {
    params.iter().map(|param| param.raw.as_str()).collect::<Vec<_>>().join(", ")
}
