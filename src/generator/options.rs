//! Declarative option schemas with cross-option constraints.
//!
//! Each generator declares its recognized boolean switches as
//! [`OptionDescriptor`]s and its combination rules as [`Constraint`]s.
//! [`validate`] parses a raw string map (merged from the config file and CLI
//! flags) against that schema and checks every constraint afterwards, so a
//! violated rule is reported by name rather than surfacing as misbehavior
//! deep inside generation.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::GladgenError;

/// One recognized boolean option of a generator's configuration schema.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    /// Canonical option name, e.g. `MX_GLOBAL`
    pub name: &'static str,
    /// Value used when the raw map does not mention the option
    pub default: bool,
    /// One-line description shown in CLI help and documentation
    pub description: &'static str,
}

/// A cross-option rule checked after individual option parsing.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// When every option in `when` is enabled, `requires` must be enabled
    /// too.
    Requires {
        /// Options that trigger the rule
        when: &'static [&'static str],
        /// Option that must then be enabled
        requires: &'static str,
    },
    /// When every option in `when` is enabled, `unsupported` must not be.
    Unsupported {
        /// Options that trigger the rule
        when: &'static [&'static str],
        /// Option that must then be disabled
        unsupported: &'static str,
    },
}

impl Constraint {
    fn check(&self, options: &OptionSet) -> Result<(), GladgenError> {
        match self {
            Self::Requires { when, requires } => {
                if when.iter().all(|name| options.is_enabled(name))
                    && !options.is_enabled(requires)
                {
                    return Err(GladgenError::Constraint {
                        rule: format!("{} requires {requires}", when.join("+")),
                    });
                }
            }
            Self::Unsupported { when, unsupported } => {
                if when.iter().all(|name| options.is_enabled(name))
                    && options.is_enabled(unsupported)
                {
                    return Err(GladgenError::Constraint {
                        rule: format!("{} cannot be combined with {unsupported}", when.join("+")),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A validated set of option values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    values: BTreeMap<String, bool>,
}

impl OptionSet {
    /// Whether an option is enabled. Unknown names read as disabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }

    /// All option values, keyed by canonical name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, bool> {
        &self.values
    }
}

/// Validates a raw option map against a declared schema.
///
/// Raw keys are case-insensitive; values accept the usual boolean spellings
/// (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
///
/// # Errors
///
/// Returns [`GladgenError::Constraint`] for unknown option names,
/// unparseable values, and violated cross-option constraints.
pub fn validate(
    descriptors: &[OptionDescriptor],
    constraints: &[Constraint],
    raw: &BTreeMap<String, String>,
) -> Result<OptionSet, GladgenError> {
    let mut values: BTreeMap<String, bool> = descriptors
        .iter()
        .map(|descriptor| (descriptor.name.to_string(), descriptor.default))
        .collect();

    for (key, value) in raw {
        let canonical = key.to_uppercase();
        if !values.contains_key(&canonical) {
            return Err(GladgenError::Constraint {
                rule: format!("unrecognized option '{key}'"),
            });
        }
        values.insert(canonical, parse_bool(key, value)?);
    }

    let options = OptionSet { values };
    for constraint in constraints {
        constraint.check(&options)?;
    }
    Ok(options)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GladgenError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GladgenError::Constraint {
            rule: format!("option '{key}' expects a boolean value, got '{value}'"),
        }),
    }
}
