//! Alias-driven extension-closure expansion.
//!
//! When function-pointer aliasing is enabled, a command requested via one
//! extension might only be populated at runtime by a different extension's
//! differently-named entry point. That other extension must also be selected
//! so its entry point is compiled in. Expansion grows the extension set
//! accordingly and re-resolves.
//!
//! Expansion is a deliberate one-level closure: every candidate extension is
//! tested against the *original* selected command set, not recursively
//! against extensions added in the same pass. Callers needing multi-level
//! closure call [`expand_aliased_extensions`] repeatedly until the extension
//! set stops growing.

use std::collections::BTreeSet;
use tracing::debug;

use super::{resolve, FeatureSet};
use crate::core::GladgenError;
use crate::registry::Registry;

/// Grows the extension set with every extension that introduces an alias of
/// an already-selected command, then re-resolves.
///
/// An unselected extension is pulled in when any of its commands either
/// names an already-selected command as its alias, or shares its name with
/// an already-selected command (the registry defines some entry points in
/// more than one extension).
///
/// # Errors
///
/// Propagates resolution errors from the final re-resolution; the candidate
/// scan itself cannot fail.
pub fn expand_aliased_extensions(
    registry: &Registry,
    feature_set: &FeatureSet,
) -> Result<FeatureSet, GladgenError> {
    let selected = feature_set.command_names();
    let mut extensions: BTreeSet<String> = feature_set.extensions.iter().cloned().collect();

    if let Some(catalog) = registry.extensions(&feature_set.api) {
        for (name, extension) in catalog {
            if extensions.contains(name) {
                continue;
            }
            let requirements =
                extension.requirements(&feature_set.api, feature_set.profile.as_deref());
            let introduces_alias = requirements.commands.iter().any(|command_name| {
                if selected.contains(command_name.as_str()) {
                    return true;
                }
                registry
                    .command(command_name)
                    .and_then(|command| command.alias.as_deref())
                    .is_some_and(|alias| selected.contains(alias))
            });
            if introduces_alias {
                debug!(extension = %name, "selecting extension for alias coverage");
                extensions.insert(name.clone());
            }
        }
    }

    resolve(
        registry,
        &feature_set.api,
        feature_set.version,
        feature_set.profile.as_deref(),
        &extensions,
    )
}
