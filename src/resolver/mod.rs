//! Feature-set resolution: computing the effective API surface.
//!
//! A registry describes an api as an ordered chain of features (versions),
//! each carrying requirement and removal deltas, plus a catalog of
//! extensions contributing further requirements. Resolution replays those
//! deltas for one concrete request:
//!
//! 1. Walk the feature chain from the lowest version up to and including the
//!    requested version.
//! 2. For each feature, apply its requirement blocks, then its removal
//!    blocks, in file order - removals after requirements within the same
//!    feature models "added then later removed within the same version
//!    block".
//! 3. Union in the requirement sets of every requested extension. Extension
//!    order is irrelevant: extensions only add, never remove.
//! 4. Close over type dependencies and materialize the selection in registry
//!    file order (dependency order for types).
//!
//! The result is a [`FeatureSet`]: an owned, self-contained snapshot. Any
//! structural change (for example the extension-closure growth in
//! [`expand`]) produces a new `FeatureSet` via re-resolution rather than
//! incremental edits, which keeps the three selected sets consistent with
//! each other by construction.
//!
//! # Resolution guarantees
//!
//! - Every selected command is traceable to a requirement delta from the
//!   core chain or from a named extension; there are no orphan entities.
//! - Resolution is monotonic in version, modulo explicit removal deltas.
//! - Entity names that resolve to no loaded entity are skipped with a
//!   logged warning; the registry's known imperfections never abort
//!   generation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use gladgen::registry::{Registry, Version};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = Registry::from_file("gl.xml".as_ref())?;
//! let feature_set =
//!     registry.select("gl", Version::new(3, 3), Some("core"), &BTreeSet::new())?;
//!
//! // Core-profile 3.3 has no glBegin: it was removed by the 3.2 deltas.
//! assert!(feature_set.command("glBegin").is_none());
//! # Ok(())
//! # }
//! ```

pub mod expand;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

use crate::constants::SIMILARITY_THRESHOLD_PERCENT;
use crate::core::GladgenError;
use crate::registry::{Command, Enumerant, Registry, Requirement, TypeDef, Version};

/// The resolved selection of entities for one generation request.
///
/// Owns clones of the selected registry entities, so post-resolution fix-ups
/// may rewrite them without touching the registry's source-of-truth data.
/// Types appear in registry file order (dependency order); enumerants and
/// commands in registry file order as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// The api this selection was resolved for
    pub api: String,
    /// The highest feature version that was applied
    pub version: Version,
    /// The profile the selection was restricted to, if any
    pub profile: Option<String>,
    /// Sorted names of the selected extensions
    pub extensions: Vec<String>,
    /// Selected type declarations
    pub types: Vec<TypeDef>,
    /// Selected enumerants
    pub enums: Vec<Enumerant>,
    /// Selected commands
    pub commands: Vec<Command>,
}

impl FeatureSet {
    /// Whether an extension is part of this selection.
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension == name)
    }

    /// Looks up a selected command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Looks up a selected type by name, mutably.
    ///
    /// Used by the fix-up pass to rewrite declarations on this selection's
    /// own copy.
    pub fn type_mut(&mut self, name: &str) -> Option<&mut TypeDef> {
        self.types.iter_mut().find(|type_def| type_def.name == name)
    }

    /// The selected command names.
    #[must_use]
    pub fn command_names(&self) -> HashSet<&str> {
        self.commands.iter().map(|command| command.name.as_str()).collect()
    }
}

/// Names selected so far during delta replay.
#[derive(Debug, Default)]
struct Selection {
    types: BTreeSet<String>,
    enums: BTreeSet<String>,
    commands: BTreeSet<String>,
}

impl Selection {
    fn add(&mut self, requirement: &Requirement) {
        self.types.extend(requirement.types.iter().cloned());
        self.enums.extend(requirement.enums.iter().cloned());
        self.commands.extend(requirement.commands.iter().cloned());
    }

    fn remove(&mut self, requirement: &Requirement) {
        for name in &requirement.types {
            self.types.remove(name);
        }
        for name in &requirement.enums {
            self.enums.remove(name);
        }
        for name in &requirement.commands {
            self.commands.remove(name);
        }
    }
}

/// Resolves the effective API surface for one request.
///
/// This is the implementation behind [`Registry::select`]; see the module
/// documentation for the algorithm and [`Registry::select`] for the error
/// contract.
pub fn resolve(
    registry: &Registry,
    api: &str,
    version: Version,
    profile: Option<&str>,
    extension_names: &BTreeSet<String>,
) -> Result<FeatureSet, GladgenError> {
    let chain = registry
        .features(api)
        .filter(|chain| !chain.is_empty())
        .ok_or_else(|| GladgenError::UnknownApi { api: api.to_string() })?;

    let applicable: Vec<_> = chain.iter().filter(|feature| feature.version <= version).collect();
    let Some(resolved_version) = applicable.last().map(|feature| feature.version) else {
        return Err(GladgenError::UnsupportedVersion { api: api.to_string(), version });
    };

    let mut selection = Selection::default();
    for feature in &applicable {
        for block in &feature.requires {
            if block.applies_to(api, profile) {
                selection.add(block);
            }
        }
        for block in &feature.removes {
            if block.applies_to(api, profile) {
                selection.remove(block);
            }
        }
    }

    for name in extension_names {
        let extension = registry.extension(api, name).ok_or_else(|| {
            GladgenError::UnknownExtension {
                api: api.to_string(),
                name: name.clone(),
                suggestion: suggest_extension(registry, api, name),
            }
        })?;
        selection.add(&extension.requirements(api, profile));
    }

    close_type_dependencies(registry, &mut selection.types);
    debug!(
        api,
        version = %resolved_version,
        profile = profile.unwrap_or("-"),
        types = selection.types.len(),
        enums = selection.enums.len(),
        commands = selection.commands.len(),
        "resolved feature set"
    );

    Ok(FeatureSet {
        api: api.to_string(),
        version: resolved_version,
        profile: profile.map(str::to_string),
        extensions: extension_names.iter().cloned().collect(),
        types: materialize(registry.types(), &selection.types, |t| &t.name, "type"),
        enums: materialize(registry.enumerants(), &selection.enums, |e| &e.name, "enum"),
        commands: materialize(registry.commands(), &selection.commands, |c| &c.name, "command"),
    })
}

/// Grows the selected type names over their `requires` chains.
fn close_type_dependencies(registry: &Registry, selected: &mut BTreeSet<String>) {
    let mut pending: Vec<String> = selected.iter().cloned().collect();
    while let Some(name) = pending.pop() {
        let Some(dependency) =
            registry.type_def(&name).and_then(|type_def| type_def.requires.clone())
        else {
            continue;
        };
        if selected.insert(dependency.clone()) {
            pending.push(dependency);
        }
    }
}

/// Clones the selected entities out of registry storage, preserving file
/// order. Selected names with no loaded entity are dropped with a warning.
fn materialize<T: Clone>(
    source: &[T],
    selected: &BTreeSet<String>,
    name: impl Fn(&T) -> &str,
    kind: &str,
) -> Vec<T> {
    let mut remaining: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
    let entities: Vec<T> =
        source.iter().filter(|entity| remaining.remove(name(entity))).cloned().collect();
    for missing in remaining {
        warn!(kind, name = missing, "required entity is not defined by the registry, skipping");
    }
    entities
}

/// The closest defined extension name, if it is similar enough to suggest.
fn suggest_extension(registry: &Registry, api: &str, name: &str) -> Option<String> {
    let candidates = registry.extensions(api)?;
    let (distance, closest) = candidates
        .keys()
        .map(|candidate| (strsim::levenshtein(name, candidate), candidate))
        .min_by_key(|(distance, _)| *distance)?;
    if distance * 100 <= closest.len() * SIMILARITY_THRESHOLD_PERCENT {
        Some(closest.clone())
    } else {
        None
    }
}
