//! Registry loading and querying.
//!
//! A [`Registry`] is the queryable, read-only form of one registry XML
//! document (`gl.xml`, `egl.xml`, `wgl.xml`, `glx.xml`): name-indexed
//! types/enums/commands in file order, the ordered per-api feature chains,
//! and the per-api extension catalogs. It is loaded once per invocation and
//! shared read-only across every api generated from it.
//!
//! The central operation is [`Registry::select`], which resolves the
//! effective API surface for one (api, version, profile, extensions) request
//! by replaying the registry's add/remove deltas - see [`crate::resolver`]
//! for the algorithm.
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
//!     registry.select("gl", Version::new(4, 6), Some("core"), &BTreeSet::new())?;
//! println!("{} commands selected", feature_set.commands.len());
//! # Ok(())
//! # }
//! ```

pub mod entity;
mod xml;

pub use entity::{
    Command, Enumerant, Extension, Feature, Param, Requirement, TypeDef, Version,
    VersionParseError,
};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::core::GladgenError;
use crate::resolver::{self, FeatureSet};

/// One parsed registry document.
///
/// Entity storage preserves registry file order (dependency order for types),
/// with name indexes for lookup. Feature chains are kept sorted by version.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) name: String,
    pub(crate) types: Vec<TypeDef>,
    pub(crate) type_index: HashMap<String, usize>,
    pub(crate) enums: Vec<Enumerant>,
    pub(crate) enum_index: HashMap<String, usize>,
    pub(crate) commands: Vec<Command>,
    pub(crate) command_index: HashMap<String, usize>,
    pub(crate) features: HashMap<String, Vec<Feature>>,
    pub(crate) extensions: HashMap<String, BTreeMap<String, Extension>>,
}

impl Registry {
    /// Reads and parses a registry document from a file.
    ///
    /// The registry name (the spec variant used for template identifiers) is
    /// derived from the file stem, so `path/to/gl.xml` loads as registry
    /// `gl`.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::Io`] if the file cannot be read and
    /// [`GladgenError::RegistryParse`] if the document is not a well-formed
    /// registry.
    pub fn from_file(path: &Path) -> Result<Self, GladgenError> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("registry")
            .to_string();
        Self::parse(&name, &text).map_err(|error| match error {
            GladgenError::RegistryParse { reason, .. } => GladgenError::RegistryParse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parses a registry document from a string.
    ///
    /// `name` identifies the spec variant (`gl`, `egl`, `wgl`, `glx`); output
    /// templates are named after it.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::RegistryParse`] if the document is not
    /// well-formed XML or has no `<registry>` root element.
    pub fn parse(name: &str, text: &str) -> Result<Self, GladgenError> {
        xml::parse_registry(name, text)
    }

    /// The registry's spec-variant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The api names this registry has feature chains for, sorted.
    #[must_use]
    pub fn apis(&self) -> Vec<&str> {
        let mut apis: Vec<&str> = self.features.keys().map(String::as_str).collect();
        apis.sort_unstable();
        apis
    }

    /// The ordered feature chain for an api, lowest version first.
    #[must_use]
    pub fn features(&self, api: &str) -> Option<&[Feature]> {
        self.features.get(api).map(Vec::as_slice)
    }

    /// The newest feature version in an api's chain.
    #[must_use]
    pub fn latest_version(&self, api: &str) -> Option<Version> {
        self.features(api)?.last().map(|feature| feature.version)
    }

    /// The extension catalog for an api, keyed by extension name.
    #[must_use]
    pub fn extensions(&self, api: &str) -> Option<&BTreeMap<String, Extension>> {
        self.extensions.get(api)
    }

    /// Looks up one extension of an api by name.
    #[must_use]
    pub fn extension(&self, api: &str, name: &str) -> Option<&Extension> {
        self.extensions.get(api)?.get(name)
    }

    /// Looks up a type declaration by name.
    #[must_use]
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.type_index.get(name).map(|&index| &self.types[index])
    }

    /// Looks up an enumerant by name.
    #[must_use]
    pub fn enumerant(&self, name: &str) -> Option<&Enumerant> {
        self.enum_index.get(name).map(|&index| &self.enums[index])
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.command_index.get(name).map(|&index| &self.commands[index])
    }

    /// All type declarations in registry file order.
    #[must_use]
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    /// All enumerants in registry file order.
    #[must_use]
    pub fn enumerants(&self) -> &[Enumerant] {
        &self.enums
    }

    /// All commands in registry file order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Resolves the effective API surface for one request.
    ///
    /// This is the delta-replay primitive specified in [`crate::resolver`]:
    /// the feature chain for `api` is walked from the lowest version up to
    /// and including `version`, applying requirement then removal deltas per
    /// feature, and the requirement sets of the named extensions are unioned
    /// in afterwards.
    ///
    /// # Errors
    ///
    /// - [`GladgenError::UnknownApi`] if `api` has no feature chain
    /// - [`GladgenError::UnsupportedVersion`] if no feature is `<= version`
    /// - [`GladgenError::UnknownExtension`] if any extension name is not
    ///   defined for `api`
    pub fn select(
        &self,
        api: &str,
        version: Version,
        profile: Option<&str>,
        extension_names: &BTreeSet<String>,
    ) -> Result<FeatureSet, GladgenError> {
        resolver::resolve(self, api, version, profile, extension_names)
    }
}
