//! The registry entity model.
//!
//! These types are the in-memory representation of one parsed registry
//! document: C type declarations, enumerant values, command prototypes, the
//! per-api feature (version) chains with their ordered requirement/removal
//! deltas, and the extension catalog. All of them are loaded once by
//! [`crate::registry::Registry::parse`] and treated as read-only
//! source-of-truth data afterwards; derived results
//! ([`crate::resolver::FeatureSet`]) own clones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `major.minor` api version as used by registry feature chains.
///
/// Versions order lexicographically on `(major, minor)`, so `3.10 > 3.9`.
///
/// # Examples
///
/// ```rust
/// use gladgen::registry::Version;
///
/// let version: Version = "3.3".parse()?;
/// assert_eq!(version, Version::new(3, 3));
/// assert!(version < Version::new(4, 0));
/// assert_eq!(version.to_string(), "3.3");
/// # Ok::<(), gladgen::registry::VersionParseError>(())
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    /// Major version component
    pub major: u16,
    /// Minor version component
    pub minor: u16,
}

impl Version {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error parsing a version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{0}', expected MAJOR.MINOR")]
pub struct VersionParseError(pub String);

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError(s.to_string());
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => {
                (major.parse().map_err(|_| invalid())?, minor.parse().map_err(|_| invalid())?)
            }
            None => (s.parse().map_err(|_| invalid())?, 0),
        };
        Ok(Self { major, minor })
    }
}

/// A named C type declaration from the registry's `<types>` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type name, unique within the registry
    pub name: String,
    /// Raw declaration text, emitted verbatim into generated headers.
    ///
    /// May embed preprocessor-conditional fragments. Rewritten on feature-set
    /// clones by the fix-up pass; never on the registry's own copy.
    pub raw: String,
    /// Name of another type this declaration depends on, if any
    pub requires: Option<String>,
}

/// A named enumerant value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerant {
    /// Enumerant name, unique within the registry
    pub name: String,
    /// Literal value text as it appears in the registry
    pub value: String,
    /// Associated enumerant group, if any
    pub group: Option<String>,
}

/// One parameter of a command prototype.
///
/// The registry encodes pointer and array syntax inline with the parameter
/// name (a `*` glued to the identifier, a trailing `[4]`). `type_text` keeps
/// the declaration with the name removed and any glued stars preserved;
/// array suffixes are normalized to pointers only when a clean C type string
/// is rendered (see [`crate::generator::c::to_c_type`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Full declaration text, e.g. `const GLfloat *params`
    pub raw: String,
    /// Bare parameter name
    pub name: String,
    /// Declaration text with the name removed, stars kept
    pub type_text: String,
}

/// A command (function) prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command name, unique within an api namespace
    pub name: String,
    /// Return type text, same shape as [`Param::type_text`]
    pub ret: String,
    /// Ordered parameter list
    pub params: Vec<Param>,
    /// Name of another command this one is interchangeable with, if any
    pub alias: Option<String>,
}

/// One `<require>` or `<remove>` block: the entity names a feature or
/// extension contributes (or retracts), scoped to an optional api and
/// profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Api scope; `None` applies to every api
    pub api: Option<String>,
    /// Profile scope; `None` applies to every profile
    pub profile: Option<String>,
    /// Type names in this block
    pub types: Vec<String>,
    /// Enumerant names in this block
    pub enums: Vec<String>,
    /// Command names in this block
    pub commands: Vec<String>,
}

impl Requirement {
    /// Whether this block applies to the given api/profile request.
    #[must_use]
    pub fn applies_to(&self, api: &str, profile: Option<&str>) -> bool {
        self.api.as_deref().is_none_or(|scoped| scoped == api)
            && self.profile.as_deref().is_none_or(|scoped| Some(scoped) == profile)
    }

    /// Whether the block names no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.enums.is_empty() && self.commands.is_empty()
    }
}

/// A named api version: its requirement deltas followed by its removal
/// deltas.
///
/// Removals always apply after requirements within the same feature, which
/// models "added then later removed within the same version block". Across
/// features the chain is replayed in ascending version order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Api this feature belongs to
    pub api: String,
    /// Feature name, e.g. `GL_VERSION_3_2`
    pub name: String,
    /// Numeric version of this feature
    pub version: Version,
    /// Ordered requirement blocks
    pub requires: Vec<Requirement>,
    /// Ordered removal blocks
    pub removes: Vec<Requirement>,
}

/// An optional, independently selectable bundle of additional
/// types/enums/commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Extension name, e.g. `GL_ARB_debug_output`
    pub name: String,
    /// Api names this extension supports (the registry's `supported` tokens)
    pub supported: Vec<String>,
    /// Ordered requirement blocks
    pub requires: Vec<Requirement>,
}

impl Extension {
    /// The merged requirement set this extension contributes for one
    /// api/profile request.
    #[must_use]
    pub fn requirements(&self, api: &str, profile: Option<&str>) -> Requirement {
        let mut merged = Requirement::default();
        for block in self.requires.iter().filter(|block| block.applies_to(api, profile)) {
            merged.types.extend(block.types.iter().cloned());
            merged.enums.extend(block.enums.iter().cloned());
            merged.commands.extend(block.commands.iter().cloned());
        }
        merged
    }
}
