//! Argument types and pipeline steps shared by the CLI commands.

use clap::Args;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::config::FileConfig;
use crate::core::GladgenError;
use crate::generator::{Generator, OptionSet};
use crate::registry::{Registry, Version};
use crate::resolver::FeatureSet;

/// One requested api: `NAME[:PROFILE][=VERSION]`.
///
/// When the version is omitted, the newest feature in the api's chain is
/// used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Api name, e.g. `gl`
    pub api: String,
    /// Requested profile, if any
    pub profile: Option<String>,
    /// Requested version; `None` selects the newest
    pub version: Option<Version>,
}

/// Error parsing an api request string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid api request '{0}', expected NAME[:PROFILE][=VERSION]")]
pub struct ApiRequestParseError(String);

impl FromStr for ApiRequest {
    type Err = ApiRequestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiRequestParseError(s.to_string());

        let (head, version) = match s.split_once('=') {
            Some((head, version)) => {
                (head, Some(version.parse().map_err(|_| invalid())?))
            }
            None => (s, None),
        };
        let (api, profile) = match head.split_once(':') {
            Some((api, profile)) if !profile.is_empty() => (api, Some(profile.to_string())),
            Some(_) => return Err(invalid()),
            None => (head, None),
        };
        if api.is_empty() {
            return Err(invalid());
        }

        Ok(Self { api: api.to_string(), profile, version })
    }
}

/// Generator option switches exposed as CLI flags.
///
/// Flags only ever *enable* an option, so config-file defaults survive when
/// a flag is not given.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionFlags {
    /// Wrap every call with pre/post callback hooks
    #[arg(long)]
    pub debug: bool,

    /// Resolve function aliases across extensions at load time
    #[arg(long)]
    pub alias: bool,

    /// Put all functions and constants behind a per-context handle
    #[arg(long)]
    pub mx: bool,

    /// Also emit global entry points dispatching through a current-context
    /// pointer
    #[arg(long)]
    pub mx_global: bool,

    /// Merge all outputs into one header guarded by an implementation macro
    #[arg(long)]
    pub header_only: bool,

    /// Include a runtime symbol-loading implementation
    #[arg(long)]
    pub loader: bool,
}

impl OptionFlags {
    fn enabled(&self) -> impl Iterator<Item = &'static str> {
        [
            ("DEBUG", self.debug),
            ("ALIAS", self.alias),
            ("MX", self.mx),
            ("MX_GLOBAL", self.mx_global),
            ("HEADER_ONLY", self.header_only),
            ("LOADER", self.loader),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
    }
}

/// Builds the raw option map: config-file defaults with CLI flags merged on
/// top.
///
/// # Errors
///
/// Fails when the config file cannot be loaded or contains non-scalar
/// option values.
pub fn merged_raw_options(
    config: Option<&PathBuf>,
    flags: &OptionFlags,
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut raw = match config {
        Some(path) => FileConfig::load(path)?.raw_options()?,
        None => BTreeMap::new(),
    };
    for name in flags.enabled() {
        raw.insert(name.to_string(), "true".to_string());
    }
    Ok(raw)
}

/// Resolves one api request and applies the generator's feature-set
/// post-processing.
///
/// # Errors
///
/// Propagates resolution errors; see [`Registry::select`].
pub fn resolve_request(
    registry: &Registry,
    generator: &dyn Generator,
    options: &OptionSet,
    request: &ApiRequest,
    extensions: &BTreeSet<String>,
) -> Result<FeatureSet, GladgenError> {
    let version = match request.version.or_else(|| registry.latest_version(&request.api)) {
        Some(version) => version,
        None => return Err(GladgenError::UnknownApi { api: request.api.clone() }),
    };
    let feature_set =
        registry.select(&request.api, version, request.profile.as_deref(), extensions)?;
    generator.modify_feature_set(registry, feature_set, options)
}
