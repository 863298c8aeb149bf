//! Optional `gladgen.toml` configuration.
//!
//! A project can keep its default generator options in a TOML file instead
//! of repeating CLI flags:
//!
//! ```toml
//! [options]
//! alias = true
//! loader = true
//! ```
//!
//! The file supplies the base raw-option map; CLI flags are merged on top
//! before the generator validates the result, so a flag always wins over
//! the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::GladgenError;

/// Parsed contents of a `gladgen.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Default generator option values
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

impl FileConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Converts the `[options]` table into the raw string map the generator
    /// validates.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::Constraint`] for option values that are
    /// neither booleans nor strings.
    pub fn raw_options(&self) -> Result<BTreeMap<String, String>, GladgenError> {
        let mut raw = BTreeMap::new();
        for (key, value) in &self.options {
            let value = match value {
                toml::Value::Boolean(flag) => flag.to_string(),
                toml::Value::String(text) => text.clone(),
                other => {
                    return Err(GladgenError::Constraint {
                        rule: format!(
                            "option '{key}' in the config file must be a boolean, got {other}"
                        ),
                    });
                }
            };
            raw.insert(key.clone(), value);
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_option_table() {
        let config: FileConfig =
            toml::from_str("[options]\nalias = true\nloader = \"false\"\n").unwrap();
        let raw = config.raw_options().unwrap();
        assert_eq!(raw["alias"], "true");
        assert_eq!(raw["loader"], "false");
    }

    #[test]
    fn missing_options_table_defaults_to_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.raw_options().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_scalar_option_values() {
        let config: FileConfig = toml::from_str("[options]\nalias = [1, 2]\n").unwrap();
        let error = config.raw_options().unwrap_err();
        assert!(error.to_string().contains("must be a boolean"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gladgen.toml");
        std::fs::write(&path, "[options]\nmx = true\n").unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.raw_options().unwrap()["mx"], "true");

        assert!(FileConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
