//! Template rendering with Tera.
//!
//! gladgen does not implement variable substitution itself: the generator
//! core produces a fully-resolved feature set, validated options, and an
//! auxiliary-data bundle, and this module hands all of it to the Tera
//! engine. Templates are caller-supplied - loaded from a directory by the
//! CLI, or registered as raw strings in tests and embedding code.
//!
//! # Template interface
//!
//! The primary rendering context exposes:
//!
//! - `registry` - the spec-variant name (`gl`, `egl`, `wgl`, `glx`)
//! - `feature_set` - the resolved [`FeatureSet`] (api, version, profile,
//!   extensions, types, enums, commands)
//! - `options` - the validated option values, keyed by canonical name
//! - `aliases` - the alias groups over the feature set's commands
//!
//! The generator's auxiliary data is additionally registered on the engine:
//!
//! - `ctx(name=..., raw=..., name_only=...)` - the identifier-rewriting
//!   policy (see [`crate::generator::NameTransform`])
//! - `debug_impl(command=..., code_name=...)` - the per-command
//!   debug-wrapping strings (see [`crate::generator::c::debug`])
//! - `value | c_type` - clean C type for a declaration's type text
//! - `params | c_params` - comma-joined raw parameter declarations

use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

use crate::generator::c::debug::debug_arguments;
use crate::generator::c::{params_to_c, to_c_type};
use crate::generator::{AuxiliaryData, OptionSet};
use crate::core::GladgenError;
use crate::registry::{Command, Param};
use crate::resolver::FeatureSet;

/// Template renderer wrapping a Tera instance.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Loads every template under a directory.
    ///
    /// Template identifiers are paths relative to the directory, so the
    /// output plan's `gl.h` resolves to `<dir>/gl.h`.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::TemplateLoad`] when the directory cannot be
    /// globbed or a template fails to parse.
    pub fn from_directory(dir: &Path) -> Result<Self, GladgenError> {
        let pattern = dir.join("**").join("*").to_string_lossy().into_owned();
        let tera = Tera::new(&pattern).map_err(|error| GladgenError::TemplateLoad {
            path: dir.display().to_string(),
            source: Box::new(error),
        })?;
        Ok(Self { tera })
    }

    /// Builds a renderer from raw named templates.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::TemplateLoad`] when a template fails to
    /// parse.
    pub fn from_raw_templates(templates: &[(&str, &str)]) -> Result<Self, GladgenError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.to_vec()).map_err(|error| {
            GladgenError::TemplateLoad {
                path: "<raw templates>".to_string(),
                source: Box::new(error),
            }
        })?;
        Ok(Self { tera })
    }

    /// Registers the generator's auxiliary data as template functions and
    /// the C declaration helpers as filters.
    ///
    /// Must be called once per generated api, before rendering its
    /// documents: the naming transform is configuration-specific.
    pub fn install_auxiliary(&mut self, auxiliary: &AuxiliaryData) {
        let naming = auxiliary.naming.clone();
        self.tera.register_function(
            "ctx",
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let name = args
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| tera::Error::msg("ctx requires a string 'name' argument"))?;
                let raw = args.get("raw").and_then(Value::as_bool).unwrap_or(false);
                let name_only = args.get("name_only").and_then(Value::as_bool).unwrap_or(false);
                Ok(Value::String(naming.apply(name, raw, name_only)))
            },
        );

        self.tera.register_function(
            "debug_impl",
            |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let command = args
                    .get("command")
                    .cloned()
                    .ok_or_else(|| tera::Error::msg("debug_impl requires a 'command' argument"))?;
                let command: Command = serde_json::from_value(command)
                    .map_err(|error| tera::Error::msg(format!("debug_impl: {error}")))?;
                let code_name =
                    args.get("code_name").and_then(Value::as_str).map(str::to_string);
                let derived = debug_arguments(&command, code_name.as_deref());
                serde_json::to_value(derived)
                    .map_err(|error| tera::Error::msg(format!("debug_impl: {error}")))
            },
        );

        self.tera.register_filter(
            "c_type",
            |value: &Value, _args: &HashMap<String, Value>| -> tera::Result<Value> {
                let type_text = value
                    .as_str()
                    .ok_or_else(|| tera::Error::msg("c_type expects a string"))?;
                Ok(Value::String(to_c_type(type_text)))
            },
        );

        self.tera.register_filter(
            "c_params",
            |value: &Value, _args: &HashMap<String, Value>| -> tera::Result<Value> {
                let params: Vec<Param> = serde_json::from_value(value.clone())
                    .map_err(|error| tera::Error::msg(format!("c_params: {error}")))?;
                Ok(Value::String(params_to_c(&params)))
            },
        );
    }

    /// Renders one output document.
    ///
    /// # Errors
    ///
    /// Returns [`GladgenError::Render`] naming the template on failure.
    pub fn render(&self, template: &str, context: &Context) -> Result<String, GladgenError> {
        self.tera.render(template, context).map_err(|error| GladgenError::Render {
            template: template.to_string(),
            source: Box::new(error),
        })
    }
}

/// Assembles the primary rendering context for one api's documents.
#[must_use]
pub fn render_context(
    registry_name: &str,
    feature_set: &FeatureSet,
    options: &OptionSet,
    auxiliary: &AuxiliaryData,
) -> Context {
    let mut context = Context::new();
    context.insert("registry", registry_name);
    context.insert("feature_set", feature_set);
    context.insert("options", options.values());
    context.insert("aliases", &auxiliary.aliases);
    context
}
