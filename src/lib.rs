//! gladgen - Loader generator for Khronos-style API registries
//!
//! gladgen turns a machine-readable API registry (the XML description of an
//! API's types, enumerants, commands, versions, and extensions published for
//! OpenGL-family APIs) into ready-to-compile loader source code, parameterized
//! by caller-chosen options: API version, profile, extension list,
//! multi-context support, function-pointer aliasing, and debug
//! instrumentation.
//!
//! # Architecture Overview
//!
//! Generation is a synchronous pipeline over immutable registry data:
//!
//! 1. The [`registry`] module parses one registry document into a
//!    [`registry::Registry`] of types, enumerants, commands, feature chains,
//!    and extensions.
//! 2. The [`resolver`] module replays the registry's ordered add/remove
//!    deltas to compute a [`resolver::FeatureSet`] - the concrete selection
//!    of entities for one (api, version, profile, extensions) request.
//! 3. The [`generator`] module validates generation options against declared
//!    cross-option constraints, applies registry fix-ups and (optionally) the
//!    alias-driven extension closure, and declares which output documents to
//!    render.
//! 4. The [`render`] module hands the resolved data to the Tera template
//!    engine together with the generator's auxiliary data (naming transform,
//!    alias table, C declaration helpers).
//!
//! The hard part is not text emission - it is computing the *effective
//! surface* of the API for a requested configuration, and resolving the alias
//! relationships among functions so that semantically-identical entry points
//! across core versions and extensions are unified (see [`alias`]).
//!
//! # Core Modules
//!
//! - [`registry`] - registry document parsing and the entity model
//! - [`resolver`] - feature-set resolution and extension-closure expansion
//! - [`alias`] - transitive alias-group construction over commands
//! - [`generator`] - the pluggable generator contract and the C backend
//! - [`render`] - Tera integration for caller-supplied templates
//!
//! ## Supporting Modules
//!
//! - [`cli`] - command-line interface (`generate`, `plan`)
//! - [`config`] - optional `gladgen.toml` option defaults
//! - [`core`] - error types and user-facing error reporting
//! - [`constants`] - shared naming and output-layout constants
//!
//! # Example
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use gladgen::generator::{self, Generator};
//! use gladgen::registry::{Registry, Version};
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = Registry::from_file("gl.xml".as_ref())?;
//! let extensions: BTreeSet<String> =
//!     ["GL_ARB_debug_output".to_string()].into_iter().collect();
//!
//! let feature_set =
//!     registry.select("gl", Version::new(3, 3), Some("core"), &extensions)?;
//!
//! let backend = generator::by_name("c").expect("c backend is built in");
//! let options = backend.validate_options(&Default::default())?;
//! let feature_set = backend.modify_feature_set(&registry, feature_set, &options)?;
//!
//! for document in backend.output_plan(&registry, &feature_set, &options) {
//!     println!("{} -> {}", document.template, document.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Generate a core-profile OpenGL 3.3 loader
//! gladgen generate --registry gl.xml --api gl:core=3.3 \
//!     --templates templates/c --out-dir generated
//!
//! # Inspect the resolved feature set without rendering anything
//! gladgen plan --registry gl.xml --api gl=4.6 --extensions GL_ARB_debug_output
//! ```

// Registry data and derived computations
pub mod alias;
pub mod registry;
pub mod resolver;

// Generation
pub mod generator;
pub mod render;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
