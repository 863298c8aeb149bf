//! The `plan` command: print the resolution result as JSON.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::common::{merged_raw_options, resolve_request, ApiRequest, OptionFlags};
use crate::generator;
use crate::registry::Registry;

/// Print the resolution result as JSON without rendering.
#[derive(Args, Debug)]
pub struct PlanCommand {
    /// Path to the registry XML document
    #[arg(long)]
    registry: PathBuf,

    /// Api to plan, as NAME[:PROFILE][=VERSION]; repeatable
    #[arg(long = "api", required = true)]
    apis: Vec<ApiRequest>,

    /// Extension names to include; repeatable, comma-separated
    #[arg(long = "extensions", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Generator backend
    #[arg(long, default_value = "c")]
    generator: String,

    /// Path to a gladgen.toml supplying default option values
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    options: OptionFlags,
}

impl PlanCommand {
    /// Resolves every requested api and prints one JSON document to stdout.
    ///
    /// A failing api is reported inside the JSON (an `error` entry) instead
    /// of aborting the others; the process still exits non-zero.
    pub fn execute(self) -> Result<()> {
        let backend = generator::by_name(&self.generator)
            .with_context(|| format!("unknown generator '{}'", self.generator))?;

        let raw = merged_raw_options(self.config.as_ref(), &self.options)?;
        let options = backend.validate_options(&raw)?;

        let registry = Registry::from_file(&self.registry)?;
        let extensions: BTreeSet<String> = self.extensions.iter().cloned().collect();

        let mut failures = 0usize;
        let mut apis = Vec::new();
        for request in &self.apis {
            match resolve_request(&registry, backend.as_ref(), &options, request, &extensions) {
                Ok(feature_set) => {
                    let auxiliary = backend.auxiliary_data(&feature_set, &options);
                    let documents = backend.output_plan(&registry, &feature_set, &options);
                    apis.push(json!({
                        "api": feature_set.api,
                        "version": feature_set.version.to_string(),
                        "profile": feature_set.profile,
                        "extensions": feature_set.extensions,
                        "counts": {
                            "types": feature_set.types.len(),
                            "enums": feature_set.enums.len(),
                            "commands": feature_set.commands.len(),
                        },
                        "aliases": auxiliary.aliases,
                        "documents": documents,
                    }));
                }
                Err(error) => {
                    failures += 1;
                    apis.push(json!({
                        "api": request.api,
                        "error": error.to_string(),
                    }));
                }
            }
        }

        let plan = json!({
            "registry": registry.name(),
            "generator": backend.name(),
            "options": options.values(),
            "apis": apis,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);

        if failures > 0 {
            bail!("planning failed for {failures} of {} api(s)", self.apis.len());
        }
        Ok(())
    }
}
