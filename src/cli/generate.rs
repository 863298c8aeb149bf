//! The `generate` command: resolve, render, and write loader source.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::common::{merged_raw_options, resolve_request, ApiRequest, OptionFlags};
use crate::core::user_friendly_error;
use crate::generator::{self, Generator, OptionSet};
use crate::registry::Registry;
use crate::render::{render_context, Renderer};

/// Resolve and render loader source for one or more apis.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Path to the registry XML document
    #[arg(long)]
    registry: PathBuf,

    /// Api to generate, as NAME[:PROFILE][=VERSION]; repeatable
    #[arg(long = "api", required = true)]
    apis: Vec<ApiRequest>,

    /// Extension names to include; repeatable, comma-separated
    #[arg(long = "extensions", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Directory the output templates are loaded from
    #[arg(long)]
    templates: PathBuf,

    /// Directory generated documents are written under
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,

    /// Generator backend
    #[arg(long, default_value = "c")]
    generator: String,

    /// Path to a gladgen.toml supplying default option values
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    options: OptionFlags,
}

impl GenerateCommand {
    /// Runs generation for every requested api.
    ///
    /// Apis are processed independently: a failing api is reported and the
    /// remaining apis still generate. Option validation and registry
    /// loading failures are fatal for the whole invocation.
    pub fn execute(self) -> Result<()> {
        let backend = generator::by_name(&self.generator)
            .with_context(|| format!("unknown generator '{}'", self.generator))?;

        // Validate options before any resolution work.
        let raw = merged_raw_options(self.config.as_ref(), &self.options)?;
        let options = backend.validate_options(&raw)?;

        let registry = Registry::from_file(&self.registry)?;
        let mut renderer = Renderer::from_directory(&self.templates)?;
        let extensions: BTreeSet<String> = self.extensions.iter().cloned().collect();

        let mut failures = 0usize;
        for request in &self.apis {
            if let Err(error) =
                self.generate_api(&registry, backend.as_ref(), &options, &mut renderer, &extensions, request)
            {
                failures += 1;
                user_friendly_error(error.context(format!("generation failed for '{}'", request.api)))
                    .display();
            }
        }

        if failures > 0 {
            bail!("generation failed for {failures} of {} api(s)", self.apis.len());
        }
        Ok(())
    }

    fn generate_api(
        &self,
        registry: &Registry,
        backend: &dyn Generator,
        options: &OptionSet,
        renderer: &mut Renderer,
        extensions: &BTreeSet<String>,
        request: &ApiRequest,
    ) -> Result<()> {
        let feature_set = resolve_request(registry, backend, options, request, extensions)?;
        info!(
            api = %feature_set.api,
            version = %feature_set.version,
            commands = feature_set.commands.len(),
            extensions = feature_set.extensions.len(),
            "resolved feature set"
        );

        let auxiliary = backend.auxiliary_data(&feature_set, options);
        renderer.install_auxiliary(&auxiliary);
        let context = render_context(registry.name(), &feature_set, options, &auxiliary);

        for document in backend.output_plan(registry, &feature_set, options) {
            let text = renderer.render(&document.template, &context)?;
            let path = self.out_dir.join(&document.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), template = %document.template, "wrote document");
        }

        Ok(())
    }
}
