//! Builds the pipeline step metadata service from configuration and renders
//! the catalog.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cascade_step_manifest::ManifestRegistry;
use cascade_step_metadata::{
    BlockedSteps, CatalogBuilder, DecoratorChain, HiddenPropertiesDecorator, PipelineStepMetadataService,
    SnippetizerEndpoint,
};

pub use config::{monitoring_config, CliConfig, ConfigError};

/// Assemble the service for the configured manifest
pub fn build_service(config: &CliConfig) -> Result<PipelineStepMetadataService> {
    let registry = Arc::new(
        ManifestRegistry::load(&config.manifest_path)
            .with_context(|| format!("Failed to load step manifest {}", config.manifest_path.display()))?,
    );

    let blocked = config
        .blocked_steps
        .iter()
        .fold(BlockedSteps::declarative_defaults(), |blocked, name| {
            blocked.with(name.as_str(), "Blocked by configuration")
        });

    let mut decorators = DecoratorChain::new();
    let hidden = HiddenPropertiesDecorator::from_specs(config.hidden_properties.iter().map(String::as_str));
    if !hidden.is_empty() {
        decorators.register(Box::new(hidden));
    }

    info!(
        blocked = blocked.len(),
        decorators = decorators.len(),
        snippetizer = config.snippetizer_enabled,
        "Building step metadata service"
    );

    let builder = CatalogBuilder::new(registry.clone(), registry)
        .with_blocked_steps(blocked)
        .with_decorators(decorators);
    let snippetizer = config
        .snippetizer_enabled
        .then(|| SnippetizerEndpoint::new(config.snippetizer_url_name.clone()));

    Ok(PipelineStepMetadataService::new(builder).with_snippetizer(snippetizer))
}

/// Render the catalog as pretty-printed JSON
pub fn run(config: &CliConfig) -> Result<String> {
    let service = build_service(config)?;
    let catalog = service
        .render_json(&config.context_path)
        .context("Failed to build step metadata catalog")?;
    serde_json::to_string_pretty(&catalog).context("Failed to render step metadata catalog")
}
