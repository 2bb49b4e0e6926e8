//! The read operation exposed to the pipeline authoring UI.

use tracing::debug;

use crate::catalog::CatalogBuilder;
use crate::error::MetadataError;
use crate::model::StepMetadata;

/// Path segment the service is mounted under
pub const URL_NAME: &str = "pipeline-step-metadata";

/// Default path segment of the snippet generator
pub const DEFAULT_SNIPPETIZER_URL_NAME: &str = "pipeline-syntax";

/// The consumer's snippet generator, used to build per-step invocation URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetizerEndpoint {
    url_name: String,
}

impl SnippetizerEndpoint {
    pub fn new(url_name: impl Into<String>) -> Self {
        Self {
            url_name: url_name.into(),
        }
    }

    pub fn url_name(&self) -> &str {
        &self.url_name
    }

    /// URL that generates a snippet for a step posted to it
    pub fn generate_snippet_url(&self, context_path: &str) -> String {
        format!(
            "{}/{}/generateSnippet",
            context_path.trim_end_matches('/'),
            self.url_name.trim_matches('/')
        )
    }
}

impl Default for SnippetizerEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SNIPPETIZER_URL_NAME)
    }
}

/// Serves the step metadata catalog
pub struct PipelineStepMetadataService {
    builder: CatalogBuilder,
    snippetizer: Option<SnippetizerEndpoint>,
}

impl PipelineStepMetadataService {
    pub fn new(builder: CatalogBuilder) -> Self {
        Self {
            builder,
            snippetizer: Some(SnippetizerEndpoint::default()),
        }
    }

    /// Use a different snippet generator, or none at all
    pub fn with_snippetizer(mut self, snippetizer: Option<SnippetizerEndpoint>) -> Self {
        self.snippetizer = snippetizer;
        self
    }

    pub fn url_name(&self) -> &'static str {
        URL_NAME
    }

    /// All step metadata visible to the authoring UI.
    ///
    /// `context_path` is the path prefix the consumer is served under; it is
    /// only used to form invocation URLs.
    pub fn get_pipeline_step_metadata(&self, context_path: &str) -> Result<Vec<StepMetadata>, MetadataError> {
        let invocation_base = self
            .snippetizer
            .as_ref()
            .map(|snippetizer| snippetizer.generate_snippet_url(context_path));
        debug!(invocation_base = ?invocation_base, "Serving step metadata");

        self.builder.build_catalog(invocation_base.as_deref())
    }

    /// The catalog as a JSON array
    pub fn render_json(&self, context_path: &str) -> Result<serde_json::Value, MetadataError> {
        let catalog = self.get_pipeline_step_metadata(context_path)?;
        Ok(serde_json::to_value(catalog)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sleep_step, FakeRegistry};
    use std::sync::Arc;

    fn service(registry: FakeRegistry) -> PipelineStepMetadataService {
        let registry = Arc::new(registry);
        PipelineStepMetadataService::new(CatalogBuilder::new(registry.clone(), registry))
    }

    #[test]
    fn test_generate_snippet_url() {
        let endpoint = SnippetizerEndpoint::default();
        assert_eq!(endpoint.generate_snippet_url(""), "/pipeline-syntax/generateSnippet");
        assert_eq!(endpoint.generate_snippet_url("/jenkins"), "/jenkins/pipeline-syntax/generateSnippet");
        assert_eq!(endpoint.generate_snippet_url("/jenkins/"), "/jenkins/pipeline-syntax/generateSnippet");
    }

    #[test]
    fn test_invocation_url_uses_context_path() {
        let (step, params) = sleep_step();
        let service = service(FakeRegistry::new().with_step(step, params));

        let catalog = service.get_pipeline_step_metadata("/ci").unwrap();
        assert_eq!(
            catalog[0].header.invocation_url.as_deref(),
            Some("/ci/pipeline-syntax/generateSnippet?$class=org.example.SleepStep")
        );
        assert_eq!(service.url_name(), "pipeline-step-metadata");
    }

    #[test]
    fn test_without_snippetizer_no_invocation_urls() {
        let (step, params) = sleep_step();
        let service = service(FakeRegistry::new().with_step(step, params)).with_snippetizer(None);

        let catalog = service.get_pipeline_step_metadata("/ci").unwrap();
        assert_eq!(catalog[0].header.invocation_url, None);
    }

    #[test]
    fn test_render_json_is_an_array() {
        let (step, params) = sleep_step();
        let service = service(FakeRegistry::new().with_step(step, params));

        let json = service.render_json("").unwrap();
        let records = json.as_array().expect("catalog renders as an array");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["functionName"], "sleep");
        assert_eq!(records[0]["properties"][1]["type"], "java.util.concurrent.TimeUnit");
    }

    #[test]
    fn test_render_json_propagates_unavailable_registry() {
        let service = service(FakeRegistry::unavailable("shutting down"));
        let err = service.render_json("").unwrap_err();
        assert_eq!(err.error_code(), "ERR_METADATA_CATALOG_UNAVAILABLE");
    }
}
