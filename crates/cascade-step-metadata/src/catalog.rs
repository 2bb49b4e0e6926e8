//! Assembles the step catalog from the registry.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::classifier::RoleClassifier;
use crate::decorator::DecoratorChain;
use crate::descriptor::{BaseCapability, Descriptor, StepDescriptor};
use crate::error::MetadataError;
use crate::extractor::ParameterExtractor;
use crate::model::{StepHeader, StepMetadata};
use crate::registry::{BlockedSteps, IntrospectionModelProvider, StepRegistry};

/// Builds the ordered catalog of step metadata.
///
/// Every call reads a fresh snapshot of the registry; nothing is cached and
/// no state is shared between calls, so one builder can serve concurrent
/// callers.
pub struct CatalogBuilder {
    registry: Arc<dyn StepRegistry>,
    model: Arc<dyn IntrospectionModelProvider>,
    blocked: BlockedSteps,
    decorators: DecoratorChain,
    classifier: RoleClassifier,
}

impl CatalogBuilder {
    pub fn new(registry: Arc<dyn StepRegistry>, model: Arc<dyn IntrospectionModelProvider>) -> Self {
        Self {
            registry,
            model,
            blocked: BlockedSteps::declarative_defaults(),
            decorators: DecoratorChain::new(),
            classifier: RoleClassifier::new(),
        }
    }

    /// Replace the blocked-step list
    pub fn with_blocked_steps(mut self, blocked: BlockedSteps) -> Self {
        self.blocked = blocked;
        self
    }

    /// Replace the decorator chain
    pub fn with_decorators(mut self, decorators: DecoratorChain) -> Self {
        self.decorators = decorators;
        self
    }

    /// Build the catalog.
    ///
    /// Native steps come first, then meta-steps, each in registry order.
    /// When `invocation_base` is given, native steps get an invocation URL
    /// pointing at it. Individual steps that cannot be assembled are left out;
    /// only a registry failure fails the whole build.
    #[instrument(skip(self), fields(blocked = self.blocked.len(), decorators = self.decorators.len()))]
    pub fn build_catalog(&self, invocation_base: Option<&str>) -> Result<Vec<StepMetadata>, MetadataError> {
        let natives = self.registry.all_step_descriptors()?;

        let mut candidates: Vec<Descriptor> = natives
            .into_iter()
            .filter(|d| self.is_listed(d))
            .map(Descriptor::Native)
            .collect();

        for base in BaseCapability::ALL {
            for meta in self.registry.all_meta_step_candidates(base)? {
                if meta.symbol().is_some() {
                    candidates.push(Descriptor::Meta(meta));
                } else {
                    let err = MetadataError::MissingStableIdentifier(meta.type_identity.clone());
                    debug!(base = %base, error = %err, "Skipping meta-step");
                }
            }
        }

        let mut seen = HashSet::new();
        let mut catalog = Vec::with_capacity(candidates.len());

        for descriptor in &candidates {
            match self.assemble(descriptor, invocation_base) {
                Ok(step) => {
                    if seen.insert(step.header.function_name.clone()) {
                        catalog.push(step);
                    } else {
                        warn!(
                            function_name = %step.header.function_name,
                            step_type = %step.header.step_type,
                            "Duplicate function name, keeping the first registration"
                        );
                    }
                }
                Err(err) if err.is_recoverable() => match err {
                    MetadataError::DecoratorFailed { .. } => {
                        warn!(error = %err, code = err.error_code(), "Omitting step from catalog")
                    }
                    _ => debug!(error = %err, code = err.error_code(), "Omitting step from catalog"),
                },
                Err(err) => return Err(err),
            }
        }

        info!(candidates = candidates.len(), steps = catalog.len(), "Built step metadata catalog");
        Ok(catalog)
    }

    fn is_listed(&self, descriptor: &StepDescriptor) -> bool {
        if let Some(reason) = self.blocked.reason(&descriptor.function_name) {
            debug!(function_name = %descriptor.function_name, reason, "Skipping blocked step");
            return false;
        }
        if descriptor.advanced {
            debug!(function_name = %descriptor.function_name, "Skipping advanced step");
            return false;
        }
        true
    }

    /// Normalize either kind of descriptor into a decorated record
    fn assemble(&self, descriptor: &Descriptor, invocation_base: Option<&str>) -> Result<StepMetadata, MetadataError> {
        let function_name = descriptor
            .function_name()
            .ok_or_else(|| MetadataError::MissingStableIdentifier(descriptor.type_identity().clone()))?;

        let extractor = ParameterExtractor::new(self.model.as_ref(), self.registry.as_ref());
        let properties = extractor.extract_parameters(descriptor.type_identity())?;
        let roles = self.classifier.classify(descriptor, &properties);

        let invocation_url = match (descriptor, invocation_base) {
            (Descriptor::Native(d), Some(base)) => Some(format!("{}?$class={}", base, d.type_identity)),
            _ => None,
        };

        let mut step = StepMetadata {
            header: StepHeader {
                display_name: descriptor.display_name().to_string(),
                function_name: function_name.to_string(),
                step_type: descriptor.type_identity().clone(),
                descriptor_url: descriptor.descriptor_url().to_string(),
                required_context: roles.required_context,
                provided_context: roles.provided_context,
                is_block_container: roles.is_block_container,
                has_single_required_parameter: roles.has_single_required_parameter,
                invocation_url,
            },
            properties,
        };

        self.decorators.apply(&mut step)?;
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MetaStepDescriptor;
    use crate::test_utils::{sleep_step, FakeRegistry};
    use crate::types::ParameterDeclaration;

    fn builder(registry: FakeRegistry) -> CatalogBuilder {
        let registry = Arc::new(registry);
        CatalogBuilder::new(registry.clone(), registry)
    }

    #[test]
    fn test_native_steps_precede_meta_steps() {
        let registry = FakeRegistry::new()
            .with_meta_step(
                MetaStepDescriptor::new(BaseCapability::Builder, "Shell", "a.Shell").with_symbol("shell"),
                vec![ParameterDeclaration::new("command", "java.lang.String", true)],
            )
            .with_step(sleep_step().0, sleep_step().1);

        let catalog = builder(registry).build_catalog(None).unwrap();

        let names: Vec<&str> = catalog.iter().map(|s| s.function_name()).collect();
        assert_eq!(names, vec!["sleep", "shell"]);
    }

    #[test]
    fn test_invocation_url_only_for_native_steps() {
        let registry = FakeRegistry::new()
            .with_step(sleep_step().0, sleep_step().1)
            .with_meta_step(
                MetaStepDescriptor::new(BaseCapability::Publisher, "Archive", "a.Archiver").with_symbol("archive"),
                vec![],
            );
        let builder = builder(registry);

        let catalog = builder.build_catalog(Some("/jenkins/pipeline-syntax/generateSnippet")).unwrap();
        assert_eq!(
            catalog[0].header.invocation_url.as_deref(),
            Some("/jenkins/pipeline-syntax/generateSnippet?$class=org.example.SleepStep")
        );
        assert_eq!(catalog[1].header.invocation_url, None);

        let without = builder.build_catalog(None).unwrap();
        assert!(without.iter().all(|s| s.header.invocation_url.is_none()));
    }

    #[test]
    fn test_duplicate_function_names_keep_first() {
        let registry = FakeRegistry::new()
            .with_step(sleep_step().0, sleep_step().1)
            .with_meta_step(
                MetaStepDescriptor::new(BaseCapability::Builder, "Other sleep", "a.OtherSleep").with_symbol("sleep"),
                vec![],
            );

        let catalog = builder(registry).build_catalog(None).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].step_type().as_str(), "org.example.SleepStep");
    }
}
