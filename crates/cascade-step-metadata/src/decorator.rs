//! Post-processing of step properties after base extraction.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::classifier::has_single_required_parameter;
use crate::error::MetadataError;
use crate::model::{PropertyMetadata, StepHeader, StepMetadata};

/// A post-processor that may rewrite a step's property list.
///
/// Decorators may reorder, add, remove or rewrite properties. The header is
/// read-only so step identity is preserved.
pub trait StepDecorator: Send + Sync {
    /// Name used in logs and error reports
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Adjust the properties of `step`
    fn decorate(&self, step: &StepHeader, properties: &mut Vec<PropertyMetadata>) -> anyhow::Result<()>;
}

/// Ordered list of decorators, applied in registration order
#[derive(Default)]
pub struct DecoratorChain {
    decorators: Vec<Box<dyn StepDecorator>>,
}

impl DecoratorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decorator to the end of the chain
    pub fn register(&mut self, decorator: Box<dyn StepDecorator>) {
        self.decorators.push(decorator);
    }

    /// Builder-style variant of [`DecoratorChain::register`]
    pub fn with(mut self, decorator: impl StepDecorator + 'static) -> Self {
        self.register(Box::new(decorator));
        self
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Run every decorator over `step`.
    ///
    /// Stops at the first failing decorator. On success the single-required
    /// flag is recomputed from the final property list.
    pub fn apply(&self, step: &mut StepMetadata) -> Result<(), MetadataError> {
        for decorator in &self.decorators {
            debug!(decorator = decorator.name(), step = %step.header.function_name, "Applying decorator");
            decorator
                .decorate(&step.header, &mut step.properties)
                .map_err(|source| MetadataError::DecoratorFailed {
                    decorator: decorator.name().to_string(),
                    function_name: step.header.function_name.clone(),
                    source,
                })?;
        }

        step.header.has_single_required_parameter = has_single_required_parameter(&step.properties);
        Ok(())
    }
}

impl FromIterator<Box<dyn StepDecorator>> for DecoratorChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn StepDecorator>>>(iter: I) -> Self {
        Self {
            decorators: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for DecoratorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.decorators.iter().map(|d| d.name())).finish()
    }
}

/// Removes selected properties from selected steps
#[derive(Debug, Clone, Default)]
pub struct HiddenPropertiesDecorator {
    hidden: HashMap<String, HashSet<String>>,
}

impl HiddenPropertiesDecorator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide `property` on the step called `function_name`
    pub fn hide(mut self, function_name: impl Into<String>, property: impl Into<String>) -> Self {
        self.hidden.entry(function_name.into()).or_default().insert(property.into());
        self
    }

    /// Parse `step.property` entries; malformed entries are ignored
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a str>) -> Self {
        specs.into_iter().fold(Self::new(), |decorator, spec| match spec.split_once('.') {
            Some((step, property)) if !step.is_empty() && !property.is_empty() => decorator.hide(step, property),
            _ => decorator,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

impl StepDecorator for HiddenPropertiesDecorator {
    fn name(&self) -> &str {
        "HiddenPropertiesDecorator"
    }

    fn decorate(&self, step: &StepHeader, properties: &mut Vec<PropertyMetadata>) -> anyhow::Result<()> {
        if let Some(hidden) = self.hidden.get(&step.function_name) {
            properties.retain(|p| !hidden.contains(&p.name));
        }
        Ok(())
    }
}
