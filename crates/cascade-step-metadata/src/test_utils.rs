//! In-memory fakes for the registry collaborators.
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! downstream crates.

use std::collections::HashMap;

use crate::descriptor::{BaseCapability, MetaStepDescriptor, StepDescriptor};
use crate::error::{IntrospectionError, RegistryError};
use crate::registry::{IntrospectionModelProvider, StepRegistry};
use crate::types::{ParameterDeclaration, TypeIdentity};

/// A registry backed by plain vectors and maps.
///
/// Implements both [`StepRegistry`] and [`IntrospectionModelProvider`].
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    steps: Vec<StepDescriptor>,
    meta_steps: Vec<MetaStepDescriptor>,
    types: HashMap<TypeIdentity, Vec<ParameterDeclaration>>,
    nested_descriptors: HashMap<TypeIdentity, String>,
    unavailable: Option<String>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose enumeration always fails
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Register a native step and its parameters
    pub fn with_step(mut self, step: StepDescriptor, parameters: Vec<ParameterDeclaration>) -> Self {
        self.types.insert(step.type_identity.clone(), parameters);
        self.steps.push(step);
        self
    }

    /// Register a native step whose type has no parameter contract
    pub fn with_uninspectable_step(mut self, step: StepDescriptor) -> Self {
        self.steps.push(step);
        self
    }

    /// Register a meta-step candidate and its parameters
    pub fn with_meta_step(mut self, meta: MetaStepDescriptor, parameters: Vec<ParameterDeclaration>) -> Self {
        self.types.insert(meta.type_identity.clone(), parameters);
        self.meta_steps.push(meta);
        self
    }

    /// Register a meta-step candidate whose type has no parameter contract
    pub fn with_uninspectable_meta_step(mut self, meta: MetaStepDescriptor) -> Self {
        self.meta_steps.push(meta);
        self
    }

    /// Register parameters for a type without listing it as a step
    pub fn with_type(mut self, type_identity: impl Into<TypeIdentity>, parameters: Vec<ParameterDeclaration>) -> Self {
        self.types.insert(type_identity.into(), parameters);
        self
    }

    /// Mark a type as an introspectable nested type with a descriptor locator
    pub fn with_nested_descriptor(mut self, type_identity: impl Into<TypeIdentity>, url: impl Into<String>) -> Self {
        self.nested_descriptors.insert(type_identity.into(), url.into());
        self
    }

    fn check_available(&self) -> Result<(), RegistryError> {
        match &self.unavailable {
            Some(reason) => Err(RegistryError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl StepRegistry for FakeRegistry {
    fn all_step_descriptors(&self) -> Result<Vec<StepDescriptor>, RegistryError> {
        self.check_available()?;
        Ok(self.steps.clone())
    }

    fn all_meta_step_candidates(&self, base: BaseCapability) -> Result<Vec<MetaStepDescriptor>, RegistryError> {
        self.check_available()?;
        Ok(self.meta_steps.iter().filter(|m| m.base == base).cloned().collect())
    }

    fn find_descriptor_url(&self, type_identity: &TypeIdentity) -> Option<String> {
        self.nested_descriptors.get(type_identity).cloned()
    }
}

impl IntrospectionModelProvider for FakeRegistry {
    fn describe(&self, type_identity: &TypeIdentity) -> Result<Vec<ParameterDeclaration>, IntrospectionError> {
        self.types
            .get(type_identity)
            .cloned()
            .ok_or_else(|| IntrospectionError::NotIntrospectable(type_identity.clone()))
    }
}

/// A `sleep` step with a required `time` and an optional `unit`
pub fn sleep_step() -> (StepDescriptor, Vec<ParameterDeclaration>) {
    (
        StepDescriptor::new("sleep", "Sleep", "org.example.SleepStep"),
        vec![
            ParameterDeclaration::new("time", "int", true),
            ParameterDeclaration::new("unit", "java.util.concurrent.TimeUnit", false),
        ],
    )
}
