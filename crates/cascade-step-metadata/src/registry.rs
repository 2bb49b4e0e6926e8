//! Interfaces to the collaborators that supply raw step definitions.

use std::collections::HashMap;

use crate::descriptor::{BaseCapability, MetaStepDescriptor, StepDescriptor};
use crate::error::{IntrospectionError, RegistryError};
use crate::types::{ParameterDeclaration, TypeIdentity};

/// Source of step descriptors.
///
/// Implementations return a consistent snapshot for each call; the catalog
/// builder does not impose ordering or consistency of its own.
pub trait StepRegistry: Send + Sync {
    /// All native step descriptors, in registry order
    fn all_step_descriptors(&self) -> Result<Vec<StepDescriptor>, RegistryError>;

    /// Action types of the given family that may be exposed as meta-steps
    fn all_meta_step_candidates(&self, base: BaseCapability) -> Result<Vec<MetaStepDescriptor>, RegistryError>;

    /// Locator of the descriptor for an introspectable nested type, if one is registered
    fn find_descriptor_url(&self, type_identity: &TypeIdentity) -> Option<String>;
}

/// Typed replacement for runtime reflection over step types
pub trait IntrospectionModelProvider: Send + Sync {
    /// Declared parameters of the type, in declaration order
    fn describe(&self, type_identity: &TypeIdentity) -> Result<Vec<ParameterDeclaration>, IntrospectionError>;
}

/// Function names that must never appear in the catalog, with the reason each is blocked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedSteps {
    entries: HashMap<String, String>,
}

impl BlockedSteps {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps that only make sense as declarative pipeline sections
    pub fn declarative_defaults() -> Self {
        let mut blocked = Self::new();
        blocked.block("stage", "The stage step cannot be used in declarative pipelines");
        blocked.block(
            "properties",
            "The properties step cannot be used in declarative pipelines, use the options section instead",
        );
        blocked.block(
            "parallel",
            "The parallel step can only be used as the only top-level step in a stage's step block",
        );
        blocked
    }

    /// Block a function name
    pub fn block(&mut self, function_name: impl Into<String>, reason: impl Into<String>) {
        self.entries.insert(function_name.into(), reason.into());
    }

    /// Builder-style variant of [`BlockedSteps::block`]
    pub fn with(mut self, function_name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.block(function_name, reason);
        self
    }

    pub fn reason(&self, function_name: &str) -> Option<&str> {
        self.entries.get(function_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarative_defaults() {
        let blocked = BlockedSteps::declarative_defaults();
        assert!(blocked.reason("stage").is_some());
        assert!(blocked.reason("properties").is_some());
        assert!(blocked.reason("parallel").is_some());
        assert_eq!(blocked.reason("sh"), None);
        assert_eq!(blocked.len(), 3);
    }

    #[test]
    fn test_later_block_replaces_reason() {
        let blocked = BlockedSteps::new()
            .with("input", "Blocked by configuration")
            .with("input", "Not supported in the editor");
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked.reason("input"), Some("Not supported in the editor"));
    }
}
