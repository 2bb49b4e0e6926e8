//! A step registry backed by a loaded manifest.

use std::collections::HashMap;
use std::path::Path;

use cascade_step_metadata::{
    BaseCapability, IntrospectionError, IntrospectionModelProvider, MetaStepDescriptor, ParameterDeclaration,
    RegistryError, StepDescriptor, StepRegistry, TypeIdentity,
};
use tracing::info;

use crate::document::{MetaStepEntry, ParameterEntry, StepEntry, StepManifest, TypeEntry};
use crate::error::ManifestError;
use crate::parser::load_manifest;

/// Immutable snapshot of a step manifest.
///
/// Serves both as the step registry and as the introspection model
/// provider. A type that has no entry under `types` is not introspectable.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    steps: Vec<StepDescriptor>,
    meta_steps: Vec<MetaStepDescriptor>,
    parameters: HashMap<TypeIdentity, Vec<ParameterDeclaration>>,
    nested_descriptors: HashMap<TypeIdentity, String>,
}

impl ManifestRegistry {
    /// Build the registry from a parsed manifest
    pub fn from_manifest(manifest: StepManifest) -> Result<Self, ManifestError> {
        let mut parameters = HashMap::with_capacity(manifest.types.len());
        let mut nested_descriptors = HashMap::new();

        for (type_name, entry) in &manifest.types {
            let TypeEntry {
                parameters: entries,
                descriptor_url,
            } = entry;
            let declarations = entries
                .iter()
                .map(|p| declaration_from_entry(type_name, p))
                .collect::<Result<Vec<_>, _>>()?;

            let identity = TypeIdentity::from(type_name.as_str());
            if let Some(url) = descriptor_url {
                nested_descriptors.insert(identity.clone(), url.clone());
            }
            parameters.insert(identity, declarations);
        }

        let registry = Self {
            steps: manifest.steps.into_iter().map(step_from_entry).collect(),
            meta_steps: manifest.meta_steps.into_iter().map(meta_step_from_entry).collect(),
            parameters,
            nested_descriptors,
        };

        info!(
            steps = registry.steps.len(),
            meta_steps = registry.meta_steps.len(),
            types = registry.parameters.len(),
            "Loaded step registry from manifest"
        );
        Ok(registry)
    }

    /// Load a manifest file and build the registry from it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        Self::from_manifest(load_manifest(path)?)
    }
}

impl StepRegistry for ManifestRegistry {
    fn all_step_descriptors(&self) -> Result<Vec<StepDescriptor>, RegistryError> {
        Ok(self.steps.clone())
    }

    fn all_meta_step_candidates(&self, base: BaseCapability) -> Result<Vec<MetaStepDescriptor>, RegistryError> {
        Ok(self.meta_steps.iter().filter(|m| m.base == base).cloned().collect())
    }

    fn find_descriptor_url(&self, type_identity: &TypeIdentity) -> Option<String> {
        self.nested_descriptors.get(type_identity).cloned()
    }
}

impl IntrospectionModelProvider for ManifestRegistry {
    fn describe(&self, type_identity: &TypeIdentity) -> Result<Vec<ParameterDeclaration>, IntrospectionError> {
        self.parameters
            .get(type_identity)
            .cloned()
            .ok_or_else(|| IntrospectionError::NotIntrospectable(type_identity.clone()))
    }
}

fn step_from_entry(entry: StepEntry) -> StepDescriptor {
    let mut step = StepDescriptor::new(entry.function_name, entry.display_name, entry.step_type);
    if let Some(url) = entry.descriptor_url {
        step.descriptor_url = url;
    }
    step.required_context = entry.required_context.into_iter().map(TypeIdentity::from).collect();
    step.provided_context = entry.provided_context.into_iter().map(TypeIdentity::from).collect();
    step.takes_implicit_block = entry.takes_implicit_block;
    step.advanced = entry.advanced;
    step
}

fn meta_step_from_entry(entry: MetaStepEntry) -> MetaStepDescriptor {
    let mut meta = MetaStepDescriptor::new(entry.base.into(), entry.display_name, entry.step_type);
    if let Some(url) = entry.descriptor_url {
        meta.descriptor_url = url;
    }
    meta.symbols = entry.symbols;
    meta
}

fn declaration_from_entry(owner: &str, entry: &ParameterEntry) -> Result<ParameterDeclaration, ManifestError> {
    let erased = entry.param_type.erased().ok_or_else(|| ManifestError::InvalidType {
        owner: owner.to_string(),
        parameter: entry.name.clone(),
        message: "a parameter cannot be declared with a wildcard type".to_string(),
    })?;

    let mut declaration = ParameterDeclaration::new(entry.name.clone(), erased, entry.required)
        .with_declared_type(entry.param_type.to_type_ref());
    declaration.capitalized_name = entry.display_name.clone();
    Ok(declaration)
}
