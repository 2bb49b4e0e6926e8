//! # Cascade Step Metadata
//!
//! Builds the catalog of pipeline steps shown by the pipeline authoring UI.
//! For every step type known to a [`StepRegistry`] the catalog records its
//! identity, its declared parameters and its structural role (block
//! container, single required parameter, required and provided contexts).
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cascade_step_metadata::*;
//!
//! struct OneStep;
//!
//! impl StepRegistry for OneStep {
//!     fn all_step_descriptors(&self) -> Result<Vec<StepDescriptor>, RegistryError> {
//!         Ok(vec![StepDescriptor::new("sleep", "Sleep", "org.example.SleepStep")])
//!     }
//!     fn all_meta_step_candidates(&self, _: BaseCapability) -> Result<Vec<MetaStepDescriptor>, RegistryError> {
//!         Ok(vec![])
//!     }
//!     fn find_descriptor_url(&self, _: &TypeIdentity) -> Option<String> {
//!         None
//!     }
//! }
//!
//! impl IntrospectionModelProvider for OneStep {
//!     fn describe(&self, _: &TypeIdentity) -> Result<Vec<ParameterDeclaration>, IntrospectionError> {
//!         Ok(vec![ParameterDeclaration::new("time", "int", true)])
//!     }
//! }
//!
//! let registry = Arc::new(OneStep);
//! let service = PipelineStepMetadataService::new(CatalogBuilder::new(registry.clone(), registry));
//!
//! let catalog = service.get_pipeline_step_metadata("").unwrap();
//! assert_eq!(catalog[0].function_name(), "sleep");
//! assert!(catalog[0].header.has_single_required_parameter);
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod classifier;
pub mod decorator;
pub mod descriptor;
pub mod error;
pub mod extractor;
pub mod model;
pub mod registry;
pub mod service;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export key types
pub use catalog::CatalogBuilder;
pub use classifier::{RoleClassifier, StepRoles};
pub use decorator::{DecoratorChain, HiddenPropertiesDecorator, StepDecorator};
pub use descriptor::{BaseCapability, Descriptor, MetaStepDescriptor, StepDescriptor};
pub use error::{IntrospectionError, MetadataError, RegistryError};
pub use extractor::ParameterExtractor;
pub use model::{PropertyMetadata, StepHeader, StepMetadata};
pub use registry::{BlockedSteps, IntrospectionModelProvider, StepRegistry};
pub use service::{PipelineStepMetadataService, SnippetizerEndpoint};
pub use types::{ParameterDeclaration, TypeIdentity, TypeRef};
