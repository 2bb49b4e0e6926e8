use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use cascade_step_metadata::{BaseCapability, TypeRef};

/// Spelling of an unbounded wildcard in a type declaration
pub const WILDCARD: &str = "?";

/// The complete step manifest document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepManifest {
    /// The manifest version (e.g., "1.0")
    pub manifest_version: String,

    /// Native pipeline steps, in registry order
    #[serde(default)]
    pub steps: Vec<StepEntry>,

    /// Build and publish actions exposed as meta-steps, in registry order
    #[serde(default)]
    pub meta_steps: Vec<MetaStepEntry>,

    /// Parameter contracts keyed by type identity
    #[serde(default)]
    pub types: HashMap<String, TypeEntry>,
}

/// A native step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEntry {
    /// Identifier used to call the step from a pipeline
    pub function_name: String,

    /// Human-readable label
    pub display_name: String,

    /// Type implementing the step
    #[serde(rename = "type")]
    pub step_type: String,

    /// Optional detail locator (derived from the type when absent)
    #[serde(default)]
    pub descriptor_url: Option<String>,

    #[serde(default)]
    pub required_context: Vec<String>,

    #[serde(default)]
    pub provided_context: Vec<String>,

    /// Whether the step wraps a nested block
    #[serde(default)]
    pub takes_implicit_block: bool,

    /// Advanced steps are hidden from the catalog
    #[serde(default)]
    pub advanced: bool,
}

/// Family of a meta-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaStepBase {
    Builder,
    Publisher,
}

impl From<MetaStepBase> for BaseCapability {
    fn from(base: MetaStepBase) -> Self {
        match base {
            MetaStepBase::Builder => BaseCapability::Builder,
            MetaStepBase::Publisher => BaseCapability::Publisher,
        }
    }
}

/// A build or publish action exposed as a meta-step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaStepEntry {
    pub base: MetaStepBase,

    /// Human-readable label
    pub display_name: String,

    /// Type implementing the action
    #[serde(rename = "type")]
    pub step_type: String,

    /// Registered short identifiers; entries without one are not listed
    #[serde(default)]
    pub symbols: Vec<String>,

    #[serde(default)]
    pub descriptor_url: Option<String>,
}

/// The parameter contract of a type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Declared parameters, in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,

    /// Set when the type is a nested introspectable type with its own descriptor
    #[serde(default)]
    pub descriptor_url: Option<String>,
}

/// One declared parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Declared identifier
    pub name: String,

    /// Optional display label (the capitalized name is used when absent)
    #[serde(default)]
    pub display_name: Option<String>,

    /// Declared type
    #[serde(rename = "type")]
    pub param_type: TypeSpec,

    /// Whether the parameter must be supplied (defaults to false)
    #[serde(default)]
    pub required: bool,
}

/// A declared type as written in the manifest.
///
/// * `"java.lang.String"`: a concrete type
/// * `{ raw: java.util.List, args: [java.lang.String] }`: a parameterized type
/// * `"?"` or `{ wildcard: <bound> }`: a wildcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Named(String),
    Parameterized {
        raw: String,
        #[serde(default)]
        args: Vec<TypeSpec>,
    },
    Wildcard {
        wildcard: Option<Box<TypeSpec>>,
    },
}

impl TypeSpec {
    /// The raw type a value of this type erases to; wildcards have none
    pub fn erased(&self) -> Option<&str> {
        match self {
            TypeSpec::Named(name) if name != WILDCARD => Some(name),
            TypeSpec::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// The reified type
    pub fn to_type_ref(&self) -> TypeRef {
        match self {
            TypeSpec::Named(name) if name == WILDCARD => TypeRef::wildcard(),
            TypeSpec::Named(name) => TypeRef::concrete(name.clone()),
            TypeSpec::Parameterized { raw, args } => {
                TypeRef::parameterized(raw.clone(), args.iter().map(TypeSpec::to_type_ref).collect())
            }
            TypeSpec::Wildcard { wildcard } => TypeRef::Wildcard {
                bound: wildcard.as_ref().map(|bound| Box::new(bound.to_type_ref())),
            },
        }
    }
}
