//! Step descriptors as supplied by the step registry.

use std::fmt;

use crate::types::TypeIdentity;

/// Descriptor of a native pipeline step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Identifier used to call the step from a pipeline (e.g., "sleep")
    pub function_name: String,

    /// Human-readable label
    pub display_name: String,

    /// Type implementing the step
    pub type_identity: TypeIdentity,

    /// Capabilities the step needs from its execution environment
    pub required_context: Vec<TypeIdentity>,

    /// Capabilities the step makes available to nested steps
    pub provided_context: Vec<TypeIdentity>,

    /// Whether the step takes an implicit nested block argument
    pub takes_implicit_block: bool,

    /// Advanced steps are hidden from the catalog
    pub advanced: bool,

    /// Fully-qualified locator for further detail
    pub descriptor_url: String,
}

impl StepDescriptor {
    /// Create a plain, non-advanced step descriptor without context requirements
    pub fn new(
        function_name: impl Into<String>,
        display_name: impl Into<String>,
        type_identity: impl Into<TypeIdentity>,
    ) -> Self {
        let type_identity = type_identity.into();
        Self {
            function_name: function_name.into(),
            display_name: display_name.into(),
            descriptor_url: default_descriptor_url(&type_identity),
            type_identity,
            required_context: Vec::new(),
            provided_context: Vec::new(),
            takes_implicit_block: false,
            advanced: false,
        }
    }
}

/// The families of pre-existing actions that can be exposed as meta-steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCapability {
    /// Build actions
    Builder,
    /// Post-build publish actions
    Publisher,
}

impl BaseCapability {
    /// All families, in enumeration order
    pub const ALL: [BaseCapability; 2] = [BaseCapability::Builder, BaseCapability::Publisher];

    /// Lower-case name of the family
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseCapability::Builder => "builder",
            BaseCapability::Publisher => "publisher",
        }
    }
}

impl fmt::Display for BaseCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor of an action type that is exposed through the catalog as a meta-step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaStepDescriptor {
    /// Family the wrapped action belongs to
    pub base: BaseCapability,

    /// Human-readable label
    pub display_name: String,

    /// Type implementing the wrapped action
    pub type_identity: TypeIdentity,

    /// Registered short identifiers, first one wins
    pub symbols: Vec<String>,

    /// Fully-qualified locator for further detail
    pub descriptor_url: String,
}

impl MetaStepDescriptor {
    /// Create a meta-step descriptor with no symbols
    pub fn new(base: BaseCapability, display_name: impl Into<String>, type_identity: impl Into<TypeIdentity>) -> Self {
        let type_identity = type_identity.into();
        Self {
            base,
            display_name: display_name.into(),
            descriptor_url: default_descriptor_url(&type_identity),
            type_identity,
            symbols: Vec::new(),
        }
    }

    /// Add a registered symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// The stable short identifier, if one is registered
    pub fn symbol(&self) -> Option<&str> {
        self.symbols.first().map(String::as_str)
    }
}

/// Either kind of catalog candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// A native step
    Native(StepDescriptor),
    /// An action wrapped as a meta-step
    Meta(MetaStepDescriptor),
}

impl Descriptor {
    /// Type implementing the candidate
    pub fn type_identity(&self) -> &TypeIdentity {
        match self {
            Descriptor::Native(d) => &d.type_identity,
            Descriptor::Meta(d) => &d.type_identity,
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &str {
        match self {
            Descriptor::Native(d) => &d.display_name,
            Descriptor::Meta(d) => &d.display_name,
        }
    }

    /// Detail locator
    pub fn descriptor_url(&self) -> &str {
        match self {
            Descriptor::Native(d) => &d.descriptor_url,
            Descriptor::Meta(d) => &d.descriptor_url,
        }
    }

    /// The name callers use for the step; meta-steps use their symbol
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Descriptor::Native(d) => Some(&d.function_name),
            Descriptor::Meta(d) => d.symbol(),
        }
    }
}

impl From<StepDescriptor> for Descriptor {
    fn from(d: StepDescriptor) -> Self {
        Descriptor::Native(d)
    }
}

impl From<MetaStepDescriptor> for Descriptor {
    fn from(d: MetaStepDescriptor) -> Self {
        Descriptor::Meta(d)
    }
}

fn default_descriptor_url(type_identity: &TypeIdentity) -> String {
    format!("/descriptorByName/{}", type_identity)
}
