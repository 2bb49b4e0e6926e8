use thiserror::Error;

use crate::types::TypeIdentity;

/// Errors reported by a step registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry cannot be enumerated right now
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    /// Any other registry failure
    #[error("Registry error: {0}")]
    Other(String),
}

/// Errors reported by an introspection model provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    /// The type has no usable parameter contract
    #[error("Type is not introspectable: {0}")]
    NotIntrospectable(TypeIdentity),
}

/// All errors that can occur while assembling step metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    /// A candidate step type has no discoverable parameter contract
    #[error("Step type is not introspectable: {0}")]
    NotIntrospectable(TypeIdentity),

    /// The registry could not be enumerated
    #[error("Step catalog unavailable: {0}")]
    CatalogUnavailable(#[from] RegistryError),

    /// A meta-step candidate has no registered symbol
    #[error("Meta-step has no stable identifier: {0}")]
    MissingStableIdentifier(TypeIdentity),

    /// A decorator rejected a step
    #[error("Decorator {decorator} failed for step '{function_name}': {source}")]
    DecoratorFailed {
        decorator: String,
        function_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<IntrospectionError> for MetadataError {
    fn from(err: IntrospectionError) -> Self {
        match err {
            IntrospectionError::NotIntrospectable(identity) => MetadataError::NotIntrospectable(identity),
        }
    }
}

impl MetadataError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MetadataError::NotIntrospectable(_) => "ERR_METADATA_NOT_INTROSPECTABLE",
            MetadataError::CatalogUnavailable(_) => "ERR_METADATA_CATALOG_UNAVAILABLE",
            MetadataError::MissingStableIdentifier(_) => "ERR_METADATA_MISSING_SYMBOL",
            MetadataError::DecoratorFailed { .. } => "ERR_METADATA_DECORATOR_FAILED",
            MetadataError::Serialization(_) => "ERR_METADATA_SERIALIZATION",
        }
    }

    /// Whether the error only removes a single entry from the catalog
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MetadataError::NotIntrospectable(_)
                | MetadataError::MissingStableIdentifier(_)
                | MetadataError::DecoratorFailed { .. }
        )
    }
}
