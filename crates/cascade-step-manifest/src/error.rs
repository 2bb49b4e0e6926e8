use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur while loading a step manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Errors that occur during YAML parsing
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The manifest file could not be read
    #[error("Failed to read manifest {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported manifest version
    #[error("Unsupported manifest version: {0}")]
    UnsupportedVersion(String),

    /// Two native steps share a function name
    #[error("Duplicate step function name: {0}")]
    DuplicateFunctionName(String),

    /// A declared type could not be interpreted
    #[error("Invalid type declaration for parameter '{parameter}' of {owner}: {message}")]
    InvalidType {
        owner: String,
        parameter: String,
        message: String,
    },
}

impl ManifestError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ManifestError::YamlError(_) => "ERR_MANIFEST_YAML_PARSE",
            ManifestError::IoError { .. } => "ERR_MANIFEST_IO",
            ManifestError::UnsupportedVersion(_) => "ERR_MANIFEST_UNSUPPORTED_VERSION",
            ManifestError::DuplicateFunctionName(_) => "ERR_MANIFEST_DUPLICATE_STEP",
            ManifestError::InvalidType { .. } => "ERR_MANIFEST_INVALID_TYPE",
        }
    }
}
