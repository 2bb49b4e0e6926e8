use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::document::StepManifest;
use crate::error::ManifestError;

/// The only manifest version this crate understands
pub const SUPPORTED_VERSION: &str = "1.0";

/// Parse a YAML string into a StepManifest.
///
/// Checks the manifest version and that native step function names are
/// unique. Parameter types are checked when the registry is built.
pub fn parse_manifest(yaml_str: &str) -> Result<StepManifest, ManifestError> {
    let manifest: StepManifest = serde_yaml::from_str(yaml_str)?;

    if manifest.manifest_version != SUPPORTED_VERSION {
        return Err(ManifestError::UnsupportedVersion(manifest.manifest_version.clone()));
    }

    let mut seen = HashSet::new();
    for step in &manifest.steps {
        if !seen.insert(step.function_name.as_str()) {
            return Err(ManifestError::DuplicateFunctionName(step.function_name.clone()));
        }
    }

    debug!(
        steps = manifest.steps.len(),
        meta_steps = manifest.meta_steps.len(),
        types = manifest.types.len(),
        "Parsed step manifest"
    );
    Ok(manifest)
}

/// Read and parse a manifest file
pub fn load_manifest(path: impl AsRef<Path>) -> Result<StepManifest, ManifestError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_valid_manifest() {
        let yaml = r#"
        manifest_version: "1.0"
        "#;

        let manifest = parse_manifest(yaml).unwrap();
        assert!(manifest.steps.is_empty());
        assert!(manifest.meta_steps.is_empty());
        assert!(manifest.types.is_empty());
    }

    #[test]
    fn test_invalid_yaml_syntax() {
        let yaml = r#"
        manifest_version: "1.0"
        steps: [
          - function_name: broken
        "#;

        match parse_manifest(yaml).unwrap_err() {
            ManifestError::YamlError(_) => {}
            err => panic!("Expected YamlError, got {:?}", err),
        }
    }

    #[test]
    fn test_unsupported_manifest_version() {
        let yaml = r#"
        manifest_version: "2.0"
        "#;

        match parse_manifest(yaml).unwrap_err() {
            ManifestError::UnsupportedVersion(version) => assert_eq!(version, "2.0"),
            err => panic!("Expected UnsupportedVersion, got {:?}", err),
        }
    }

    #[test]
    fn test_duplicate_function_names() {
        let yaml = r#"
        manifest_version: "1.0"
        steps:
          - function_name: sh
            display_name: Shell Script
            type: org.example.ShellStep
          - function_name: sh
            display_name: Other Shell
            type: org.example.OtherShellStep
        "#;

        let err = parse_manifest(yaml).unwrap_err();
        assert_eq!(err.error_code(), "ERR_MANIFEST_DUPLICATE_STEP");
    }

    #[test]
    fn test_missing_file() {
        let err = load_manifest("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(err.error_code(), "ERR_MANIFEST_IO");
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
