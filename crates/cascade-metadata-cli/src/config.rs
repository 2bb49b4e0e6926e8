//! Configuration for the step metadata CLI
//!
//! Values come from environment variables. Invalid optional values are
//! logged and the default is kept, so logging must be initialized first
//! (see [`monitoring_config`]).

use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use cascade_monitoring::{LogFormat, MonitoringConfig};
use cascade_step_metadata::service::DEFAULT_SNIPPETIZER_URL_NAME;

/// Errors raised while loading the configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),
}

impl ConfigError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingVariable(_) => "ERR_CONFIG_MISSING_VARIABLE",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the step manifest to serve
    pub manifest_path: PathBuf,

    /// Path prefix the consumer is served under
    pub context_path: String,

    /// Whether native steps get an invocation URL
    pub snippetizer_enabled: bool,

    /// Path segment of the snippet generator
    pub snippetizer_url_name: String,

    /// Function names blocked on top of the built-in list
    pub blocked_steps: Vec<String>,

    /// `step.property` entries to hide from the catalog
    pub hidden_properties: Vec<String>,
}

fn default_snippetizer_enabled() -> bool {
    true
}

fn default_snippetizer_url_name() -> String {
    DEFAULT_SNIPPETIZER_URL_NAME.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Logging configuration read from `LOG_FILTER` and `LOG_FORMAT`.
///
/// Runs before a subscriber exists, so an invalid `LOG_FORMAT` falls back to
/// pretty output silently here and is reported by [`CliConfig::from_lookup`].
pub fn monitoring_config(lookup: impl Fn(&str) -> Option<String>) -> MonitoringConfig {
    MonitoringConfig {
        service_name: "cascade-step-metadata".to_string(),
        log_filter: lookup("LOG_FILTER")
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(default_log_filter),
        log_format: lookup("LOG_FORMAT")
            .and_then(|format| format.parse().ok())
            .unwrap_or_default(),
        ..MonitoringConfig::default()
    }
}

impl CliConfig {
    /// A configuration with defaults for everything but the manifest path
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            context_path: String::new(),
            snippetizer_enabled: default_snippetizer_enabled(),
            snippetizer_url_name: default_snippetizer_url_name(),
            blocked_steps: Vec::new(),
            hidden_properties: Vec::new(),
        }
    }

    /// Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let manifest_path = lookup("STEP_MANIFEST_PATH")
            .filter(|path| !path.trim().is_empty())
            .ok_or(ConfigError::MissingVariable("STEP_MANIFEST_PATH"))?;

        let mut config = Self::new(manifest_path);

        if let Some(context_path) = lookup("METADATA_CONTEXT_PATH") {
            config.context_path = context_path;
        }

        if let Some(enabled) = lookup("SNIPPETIZER_ENABLED") {
            match parse_bool(&enabled) {
                Some(enabled) => config.snippetizer_enabled = enabled,
                None => warn!("Invalid SNIPPETIZER_ENABLED value: {}", enabled),
            }
        }

        if let Some(url_name) = lookup("SNIPPETIZER_URL_NAME") {
            if url_name.trim().is_empty() {
                warn!("Empty SNIPPETIZER_URL_NAME, keeping {}", config.snippetizer_url_name);
            } else {
                config.snippetizer_url_name = url_name;
            }
        }

        if let Some(blocked) = lookup("BLOCKED_STEPS") {
            config.blocked_steps = split_list(&blocked);
        }

        if let Some(hidden) = lookup("HIDDEN_PROPERTIES") {
            config.hidden_properties = split_list(&hidden)
                .into_iter()
                .filter(|entry| {
                    let valid = matches!(entry.split_once('.'), Some((step, prop)) if !step.is_empty() && !prop.is_empty());
                    if !valid {
                        warn!("Invalid HIDDEN_PROPERTIES entry: {}", entry);
                    }
                    valid
                })
                .collect();
        }

        if let Some(log_format) = lookup("LOG_FORMAT") {
            if let Err(e) = log_format.parse::<LogFormat>() {
                warn!("Invalid LOG_FORMAT value, logging with {}: {}", LogFormat::default(), e);
            }
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("STEP_MANIFEST_PATH", "steps.yaml")]).unwrap();
        assert_eq!(config, CliConfig::new("steps.yaml"));
        assert!(config.snippetizer_enabled);
        assert_eq!(config.snippetizer_url_name, "pipeline-syntax");
    }

    #[test]
    fn test_missing_manifest_path() {
        let err = load(&[]).unwrap_err();
        assert_eq!(err, ConfigError::MissingVariable("STEP_MANIFEST_PATH"));
        assert_eq!(err.error_code(), "ERR_CONFIG_MISSING_VARIABLE");

        assert!(load(&[("STEP_MANIFEST_PATH", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STEP_MANIFEST_PATH", "/etc/cascade/steps.yaml"),
            ("METADATA_CONTEXT_PATH", "/ci"),
            ("SNIPPETIZER_ENABLED", "false"),
            ("SNIPPETIZER_URL_NAME", "snippets"),
            ("BLOCKED_STEPS", "node, , input"),
            ("HIDDEN_PROPERTIES", "sh.encoding,broken,sleep.unit"),
        ])
        .unwrap();

        assert_eq!(config.manifest_path, PathBuf::from("/etc/cascade/steps.yaml"));
        assert_eq!(config.context_path, "/ci");
        assert!(!config.snippetizer_enabled);
        assert_eq!(config.snippetizer_url_name, "snippets");
        assert_eq!(config.blocked_steps, vec!["node", "input"]);
        assert_eq!(config.hidden_properties, vec!["sh.encoding", "sleep.unit"]);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = load(&[
            ("STEP_MANIFEST_PATH", "steps.yaml"),
            ("SNIPPETIZER_ENABLED", "sometimes"),
            ("SNIPPETIZER_URL_NAME", ""),
            ("LOG_FORMAT", "xml"),
        ])
        .unwrap();

        assert!(config.snippetizer_enabled);
        assert_eq!(config.snippetizer_url_name, "pipeline-syntax");
    }

    fn monitoring(vars: &[(&str, &str)]) -> MonitoringConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        monitoring_config(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_monitoring_config_needs_no_manifest_path() {
        let config = monitoring(&[]);
        assert_eq!(config.service_name, "cascade-step-metadata");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);

        let config = monitoring(&[("LOG_FILTER", "cascade_step_metadata=debug"), ("LOG_FORMAT", "JSON")]);
        assert_eq!(config.log_filter, "cascade_step_metadata=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_monitoring_config_falls_back_on_invalid_values() {
        let config = monitoring(&[("LOG_FILTER", " "), ("LOG_FORMAT", "xml")]);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);

        // The CLI configuration still loads and reports the bad format
        assert!(load(&[("STEP_MANIFEST_PATH", "steps.yaml"), ("LOG_FORMAT", "xml")]).is_ok());
    }
}
