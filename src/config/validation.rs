//! Configuration validation for entity-match.

use super::types::{AppConfig, InputConfig, MatchingConfig, OutputConfig};
use crate::matching::MetricKind;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.matching.validate());
        errors.extend(self.input.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for MatchingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        match MetricKind::parse(&self.metric) {
            Ok(_) => Vec::new(),
            Err(_) => {
                let valid: Vec<&str> = MetricKind::all().iter().map(|m| m.name()).collect();
                vec![ConfigError {
                    field: "matching.metric".to_string(),
                    message: format!(
                        "Invalid metric '{}'. Valid options: {}",
                        self.metric,
                        valid.join(", ")
                    ),
                }]
            }
        }
    }
}

impl Validatable for InputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.missing_marker.is_empty() {
            // An empty marker would swallow the empty-name entries
            return vec![ConfigError {
                field: "input.missing_marker".to_string(),
                message: "Missing marker must not be empty".to_string(),
            }];
        }
        Vec::new()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_metric() {
        let config = AppConfig::builder().metric("soundex").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "matching.metric");
        assert!(errors[0].message.contains("levenshtein"));
    }

    #[test]
    fn test_metric_selector_case_insensitive() {
        assert!(AppConfig::builder().metric("Levenshtein").build().is_valid());
    }

    #[test]
    fn test_empty_missing_marker() {
        let config = AppConfig::builder().missing_marker("").build();
        assert_eq!(config.validate()[0].field, "input.missing_marker");
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = AppConfig::builder()
            .output_file(Some(PathBuf::from("/nonexistent/dir/out.json")))
            .build();
        assert!(!config.is_valid());
    }
}
