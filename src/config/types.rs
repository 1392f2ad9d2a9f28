//! Configuration types for entity-match operations.

use super::defaults::{DEFAULT_METRIC, DEFAULT_MISSING_MARKER};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or
/// config files, with CLI values taking precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Matching configuration
    pub matching: MatchingConfig,
    /// How name list files are read
    pub input: InputConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the metric selector.
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.config.matching.metric = metric.into();
        self
    }

    /// Set the marker that denotes a missing source name.
    pub fn missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.input.missing_marker = marker.into();
        self
    }

    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Include match scores in the output.
    pub const fn explain(mut self, explain: bool) -> Self {
        self.config.output.explain = explain;
        self
    }

    pub const fn fail_on_unmatched(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_unmatched = fail;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Matching configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingConfig {
    /// Metric selector: lcss, hamming, levenshtein, jaro, or difflib
    pub metric: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            metric: DEFAULT_METRIC.to_string(),
        }
    }
}

/// Name list input configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    /// A source line equal to this marker is treated as a missing name
    pub missing_marker: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
        }
    }
}

/// Output format for association results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned two-column text
    #[default]
    Table,
    /// Structured JSON list of entries
    Json,
    /// YAML list of entries
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Output file path (stdout if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Include the score that selected each candidate
    pub explain: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any source name has no candidate
    pub fail_on_unmatched: bool,
}

/// Values given explicitly on the command line.
///
/// `None` and `false` leave the file value in place; anything else wins,
/// even when it equals the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub metric: Option<String>,
    pub missing_marker: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub explain: bool,
    pub fail_on_unmatched: bool,
}

/// Everything the `associate` command needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociateConfig {
    /// File with one source name per line
    pub source_file: PathBuf,
    /// File with one candidate name per line
    pub candidate_file: PathBuf,
    pub settings: AppConfig,
}
