//! Configuration module for entity-match.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.entity-match.yaml` file in your project root or
//! `~/.config/entity-match/`:
//!
//! ```yaml
//! matching:
//!   metric: levenshtein
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_METRIC, DEFAULT_MISSING_MARKER};
pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    ConfigFileError,
};
pub use types::{
    AppConfig, AppConfigBuilder, AssociateConfig, BehaviorConfig, CliOverrides, InputConfig,
    MatchingConfig, OutputConfig, OutputFormat,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
