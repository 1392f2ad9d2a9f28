//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, CliOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".entity-match.yaml",
    ".entity-match.yml",
    "entity-match.yaml",
    "entity-match.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/entity-match/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("entity-match")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Apply command-line overrides on top of this config.
    pub fn merge(&mut self, overrides: &CliOverrides) {
        if let Some(metric) = &overrides.metric {
            self.matching.metric.clone_from(metric);
        }
        if let Some(marker) = &overrides.missing_marker {
            self.input.missing_marker.clone_from(marker);
        }

        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
        if overrides.output_file.is_some() {
            self.output.file.clone_from(&overrides.output_file);
        }
        if overrides.explain {
            self.output.explain = true;
        }

        if overrides.fail_on_unmatched {
            self.behavior.fail_on_unmatched = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &CliOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# entity-match configuration
# Place this file at .entity-match.yaml in your project root
# or ~/.config/entity-match/entity-match.yaml for global config.
#
# CLI arguments always override file settings.

matching:
  # lcss, hamming, levenshtein, jaro (each candidate used once)
  # or difflib (closest match, candidates may repeat)
  metric: lcss

input:
  # Source lines equal to this marker are treated as missing names
  missing_marker: "NaN"

output:
  # table, json, yaml
  format: table
  # Output file path (omit for stdout)
  # file: associations.json
  # Include the distance or ratio behind each match
  explain: false

behavior:
  # Exit with code 1 if any source name has no candidate
  fail_on_unmatched: false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputFormat, DEFAULT_METRIC};
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".entity-match.yaml");
        std::fs::write(&config_path, "matching:\n  metric: jaro\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
matching:
  metric: levenshtein
output:
  format: json
behavior:
  fail_on_unmatched: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.matching.metric, "levenshtein");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.behavior.fail_on_unmatched);
        assert_eq!(config.input.missing_marker, "NaN");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_bad_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "matching: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().metric("jaro").build();
        let overrides = CliOverrides {
            metric: Some("hamming".to_string()),
            output_format: Some(OutputFormat::Yaml),
            fail_on_unmatched: true,
            ..CliOverrides::default()
        };

        base.merge(&overrides);

        assert_eq!(base.matching.metric, "hamming");
        assert_eq!(base.output.format, OutputFormat::Yaml);
        assert!(base.behavior.fail_on_unmatched);
    }

    #[test]
    fn test_merge_without_overrides_keeps_file_values() {
        let mut base = AppConfig::builder().metric("jaro").missing_marker("NA").build();
        base.merge(&CliOverrides::default());
        assert_eq!(base.matching.metric, "jaro");
        assert_eq!(base.input.missing_marker, "NA");
    }

    #[test]
    fn test_default_valued_flags_override_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = "matching:\n  metric: jaro\ninput:\n  missing_marker: NA\noutput:\n  format: json\n";
        std::fs::write(&config_path, yaml).unwrap();

        let overrides = CliOverrides {
            metric: Some(DEFAULT_METRIC.to_string()),
            missing_marker: Some("NaN".to_string()),
            output_format: Some(OutputFormat::Table),
            ..CliOverrides::default()
        };
        let (config, loaded_from) =
            AppConfig::from_file_with_overrides(Some(&config_path), &overrides);

        assert_eq!(loaded_from, Some(config_path));
        assert_eq!(config.matching.metric, "lcss");
        assert_eq!(config.input.missing_marker, "NaN");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_behavior_section_has_only_exit_policy() {
        let yaml = serde_yaml::to_string(&AppConfig::default()).unwrap();
        assert!(yaml.contains("fail_on_unmatched"));
        assert!(!yaml.contains("quiet"), "{yaml}");
    }

    #[test]
    fn test_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "matching:\n  metric: jaro\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
