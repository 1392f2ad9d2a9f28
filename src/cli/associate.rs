//! Associate command handler.
//!
//! Reads two name lists (one name per line), associates them, and writes
//! the resulting mapping.

use super::output::{render_association, write_output, OutputTarget};
use crate::config::{AppConfig, AssociateConfig, Validatable};
use crate::error::{EntityMatchError, Result as MatchResult};
use crate::matching::{Association, EntityAssociator};
use anyhow::{Context, Result};
use std::path::Path;

/// Exit code when `fail_on_unmatched` is set and some name has no candidate.
pub const EXIT_UNMATCHED: i32 = 1;

/// Read a file with one name per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped; a trailing newline does
/// not produce an extra entry.
pub fn read_name_list(path: &Path) -> MatchResult<Vec<String>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| EntityMatchError::io(path, e))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Convert raw source lines to source names, mapping `missing_marker` to `None`.
#[must_use]
pub fn to_source_names(lines: Vec<String>, missing_marker: &str) -> Vec<Option<String>> {
    lines
        .into_iter()
        .map(|line| if line == missing_marker { None } else { Some(line) })
        .collect()
}

/// Drop blank candidate lines, which could never be matched.
#[must_use]
pub fn to_candidate_names(lines: Vec<String>) -> Vec<String> {
    let before = lines.len();
    let candidates: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if candidates.len() < before {
        tracing::warn!(
            skipped = before - candidates.len(),
            "Skipped blank lines in candidate list"
        );
    }
    candidates
}

/// Validate merged settings, collecting every problem into one error.
pub fn check_settings(settings: &AppConfig) -> MatchResult<()> {
    let errors = settings.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(EntityMatchError::config(messages.join("; ")))
}

/// Run the associate command, returning the desired exit code.
pub fn run_associate(config: AssociateConfig) -> Result<i32> {
    let settings = &config.settings;
    check_settings(settings)?;

    let associator = EntityAssociator::from_selector(&settings.matching.metric)?;

    let source_lines = read_name_list(&config.source_file)
        .with_context(|| format!("Failed to read source names from {}", config.source_file.display()))?;
    let candidate_lines = read_name_list(&config.candidate_file).with_context(|| {
        format!(
            "Failed to read candidate names from {}",
            config.candidate_file.display()
        )
    })?;

    let sources = to_source_names(source_lines, &settings.input.missing_marker);
    let candidates = to_candidate_names(candidate_lines);

    tracing::debug!(
        metric = %associator.metric(),
        sources = sources.len(),
        candidates = candidates.len(),
        "Starting association"
    );

    let association = associator.associate(&sources, &candidates)?;

    let content = render_association(&association, settings.output.format, settings.output.explain)?;
    let target = OutputTarget::from_option(settings.output.file.clone());
    write_output(&content, &target)?;

    Ok(exit_code(&association, settings.behavior.fail_on_unmatched))
}

fn exit_code(association: &Association, fail_on_unmatched: bool) -> i32 {
    let unmatched: Vec<&str> = association.unmatched().collect();
    if unmatched.is_empty() {
        return 0;
    }

    tracing::warn!(
        count = unmatched.len(),
        names = %unmatched.join(", "),
        "Some source names have no candidate"
    );
    if fail_on_unmatched {
        EXIT_UNMATCHED
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_read_name_list_strips_terminators() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("names.txt");
        std::fs::write(&path, "s1mple\r\nZywOo\n\nNaN\n").unwrap();

        let lines = read_name_list(&path).unwrap();
        assert_eq!(lines, vec!["s1mple", "ZywOo", "", "NaN"]);
    }

    #[test]
    fn test_read_name_list_missing_file() {
        let err = read_name_list(Path::new("/nonexistent/names.txt")).unwrap_err();
        assert!(matches!(err, EntityMatchError::Io { .. }));
    }

    #[test]
    fn test_source_marker_becomes_none() {
        let lines = vec!["a".to_string(), "NaN".to_string(), String::new()];
        assert_eq!(
            to_source_names(lines, "NaN"),
            vec![Some("a".to_string()), None, Some(String::new())]
        );
    }

    #[test]
    fn test_blank_candidates_dropped() {
        let lines = vec!["a".to_string(), "  ".to_string(), "b".to_string()];
        assert_eq!(to_candidate_names(lines), vec!["a", "b"]);
    }

    #[test]
    fn test_run_associate_writes_file() {
        let tmp = TempDir::new().unwrap();
        let source_file = tmp.path().join("game.txt");
        let candidate_file = tmp.path().join("roster.txt");
        let out = tmp.path().join("out.json");
        std::fs::write(&source_file, "Alex\nAlexnder\nBob\nNaN\n").unwrap();
        std::fs::write(&candidate_file, "Alexander\nRobert\n").unwrap();

        let settings = AppConfig::builder()
            .metric("levenshtein")
            .output_format(OutputFormat::Json)
            .output_file(Some(out.clone()))
            .fail_on_unmatched(true)
            .build();
        let code = run_associate(AssociateConfig {
            source_file,
            candidate_file,
            settings,
        })
        .unwrap();

        // "Bob" found the pool empty
        assert_eq!(code, EXIT_UNMATCHED);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "source": "Alex", "candidate": "Alexander" },
                { "source": "Alexnder", "candidate": "Robert" },
                { "source": null, "candidate": null }
            ])
        );
    }

    #[test]
    fn test_run_associate_rejects_bad_metric() {
        let tmp = TempDir::new().unwrap();
        let settings = AppConfig::builder().metric("foo").build();
        let err = run_associate(AssociateConfig {
            source_file: tmp.path().join("a.txt"),
            candidate_file: tmp.path().join("b.txt"),
            settings,
        })
        .unwrap_err();
        match err.downcast_ref::<EntityMatchError>() {
            Some(EntityMatchError::Config(msg)) => assert!(msg.contains("matching.metric"), "{msg}"),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_settings_reports_every_problem() {
        let settings = AppConfig::builder().metric("foo").missing_marker("").build();
        match check_settings(&settings) {
            Err(EntityMatchError::Config(msg)) => {
                assert!(msg.contains("matching.metric"), "{msg}");
                assert!(msg.contains("input.missing_marker"), "{msg}");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
        assert!(check_settings(&AppConfig::default()).is_ok());
    }
}
