//! Output handling for association results.

use crate::config::OutputFormat;
use crate::matching::{Association, MatchScore};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Associations written to {}", path.display());
            Ok(())
        }
    }
}

/// Entry shape for JSON/YAML output without scores.
#[derive(Serialize)]
struct PlainEntry<'a> {
    source: Option<&'a str>,
    candidate: Option<&'a str>,
}

/// Render an association in the requested format.
pub fn render_association(
    association: &Association,
    format: OutputFormat,
    explain: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json if explain => {
            serde_json::to_string_pretty(association).context("Failed to serialize JSON")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&plain_entries(association))
            .context("Failed to serialize JSON"),
        OutputFormat::Yaml if explain => {
            serde_yaml::to_string(association).context("Failed to serialize YAML")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&plain_entries(association)).context("Failed to serialize YAML")
        }
        OutputFormat::Table => Ok(format_table(association, explain)),
    }
}

fn plain_entries(association: &Association) -> Vec<PlainEntry<'_>> {
    association
        .iter()
        .map(|(source, candidate)| PlainEntry { source, candidate })
        .collect()
}

fn display_source(source: Option<&str>) -> &str {
    match source {
        None => "(missing)",
        Some("") => "(empty)",
        Some(name) => name,
    }
}

fn display_score(score: Option<MatchScore>) -> String {
    match score {
        Some(MatchScore::Distance { value }) => format!("distance {value:.3}"),
        Some(MatchScore::Ratio { value }) => format!("ratio {value:.3}"),
        None => String::new(),
    }
}

/// Aligned `source -> candidate` lines, with exhausted names listed last.
fn format_table(association: &Association, explain: bool) -> String {
    let width = association
        .iter()
        .map(|(source, _)| display_source(source).chars().count())
        .chain(association.exhausted().iter().map(|s| s.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(association.len() + association.exhausted().len());
    for (source, candidate) in association.iter() {
        let source_text = display_source(source);
        let mut line = format!("{source_text:<width$}  ->  {}", candidate.unwrap_or("-"));
        if explain {
            let score = display_score(source.and_then(|s| association.score(s)));
            if !score.is_empty() {
                line.push_str(&format!("  ({score})"));
            }
        }
        lines.push(line);
    }
    for name in association.exhausted() {
        lines.push(format!("{name:<width$}  ->  (no candidates left)"));
    }

    lines.join("\n")
}
