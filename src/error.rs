//! Unified error types for entity-match.
//!
//! This module provides the error hierarchy for the library, with
//! context chaining for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for entity-match operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EntityMatchError {
    /// Errors raised while associating names
    #[error("Matching operation failed: {context}")]
    Matching {
        context: String,
        #[source]
        source: MatchingErrorKind,
    },

    /// Errors raised by table operations
    #[error("Table operation failed: {context}")]
    Table {
        context: String,
        #[source]
        source: TableErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific matching error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchingErrorKind {
    #[error(
        "Unknown metric '{0}': metric can only be LCSS, Hamming, Levenshtein or Jaro \
         (or difflib for closest-match)"
    )]
    InvalidMetric(String),

    #[error("Candidate name at position {index} is empty")]
    EmptyCandidate { index: usize },
}

/// Specific table error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableErrorKind {
    #[error("Column does not exist: {0}")]
    ColumnNotFound(String),

    #[error("Row has {actual} cells but the table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for entity-match operations
pub type Result<T> = std::result::Result<T, EntityMatchError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl EntityMatchError {
    /// Create a matching error with context
    pub fn matching(context: impl Into<String>, source: MatchingErrorKind) -> Self {
        Self::Matching {
            context: context.into(),
            source,
        }
    }

    /// Create a matching error for an unrecognised metric selector
    pub fn invalid_metric(metric: impl Into<String>) -> Self {
        Self::matching(
            "selecting distance metric",
            MatchingErrorKind::InvalidMetric(metric.into()),
        )
    }

    /// Create a table error with context
    pub fn table(context: impl Into<String>, source: TableErrorKind) -> Self {
        Self::Table {
            context: context.into(),
            source,
        }
    }

    /// Create a table error for a missing column
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::table("looking up column", TableErrorKind::ColumnNotFound(column.into()))
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The matching error kind, if this is a matching error.
    #[must_use]
    pub const fn matching_kind(&self) -> Option<&MatchingErrorKind> {
        match self {
            Self::Matching { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The table error kind, if this is a table error.
    #[must_use]
    pub const fn table_kind(&self) -> Option<&TableErrorKind> {
        match self {
            Self::Table { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for EntityMatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, so the final message shows the path
/// through the code:
///
/// ```ignore
/// use entity_match::error::ErrorContext;
///
/// let association = associator
///     .associate(&game_names, &roster)
///     .context("associating demo players")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<EntityMatchError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: EntityMatchError, new_ctx: &str) -> EntityMatchError {
    match err {
        EntityMatchError::Matching {
            context: existing,
            source,
        } => EntityMatchError::Matching {
            context: chain_context(new_ctx, &existing),
            source,
        },
        EntityMatchError::Table {
            context: existing,
            source,
        } => EntityMatchError::Table {
            context: chain_context(new_ctx, &existing),
            source,
        },
        EntityMatchError::Io {
            path,
            message,
            source,
        } => EntityMatchError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        EntityMatchError::Config(msg) => EntityMatchError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_metric_display_names_valid_metrics() {
        let err = EntityMatchError::invalid_metric("foo");
        let source = std::error::Error::source(&err)
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(source.contains("'foo'"), "{source}");
        for name in ["LCSS", "Hamming", "Levenshtein", "Jaro"] {
            assert!(source.contains(name), "missing {name}: {source}");
        }
    }

    #[test]
    fn test_column_not_found_kind() {
        let err = EntityMatchError::column_not_found("PlayerName");
        assert_eq!(
            err.table_kind(),
            Some(&TableErrorKind::ColumnNotFound("PlayerName".to_string()))
        );
        assert!(err.matching_kind().is_none());
    }

    #[test]
    fn test_io_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = EntityMatchError::io("/path/to/roster.txt", io_err);
        assert!(err.to_string().contains("/path/to/roster.txt"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(EntityMatchError::invalid_metric("foo"))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(EntityMatchError::Matching { context, source }) => {
                assert_eq!(
                    context,
                    "outer layer: middle layer: selecting distance metric"
                );
                assert_eq!(source, MatchingErrorKind::InvalidMetric("foo".to_string()));
            }
            other => panic!("Expected Matching error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(EntityMatchError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called);
    }

    #[test]
    fn test_config_error_context() {
        let result: Result<()> = Err(EntityMatchError::config("matching.metric: unknown"));
        match result.context("loading settings") {
            Err(EntityMatchError::Config(msg)) => {
                assert_eq!(msg, "loading settings: matching.metric: unknown");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("outer", "middle: inner"), "outer: middle: inner");
    }
}
