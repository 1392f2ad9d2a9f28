//! Default values for entity-match configuration.

/// Metric used when none is configured.
pub const DEFAULT_METRIC: &str = "lcss";

/// Source-file line that stands for a missing name.
pub const DEFAULT_MISSING_MARKER: &str = "NaN";
