//! Metric selection for name association.
//!
//! A metric is picked from a small closed set. Parsing is case-insensitive
//! and fails closed: anything not recognised is an
//! [`InvalidMetric`](crate::error::MatchingErrorKind::InvalidMetric) error.

use super::distance;
use crate::error::{EntityMatchError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Pairwise distance functions used by the pool-consuming matcher.
///
/// Smaller is closer. Inputs are compared as given; the associator
/// lowercases both sides before calling [`DistanceMetric::distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Longest common subsequence distance
    Lcs,
    /// Positional mismatch count, length difference counted as mismatches
    Hamming,
    /// Insert/delete/substitute edit distance
    Levenshtein,
    /// One minus Jaro similarity
    Jaro,
}

impl DistanceMetric {
    /// Compute the distance between two strings.
    #[must_use]
    pub fn distance(self, a: &str, b: &str) -> f64 {
        match self {
            Self::Lcs => distance::lcs_distance(a, b) as f64,
            Self::Hamming => distance::hamming_distance(a, b) as f64,
            Self::Levenshtein => distance::levenshtein_distance(a, b) as f64,
            Self::Jaro => distance::jaro_distance(a, b),
        }
    }

    /// Canonical selector name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lcs => "lcss",
            Self::Hamming => "hamming",
            Self::Levenshtein => "levenshtein",
            Self::Jaro => "jaro",
        }
    }
}

/// How source names are matched against the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Greedy nearest match by distance; each candidate is used at most once.
    Distance(DistanceMetric),
    /// Best Ratcliff/Obershelp ratio over the full list; candidates may repeat.
    ClosestMatch,
}

impl MetricKind {
    pub const LCS: Self = Self::Distance(DistanceMetric::Lcs);
    pub const HAMMING: Self = Self::Distance(DistanceMetric::Hamming);
    pub const LEVENSHTEIN: Self = Self::Distance(DistanceMetric::Levenshtein);
    pub const JARO: Self = Self::Distance(DistanceMetric::Jaro);

    /// Every selectable metric, in documentation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LCS,
            Self::HAMMING,
            Self::LEVENSHTEIN,
            Self::JARO,
            Self::ClosestMatch,
        ]
    }

    /// Canonical selector name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Distance(metric) => metric.name(),
            Self::ClosestMatch => "difflib",
        }
    }

    /// Whether matched candidates are removed from the pool.
    #[must_use]
    pub const fn consumes_candidates(self) -> bool {
        matches!(self, Self::Distance(_))
    }

    /// Parse a selector, ignoring case and surrounding whitespace.
    pub fn parse(selector: &str) -> Result<Self> {
        match selector.trim().to_lowercase().as_str() {
            "lcss" | "lcs" | "lcsseq" => Ok(Self::LCS),
            "hamming" => Ok(Self::HAMMING),
            "levenshtein" => Ok(Self::LEVENSHTEIN),
            "jaro" => Ok(Self::JARO),
            "difflib" | "closest" | "closest-match" | "closestmatch" => Ok(Self::ClosestMatch),
            _ => Err(EntityMatchError::invalid_metric(selector)),
        }
    }
}

impl Default for MetricKind {
    fn default() -> Self {
        Self::LCS
    }
}

impl FromStr for MetricKind {
    type Err = EntityMatchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
