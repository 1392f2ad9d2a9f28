//! Association of source names with a trusted candidate vocabulary.
//!
//! Two matching modes are supported:
//!
//! - **Distance metrics** (LCS, Hamming, Levenshtein, Jaro): source names
//!   are resolved in input order. Each one takes the nearest remaining
//!   candidate, which is then removed from the pool. This is a greedy,
//!   order-dependent approximation of a one-to-one assignment, not a
//!   minimum-cost bipartite matching.
//! - **Closest match**: each source name gets the candidate with the best
//!   sequence ratio over the full list. Candidates are never removed, so
//!   several source names may share one.
//!
//! The empty string and the missing entry (`None`) always map to `None`.
//! When the pool runs dry, the remaining source names are left out of the
//! association entirely rather than mapped to `None`.

use super::metric::{DistanceMetric, MetricKind};
use super::pool::CandidatePool;
use super::sequence::closest_match;
use crate::error::{EntityMatchError, MatchingErrorKind, Result};
use indexmap::IndexMap;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

/// Minimum sequence ratio accepted by closest-match mode.
pub const CLOSEST_MATCH_CUTOFF: f64 = 0.0;

/// How a source name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchScore {
    /// Picked by smallest distance
    Distance { value: f64 },
    /// Picked by highest sequence ratio
    Ratio { value: f64 },
}

impl MatchScore {
    /// The raw score value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Distance { value } | Self::Ratio { value } => *value,
        }
    }
}

/// Mapping from source names to candidate names.
///
/// Keys keep the order in which source names first appeared, with the
/// `None` key last. Every association contains `None -> None`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Association {
    metric: MetricKind,
    entries: IndexMap<Option<String>, Option<String>>,
    scores: IndexMap<String, MatchScore>,
    /// Source names skipped because the pool was empty
    exhausted: Vec<String>,
}

impl Association {
    fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            entries: IndexMap::new(),
            scores: IndexMap::new(),
            exhausted: Vec::new(),
        }
    }

    /// Metric that produced this association.
    #[must_use]
    pub const fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Look up a source name.
    ///
    /// Returns `None` when the name is not a key, `Some(None)` when it maps
    /// to no match.
    #[must_use]
    pub fn get(&self, source: Option<&str>) -> Option<Option<&str>> {
        self.entries
            .get(&source.map(str::to_string))
            .map(|candidate| candidate.as_deref())
    }

    /// Whether `source` is a key.
    #[must_use]
    pub fn contains(&self, source: Option<&str>) -> bool {
        self.get(source).is_some()
    }

    /// Candidate assigned to a present, non-empty source name.
    #[must_use]
    pub fn candidate_for(&self, source: &str) -> Option<&str> {
        self.get(Some(source)).flatten()
    }

    /// The score that selected the candidate for `source`.
    #[must_use]
    pub fn score(&self, source: &str) -> Option<MatchScore> {
        self.scores.get(source).copied()
    }

    /// Number of keys, including `None`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the `None` key is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(source, candidate)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> {
        self.entries
            .iter()
            .map(|(source, candidate)| (source.as_deref(), candidate.as_deref()))
    }

    /// Number of keys mapped to an actual candidate.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.entries.values().filter(|c| c.is_some()).count()
    }

    /// Source names left out because no candidates remained.
    #[must_use]
    pub fn exhausted(&self) -> &[String] {
        &self.exhausted
    }

    /// Non-empty source names with no candidate: those mapped to `None`
    /// plus those skipped for an empty pool.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter_map(|(source, candidate)| match (source.as_deref(), candidate) {
                (Some(name), None) if !name.is_empty() => Some(name),
                _ => None,
            })
            .chain(self.exhausted.iter().map(String::as_str))
    }

    /// Borrow the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &IndexMap<Option<String>, Option<String>> {
        &self.entries
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> IndexMap<Option<String>, Option<String>> {
        self.entries
    }

    fn insert(&mut self, source: Option<String>, candidate: Option<String>) {
        self.entries.insert(source, candidate);
    }
}

/// One serialized association entry.
#[derive(Serialize)]
struct EntryRecord<'a> {
    source: Option<&'a str>,
    candidate: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<MatchScore>,
}

// JSON object keys cannot be null, so entries serialize as a list.
impl Serialize for Association {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (source, candidate) in self.iter() {
            seq.serialize_element(&EntryRecord {
                source,
                candidate,
                score: source.and_then(|s| self.score(s)),
            })?;
        }
        seq.end()
    }
}

/// Associates source names with candidates using a fixed metric.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct EntityAssociator {
    metric: MetricKind,
}

impl EntityAssociator {
    /// Create an associator for the given metric.
    pub const fn new(metric: MetricKind) -> Self {
        Self { metric }
    }

    /// Create an associator from a selector such as `"levenshtein"`.
    pub fn from_selector(selector: &str) -> Result<Self> {
        MetricKind::parse(selector).map(Self::new)
    }

    /// The configured metric.
    #[must_use]
    pub const fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Build the association for `source_names` against `candidate_names`.
    ///
    /// Fails with [`MatchingErrorKind::EmptyCandidate`] if any candidate is
    /// the empty string.
    pub fn associate<S, C>(&self, source_names: &[Option<S>], candidate_names: &[C]) -> Result<Association>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        validate_candidates(candidate_names)?;

        let mut association = match self.metric {
            MetricKind::Distance(metric) => associate_consuming(source_names, candidate_names, metric),
            MetricKind::ClosestMatch => associate_closest(source_names, candidate_names),
        };
        association.insert(None, None);

        tracing::info!(
            metric = %self.metric,
            sources = source_names.len(),
            candidates = candidate_names.len(),
            matched = association.matched_count(),
            exhausted = association.exhausted.len(),
            "Associated entity names"
        );

        Ok(association)
    }
}

/// Associate names using a selector string.
///
/// Equivalent to `EntityAssociator::from_selector(metric)?.associate(..)`.
pub fn associate<S, C>(source_names: &[Option<S>], candidate_names: &[C], metric: &str) -> Result<Association>
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    EntityAssociator::from_selector(metric)?.associate(source_names, candidate_names)
}

fn validate_candidates<C: AsRef<str>>(candidate_names: &[C]) -> Result<()> {
    match candidate_names.iter().position(|c| c.as_ref().is_empty()) {
        Some(index) => Err(EntityMatchError::matching(
            "validating candidate names",
            MatchingErrorKind::EmptyCandidate { index },
        )),
        None => Ok(()),
    }
}

fn associate_consuming<S, C>(
    source_names: &[Option<S>],
    candidate_names: &[C],
    metric: DistanceMetric,
) -> Association
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    let mut association = Association::new(MetricKind::Distance(metric));
    let mut pool = CandidatePool::new(candidate_names);

    for name in source_names.iter().flatten() {
        let name = name.as_ref();
        if association.contains(Some(name)) || association.exhausted.iter().any(|n| n == name) {
            continue;
        }
        if name.is_empty() {
            association.insert(Some(String::new()), None);
            continue;
        }

        match pool.take_nearest(&name.to_lowercase(), metric) {
            Some(found) => {
                tracing::debug!(
                    source = name,
                    candidate = %found.name,
                    distance = found.distance,
                    remaining = pool.len(),
                    "Assigned candidate"
                );
                association
                    .scores
                    .insert(name.to_string(), MatchScore::Distance { value: found.distance });
                association.insert(Some(name.to_string()), Some(found.name));
            }
            None => {
                tracing::debug!(source = name, "Candidate pool exhausted; leaving name unassigned");
                association.exhausted.push(name.to_string());
            }
        }
    }

    association
}

fn associate_closest<S, C>(source_names: &[Option<S>], candidate_names: &[C]) -> Association
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    let mut association = Association::new(MetricKind::ClosestMatch);

    for name in source_names.iter().flatten() {
        let name = name.as_ref();
        if association.contains(Some(name)) {
            continue;
        }
        if name.is_empty() {
            association.insert(Some(String::new()), None);
            continue;
        }

        let candidate = closest_match(name, candidate_names, CLOSEST_MATCH_CUTOFF).map(|(found, ratio)| {
            tracing::debug!(source = name, candidate = found, ratio, "Closest candidate");
            association
                .scores
                .insert(name.to_string(), MatchScore::Ratio { value: ratio });
            found.to_string()
        });
        association.insert(Some(name.to_string()), candidate);
    }

    association
}
