//! Candidate pool for one association run.
//!
//! The pool is owned by a single matching loop. Taking a candidate
//! removes it while keeping the remaining entries in their original
//! relative order, so "earliest in the pool" stays well defined.

use super::metric::DistanceMetric;

/// A candidate still available for assignment.
#[derive(Debug, Clone)]
struct PoolEntry {
    /// Position in the caller's candidate list
    position: usize,
    name: String,
    /// Lowercased form used for comparison
    folded: String,
}

/// A candidate selected from the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolMatch {
    /// The candidate name as supplied by the caller
    pub name: String,
    /// Position in the caller's original candidate list
    pub position: usize,
    /// Distance between the source name and this candidate
    pub distance: f64,
}

/// Ordered, shrinking set of candidate names.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    entries: Vec<PoolEntry>,
}

impl CandidatePool {
    /// Build a pool from candidate names, preserving their order.
    pub fn new<S: AsRef<str>>(candidates: &[S]) -> Self {
        let entries = candidates
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let name = name.as_ref();
                PoolEntry {
                    position,
                    name: name.to_string(),
                    folded: name.to_lowercase(),
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of candidates still available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every candidate has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining candidate names, in pool order.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Find the nearest candidate to `folded_source` without removing it.
    ///
    /// Only a strictly smaller distance replaces the current best, so
    /// ties resolve to the earliest remaining candidate.
    #[must_use]
    pub fn nearest(&self, folded_source: &str, metric: DistanceMetric) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            let distance = metric.distance(folded_source, &entry.folded);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((idx, distance)),
            }
        }
        best
    }

    /// Find, remove, and return the nearest candidate to `folded_source`.
    pub fn take_nearest(&mut self, folded_source: &str, metric: DistanceMetric) -> Option<PoolMatch> {
        let (idx, distance) = self.nearest(folded_source, metric)?;
        let entry = self.entries.remove(idx);
        Some(PoolMatch {
            name: entry.name,
            position: entry.position,
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_nearest_removes_candidate() {
        let mut pool = CandidatePool::new(&["Alexander", "Robert"]);
        let taken = pool
            .take_nearest("alexandr", DistanceMetric::Levenshtein)
            .unwrap();
        assert_eq!(taken.name, "Alexander");
        assert_eq!(taken.position, 0);
        assert_eq!(taken.distance, 1.0);
        assert_eq!(pool.remaining().collect::<Vec<_>>(), vec!["Robert"]);
    }

    #[test]
    fn test_tie_goes_to_earliest_remaining() {
        let mut pool = CandidatePool::new(&["abx", "aby", "abz"]);
        let first = pool.take_nearest("abc", DistanceMetric::Hamming).unwrap();
        assert_eq!(first.name, "abx");
        let second = pool.take_nearest("abc", DistanceMetric::Hamming).unwrap();
        assert_eq!(second.name, "aby");
        assert_eq!(second.position, 1);
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        let pool = CandidatePool::new(&["ROBERT", "bob"]);
        let (idx, distance) = pool.nearest("robert", DistanceMetric::Levenshtein).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool = CandidatePool::new::<&str>(&[]);
        assert!(pool.is_empty());
        assert!(pool.take_nearest("anyone", DistanceMetric::Jaro).is_none());
    }
}
