//! Ratcliff/Obershelp sequence similarity and closest-match search.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both
//! strings and `M` is the number of characters covered by the matching
//! blocks found by recursively taking the longest common substring and
//! repeating on the pieces to its left and right.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Targets at least this long have their most frequent characters
/// excluded from block seeding.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity scorer with a fixed target string.
///
/// Building the character index of the target once lets the same
/// matcher be scored against many candidates.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    target: Vec<char>,
    /// Positions of each character in `target`, ascending
    positions: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    /// Create a matcher scoring candidates against `target`.
    #[must_use]
    pub fn new(target: &str) -> Self {
        let target: Vec<char> = target.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in target.iter().enumerate() {
            positions.entry(*c).or_default().push(j);
        }

        if target.len() >= POPULAR_MIN_LEN {
            let limit = target.len() / 100 + 1;
            positions.retain(|_, idxs| idxs.len() <= limit);
        }

        Self { target, positions }
    }

    /// Similarity ratio of `candidate` to the target, in `[0, 1]`.
    ///
    /// Two empty strings score 1.0.
    #[must_use]
    pub fn ratio(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = candidate.chars().collect();
        let total = candidate.len() + self.target.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matching_chars(&candidate) as f64 / total as f64
    }

    /// Number of characters covered by all matching blocks.
    fn matching_chars(&self, a: &[char]) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, a.len(), 0, self.target.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest common block of `a[alo..ahi]` and `target[blo..bhi]`.
    ///
    /// Returns `(i, j, size)`. Among maximal blocks, the one starting
    /// earliest in `a` wins, then the one starting earliest in the target.
    fn longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.target;
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // Length of the block ending at target[j] for the previous row of `a`
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_lengths = HashMap::new();
            if let Some(idxs) = self.positions.get(c) {
                for &j in idxs {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_lengths.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_lengths = next_lengths;
        }

        // Popular characters never seed a block, but may extend one
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

/// Convenience wrapper for a one-off ratio between two strings.
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}

/// Best `limit` candidates for `word` whose ratio is at least `cutoff`.
///
/// Results are ordered by descending ratio; equal ratios are ordered by
/// descending candidate string.
#[must_use]
pub fn closest_matches<'c, S: AsRef<str>>(
    word: &str,
    candidates: &'c [S],
    limit: usize,
    cutoff: f64,
) -> Vec<(&'c str, f64)> {
    if limit == 0 {
        return Vec::new();
    }

    let matcher = SequenceMatcher::new(word);
    let mut scored: Vec<(&str, f64)> = candidates
        .iter()
        .map(|c| {
            let c = c.as_ref();
            (c, matcher.ratio(c))
        })
        .filter(|(_, score)| *score >= cutoff)
        .collect();

    // Stable sort keeps the earliest of fully identical entries first
    scored.sort_by(|(name_a, score_a), (name_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| name_b.cmp(name_a))
    });
    scored.truncate(limit);
    scored
}

/// Single best candidate for `word` with ratio at least `cutoff`.
#[must_use]
pub fn closest_match<'c, S: AsRef<str>>(
    word: &str,
    candidates: &'c [S],
    cutoff: f64,
) -> Option<(&'c str, f64)> {
    closest_matches(word, candidates, 1, cutoff).into_iter().next()
}
