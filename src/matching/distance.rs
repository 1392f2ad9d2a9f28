//! Pairwise string distances for name association.
//!
//! All functions operate on Unicode scalar values, not bytes.
//! Levenshtein and Jaro come from `strsim`; the LCS-sequence and
//! padded Hamming variants are implemented here since `strsim` either
//! lacks them or rejects unequal lengths.

/// Length of the longest common subsequence of `a` and `b`.
#[must_use]
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() || b_chars.is_empty() {
        return 0;
    }

    // Only the previous row is needed
    let mut prev = vec![0usize; b_chars.len() + 1];
    let mut curr = vec![0usize; b_chars.len() + 1];

    for ca in &a_chars {
        curr[0] = 0;
        for (j, cb) in b_chars.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// LCS-sequence distance: the longer length minus the LCS length.
///
/// `"abcd"` vs `"acd"` is 1; identical strings are 0; disjoint strings
/// are the longer length.
#[must_use]
pub fn lcs_distance(a: &str, b: &str) -> usize {
    let longest = a.chars().count().max(b.chars().count());
    longest - lcs_length(a, b)
}

/// Hamming distance that tolerates unequal lengths.
///
/// Positions past the end of the shorter string count as mismatches,
/// so `"abc"` vs `"abcde"` is 2.
#[must_use]
pub fn hamming_distance(a: &str, b: &str) -> usize {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    let mut distance = 0;

    loop {
        match (a_chars.next(), b_chars.next()) {
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    distance += 1;
                }
            }
            (Some(_), None) | (None, Some(_)) => distance += 1,
            (None, None) => return distance,
        }
    }
}

/// Levenshtein edit distance.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Jaro distance, `1 - jaro(a, b)`, in `[0, 1]`.
#[must_use]
pub fn jaro_distance(a: &str, b: &str) -> f64 {
    1.0 - strsim::jaro(a, b)
}
