//! Fuzzy association of source names with a trusted vocabulary.
//!
//! # Architecture
//!
//! - [`MetricKind`] selects the matching mode: a [`DistanceMetric`] for
//!   greedy, pool-consuming assignment, or closest-match by sequence ratio.
//! - [`CandidatePool`] is the shrinking, order-preserving working set used
//!   by the distance metrics.
//! - [`EntityAssociator`] runs one pass over the source names and returns an
//!   [`Association`].
//!
//! # Example
//!
//! ```
//! use entity_match::matching::associate;
//!
//! let game_names = vec![Some("Alex"), Some("Alexnder"), None];
//! let roster = ["Alexander", "Robert"];
//!
//! let assoc = associate(&game_names, &roster, "levenshtein").unwrap();
//! assert_eq!(assoc.candidate_for("Alex"), Some("Alexander"));
//! assert_eq!(assoc.candidate_for("Alexnder"), Some("Robert"));
//! assert_eq!(assoc.get(None), Some(None));
//! ```

mod associate;
pub mod distance;
mod metric;
mod pool;
pub mod sequence;

pub use associate::{associate, Association, EntityAssociator, MatchScore, CLOSEST_MATCH_CUTOFF};
pub use metric::{DistanceMetric, MetricKind};
pub use pool::{CandidatePool, PoolMatch};
pub use sequence::{closest_match, closest_matches, SequenceMatcher};
