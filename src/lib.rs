//! **Fuzzy association of recorded player names with a trusted roster.**
//!
//! Game engines and external rosters often record the same players under
//! slightly different names ("s1mple" vs "S1mple", "Alexnder" vs
//! "Alexander"). `entity-match` pairs each recorded (source) name with its
//! closest roster (candidate) name using a selectable string metric, and
//! provides small table helpers to apply the result.
//!
//! ## Core Concepts & Modules
//!
//! - **[`matching`]**: [`EntityAssociator`] and the [`associate`] shortcut.
//!   Distance metrics (LCS, Hamming, Levenshtein, Jaro) assign greedily and
//!   use each candidate at most once; closest-match mode picks the best
//!   sequence ratio and may reuse candidates.
//! - **[`table`]**: [`Table`], [`replace_entities`] and [`remove_dupes`].
//! - **[`config`]**: YAML configuration discovery, loading and validation.
//! - **[`error`]**: [`EntityMatchError`] and context helpers.
//!
//! ## Getting Started
//!
//! ```
//! use entity_match::{associate, replace_entities, Table};
//!
//! let game_names = vec![Some("Alex"), Some("Alexnder"), Some(""), None];
//! let roster = ["Alexander", "Robert"];
//! let assoc = associate(&game_names, &roster, "levenshtein")?;
//!
//! let mut kills = Table::from_rows(
//!     ["attacker", "round"],
//!     vec![
//!         vec![Some("Alexnder".to_string()), Some("1".to_string())],
//!         vec![Some("Alex".to_string()), Some("2".to_string())],
//!     ],
//! )?;
//! replace_entities(&mut kills, "attacker", &assoc)?;
//! assert_eq!(
//!     kills.column_values("attacker")?,
//!     vec![Some("Robert"), Some("Alexander")]
//! );
//! # Ok::<(), entity_match::EntityMatchError>(())
//! ```

#![warn(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod table;

pub use error::{EntityMatchError, ErrorContext, MatchingErrorKind, Result, TableErrorKind};
pub use matching::{
    associate, Association, DistanceMetric, EntityAssociator, MatchScore, MetricKind,
};
pub use table::{remove_dupes, replace_entities, Table};
