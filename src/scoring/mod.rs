//! Weighted multi-factor scoring of one (job, candidate) pair.
//!
//! Five sub-scores (skills, experience, education, location, values) are computed
//! independently in [`factors`] and combined by [`ScoringEngine::score`] using an
//! organization's [`WeightProfile`](crate::preferences::WeightProfile). The result is the raw
//! score; the [`bias`](crate::bias) stage runs afterwards.
//!
//! # Ranking
//!
//! Equal totals are broken by the skills sub-score, then experience, then candidate id
//! ascending ([`rank_order`]). Insertion order never matters.

pub mod engine;
pub mod error;
pub mod factors;


pub use engine::{ScoringEngine, rank_order, sort_ranked, weighted_total};
pub use error::{ScoringError, ScoringResult};
