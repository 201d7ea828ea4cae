//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Score Scale
//!
//! Every sub-score and total lives on a 0–100 scale. [`NEUTRAL_SUB_SCORE`] is the value a
//! factor takes when there is nothing to compare (missing data on either side), so that
//! absent information neither rewards nor punishes a candidate.

/// Version tag stamped on results produced by the weighted multi-factor pipeline.
pub const FULL_ALGORITHM_VERSION: &str = "weighted-v2";

/// Version tag stamped on results produced by the dependency-free fallback scorer.
pub const FALLBACK_ALGORITHM_VERSION: &str = "fallback-v1";

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;
pub const NEUTRAL_SUB_SCORE: f64 = MAX_SCORE / 2.0;

/// Totals at or above this are a "Strong Match".
pub const STRONG_MATCH_THRESHOLD: f64 = 75.0;
/// Totals at or above this (and below strong) are a "Good Match".
pub const GOOD_MATCH_THRESHOLD: f64 = 55.0;

/// Upper bound on the share of a total the diversity factor may contribute.
pub const MAX_DIVERSITY_WEIGHT: f64 = 0.10;

/// Lowest weight a learned factor can decay to before re-normalization.
pub const MIN_FACTOR_WEIGHT: f64 = 0.02;

/// Tolerance used when checking that normalized weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

pub const DEFAULT_CHUNK_SIZE: usize = 25;
pub const DEFAULT_MAX_CONCURRENT_CHUNKS: usize = 4;
pub const DEFAULT_CHUNK_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RESULT_LIMIT: usize = 10;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Rounds a score to one decimal place, the precision exposed to callers.
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Clamps a score into the 0–100 range, mapping non-finite values to zero.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MIN_SCORE
    }
}
