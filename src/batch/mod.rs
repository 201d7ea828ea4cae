//! Concurrent ranking of one job against a candidate pool.
//!
//! Candidates are split into chunks of [`BatchConfig::chunk_size`]. Each chunk is scored on
//! the blocking pool; at most [`BatchConfig::max_concurrent_chunks`] run at once and each is
//! bounded by [`BatchConfig::chunk_timeout`]. Failures are contained to the smallest unit:
//!
//! - a corrupted candidate is skipped,
//! - a candidate the primary strategy fails or panics on is rescored by the fallback scorer,
//! - a chunk that times out, or whose task is lost, skips only its own candidates.
//!
//! Every candidate ends up either in [`BatchOutcome::results`] or in
//! [`BatchOutcome::skipped`], never both.

pub mod matcher;
pub mod types;


pub use matcher::{BatchConfig, BatchMatcher};
pub use types::{BatchOutcome, SkipReason, SkippedCandidate};
