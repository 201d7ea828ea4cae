use serde::{Deserialize, Serialize};

use crate::model::MatchResult;

/// Why a candidate is missing from a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The record is corrupted and strict extraction rejected it.
    Extraction(String),
    /// Both the primary strategy and the fallback scorer failed.
    Scoring(String),
    /// The candidate's chunk exceeded the per-chunk timeout.
    ChunkTimedOut,
    /// The candidate's chunk task panicked or was cancelled.
    ChunkFailed(String),
}

impl SkipReason {
    /// `true` for chunk-level failures that may not recur on the next request.
    pub fn is_transient(&self) -> bool {
        matches!(self, SkipReason::ChunkTimedOut | SkipReason::ChunkFailed(_))
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Extraction(reason) => write!(f, "extraction failed: {}", reason),
            SkipReason::Scoring(reason) => write!(f, "scoring failed: {}", reason),
            SkipReason::ChunkTimedOut => write!(f, "chunk timed out"),
            SkipReason::ChunkFailed(reason) => write!(f, "chunk failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub candidate_id: i64,
    pub reason: SkipReason,
}

/// Ranked output of one job against a candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub job_id: i64,
    /// Results in ranking order, truncated to the requested limit.
    pub results: Vec<MatchResult>,
    /// Candidates submitted for scoring.
    pub considered: usize,
    /// Candidates successfully scored, before truncation.
    pub scored: usize,
    pub skipped: Vec<SkippedCandidate>,
    /// Pairs scored by the fallback scorer after the primary strategy failed on them.
    pub fallback_pairs: usize,
    /// Version of the primary strategy used for the request.
    pub algorithm_version: String,
}

impl BatchOutcome {
    /// `true` when every returned result came from the fallback scorer.
    pub fn is_fallback(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(MatchResult::is_fallback)
    }

    pub fn has_transient_skips(&self) -> bool {
        self.skipped.iter().any(|s| s.reason.is_transient())
    }

    /// Keeps the first `limit` results.
    pub fn truncate(&mut self, limit: usize) {
        self.results.truncate(limit);
    }
}

/// Output of one chunk.
#[derive(Debug, Default)]
pub(crate) struct ChunkOutput {
    pub results: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub fallback_pairs: usize,
}
