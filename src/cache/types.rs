use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::batch::BatchOutcome;

/// Key of a cached ranking: the job plus a fingerprint of everything the ranking depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub job_id: i64,
    pub fingerprint: [u8; 32],
}

/// Full, untruncated ranking of one job against one candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedRanking {
    pub outcome: BatchOutcome,
    /// Every candidate the ranking was computed over, scored or skipped.
    pub candidate_ids: BTreeSet<i64>,
}

impl CachedRanking {
    pub fn new(outcome: BatchOutcome, candidate_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            outcome,
            candidate_ids: candidate_ids.into_iter().collect(),
        }
    }

    pub fn covers_candidate(&self, candidate_id: i64) -> bool {
        self.candidate_ids.contains(&candidate_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Hit,
    Miss,
    /// The cache is disabled (capacity zero).
    Bypass,
}

impl CacheStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Bypass => "BYPASS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
