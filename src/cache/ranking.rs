use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::{debug, warn};

use super::types::{CacheKey, CachedRanking};
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS};

/// In-memory ranking cache keyed by `(job_id, fingerprint)`.
///
/// Entries expire after the TTL and are evicted by size beyond the capacity. A capacity of
/// zero disables the cache: lookups always miss and inserts are dropped.
#[derive(Clone)]
pub struct ResultCache {
    entries: Cache<CacheKey, Arc<CachedRanking>>,
    ttl: Duration,
    capacity: u64,
}

impl ResultCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();
        Self {
            entries,
            ttl,
            capacity,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS), 0)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Looks up the ranking for `job_id` computed under `fingerprint`.
    pub fn get(&self, job_id: i64, fingerprint: &[u8; 32]) -> Option<Arc<CachedRanking>> {
        if !self.is_enabled() {
            return None;
        }
        let key = CacheKey {
            job_id,
            fingerprint: *fingerprint,
        };
        self.entries.get(&key)
    }

    /// Stores a ranking. Writes for the same key carry the same value, so racing writers are
    /// harmless.
    pub fn put(
        &self,
        job_id: i64,
        fingerprint: [u8; 32],
        ranking: CachedRanking,
    ) -> Arc<CachedRanking> {
        let ranking = Arc::new(ranking);
        if self.is_enabled() {
            self.entries.insert(
                CacheKey {
                    job_id,
                    fingerprint,
                },
                Arc::clone(&ranking),
            );
        }
        ranking
    }

    /// Drops every ranking cached for `job_id`.
    pub fn invalidate_job(&self, job_id: i64) {
        match self.entries.invalidate_entries_if(move |key, _| key.job_id == job_id) {
            Ok(_) => debug!(job_id, "Invalidated cached rankings for job"),
            Err(e) => {
                warn!(job_id, error = %e, "Predicate invalidation failed; clearing cache");
                self.clear();
            }
        }
    }

    /// Drops every ranking computed over `candidate_id`.
    pub fn invalidate_candidate(&self, candidate_id: i64) {
        match self
            .entries
            .invalidate_entries_if(move |_, ranking| ranking.covers_candidate(candidate_id))
        {
            Ok(_) => debug!(candidate_id, "Invalidated cached rankings for candidate"),
            Err(e) => {
                warn!(candidate_id, error = %e, "Predicate invalidation failed; clearing cache");
                self.clear();
            }
        }
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Approximate entry count; call [`Self::run_pending_tasks`] first for an exact figure.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            DEFAULT_CACHE_CAPACITY,
        )
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.entry_count())
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish()
    }
}
