use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::error::{MatchError, ServiceResult};
use crate::batch::{BatchMatcher, SkippedCandidate};
use crate::cache::{CacheStatus, CachedRanking, ResultCache};
use crate::config::EngineConfig;
use crate::hashing::{candidate_set_fingerprint, hash_to_u64};
use crate::model::{CandidateRecord, JobRecord, MatchResult};
use crate::preferences::{LearningEngine, PreferenceStore};
use crate::store::RecordStore;
use crate::strategy::{StrategySelection, select_strategy};

/// Ranked matches for one job, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMatches {
    pub job_id: i64,
    pub matches: Vec<MatchResult>,
    /// Version of the strategy that ranked the request.
    pub algorithm_version: String,
    pub processing_time_ms: u64,
    pub total_candidates_considered: usize,
    pub skipped_candidates: Vec<SkippedCandidate>,
    pub cache_status: CacheStatus,
}

/// Entry point for match requests: store reads, cache, ranking and learning.
pub struct MatchService {
    records: Arc<dyn RecordStore>,
    matcher: BatchMatcher,
    cache: ResultCache,
    learning: Arc<LearningEngine>,
    strategy_reason: String,
}

impl std::fmt::Debug for MatchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchService")
            .field("matcher", &self.matcher)
            .field("cache", &self.cache)
            .field("strategy_reason", &self.strategy_reason)
            .finish_non_exhaustive()
    }
}

impl MatchService {
    /// Selects the strategy from `config` and wires every component to `records`.
    pub fn from_config(config: &EngineConfig, records: Arc<dyn RecordStore>) -> Self {
        let selection = select_strategy(
            config.strategy,
            config.profiles_path.as_deref(),
            config.bias_config(),
        );
        Self::new(records, selection, config)
    }

    pub fn new(
        records: Arc<dyn RecordStore>,
        selection: StrategySelection,
        config: &EngineConfig,
    ) -> Self {
        let StrategySelection {
            strategy,
            preferences,
            reason,
        } = selection;

        let learning = Arc::new(LearningEngine::new(
            Arc::clone(&records),
            Arc::clone(&preferences),
            config.learning_config(),
        ));
        let matcher = BatchMatcher::new(strategy, preferences, config.batch_config());

        info!(
            algorithm_version = matcher.algorithm_version(),
            cache_enabled = config.cache_capacity > 0,
            "Match service ready"
        );

        Self {
            records,
            matcher,
            cache: config.result_cache(),
            learning,
            strategy_reason: reason,
        }
    }

    pub fn algorithm_version(&self) -> &'static str {
        self.matcher.algorithm_version()
    }

    /// Why the primary strategy was selected.
    pub fn strategy_reason(&self) -> &str {
        &self.strategy_reason
    }

    pub fn matcher(&self) -> &BatchMatcher {
        &self.matcher
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn learning(&self) -> &Arc<LearningEngine> {
        &self.learning
    }

    pub fn preferences(&self) -> &Arc<PreferenceStore> {
        self.matcher.preferences()
    }

    /// Top `limit` candidates for `job_id` across the whole candidate pool.
    #[instrument(skip(self), fields(algorithm_version = self.algorithm_version()))]
    pub async fn get_top_matches(&self, job_id: i64, limit: usize) -> ServiceResult<TopMatches> {
        let started = Instant::now();
        let job = self
            .records
            .get_job(job_id)
            .await?
            .ok_or(MatchError::JobNotFound { job_id })?;
        let candidates = self.records.all_candidates().await?;

        Ok(self.rank(&job, &candidates, limit, started).await)
    }

    /// Top `limit` candidates for each of `job_ids`, in request order.
    ///
    /// Every job is resolved before any ranking starts, so an unknown id fails the request
    /// without doing partial work.
    #[instrument(skip(self, job_ids), fields(jobs = job_ids.len()))]
    pub async fn batch_match(
        &self,
        job_ids: &[i64],
        limit: usize,
    ) -> ServiceResult<Vec<TopMatches>> {
        let mut jobs = Vec::with_capacity(job_ids.len());
        for &job_id in job_ids {
            let job = self
                .records
                .get_job(job_id)
                .await?
                .ok_or(MatchError::JobNotFound { job_id })?;
            jobs.push(job);
        }
        let candidates = self.records.all_candidates().await?;

        let mut responses = Vec::with_capacity(jobs.len());
        for job in &jobs {
            responses.push(self.rank(job, &candidates, limit, Instant::now()).await);
        }
        Ok(responses)
    }

    async fn rank(
        &self,
        job: &JobRecord,
        candidates: &[CandidateRecord],
        limit: usize,
        started: Instant,
    ) -> TopMatches {
        let profile = self.preferences().get_profile(&job.organization_id);
        let fingerprint = candidate_set_fingerprint(
            job,
            candidates,
            profile.version,
            self.algorithm_version(),
        );
        let fingerprint_id = hash_to_u64(&fingerprint);

        let (ranking, cache_status) = match self.cache.get(job.id, &fingerprint) {
            Some(ranking) => {
                debug!(job_id = job.id, fingerprint = fingerprint_id, "Ranking cache hit");
                (ranking, CacheStatus::Hit)
            }
            None => {
                let outcome = self.matcher.rank_job(job, candidates, profile).await;
                let ranking = CachedRanking::new(outcome, candidates.iter().map(|c| c.id));

                if !self.cache.is_enabled() {
                    (Arc::new(ranking), CacheStatus::Bypass)
                } else if ranking.outcome.has_transient_skips() {
                    debug!(
                        job_id = job.id,
                        fingerprint = fingerprint_id,
                        "Ranking incomplete; not caching"
                    );
                    (Arc::new(ranking), CacheStatus::Miss)
                } else {
                    debug!(job_id = job.id, fingerprint = fingerprint_id, "Ranking cache miss");
                    (self.cache.put(job.id, fingerprint, ranking), CacheStatus::Miss)
                }
            }
        };

        let outcome = &ranking.outcome;
        TopMatches {
            job_id: job.id,
            matches: outcome.results.iter().take(limit).cloned().collect(),
            algorithm_version: outcome.algorithm_version.clone(),
            processing_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            total_candidates_considered: outcome.considered,
            skipped_candidates: outcome.skipped.clone(),
            cache_status,
        }
    }
}
