use std::any::Any;
use std::collections::BTreeMap;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;
use tracing::{debug, instrument, warn};

use super::types::{BatchOutcome, ChunkOutput, SkipReason, SkippedCandidate};
use crate::bias::PoolComposition;
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_TIMEOUT_MS, DEFAULT_MAX_CONCURRENT_CHUNKS};
use crate::features::{
    JobFeatures, background_of, extract_job, try_extract_candidate, try_extract_job,
};
use crate::model::{CandidateRecord, JobRecord};
use crate::preferences::{PreferenceStore, WeightProfile};
use crate::scoring::{ScoringError, sort_ranked};
use crate::strategy::{FallbackScorer, MatchingStrategy, ScoringContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub chunk_size: usize,
    pub max_concurrent_chunks: usize,
    pub chunk_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: DEFAULT_MAX_CONCURRENT_CHUNKS,
            chunk_timeout: Duration::from_millis(DEFAULT_CHUNK_TIMEOUT_MS),
        }
    }
}

/// Scores one job against many candidates in concurrent, isolated chunks.
///
/// Each chunk runs on the blocking pool under a timeout, bounded by a semaphore shared by
/// every request on this matcher. A candidate whose primary scoring fails or panics is
/// retried with the fallback scorer and skipped only if that fails too; a timed-out chunk
/// skips its candidates. Dropping the returned future abandons chunks still in flight; their
/// blocking work keeps its semaphore slot until it returns.
pub struct BatchMatcher {
    primary: Arc<dyn MatchingStrategy>,
    fallback: FallbackScorer,
    preferences: Arc<PreferenceStore>,
    config: BatchConfig,
    semaphore: Arc<Semaphore>,
}

impl std::fmt::Debug for BatchMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchMatcher")
            .field("primary", &self.primary.algorithm_version())
            .field("config", &self.config)
            .field("available_chunk_slots", &self.available_chunk_slots())
            .finish()
    }
}

impl BatchMatcher {
    pub fn new(
        primary: Arc<dyn MatchingStrategy>,
        preferences: Arc<PreferenceStore>,
        config: BatchConfig,
    ) -> Self {
        let config = BatchConfig {
            chunk_size: config.chunk_size.max(1),
            max_concurrent_chunks: config.max_concurrent_chunks.max(1),
            chunk_timeout: config.chunk_timeout,
        };
        Self {
            primary,
            fallback: FallbackScorer::new(),
            preferences,
            config,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_chunks)),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn algorithm_version(&self) -> &'static str {
        self.primary.algorithm_version()
    }

    pub fn preferences(&self) -> &Arc<PreferenceStore> {
        &self.preferences
    }

    /// Chunk slots free right now. Blocking work holds its slot until it finishes.
    pub fn available_chunk_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Ranks `candidates` for `job` under the organization's current profile, keeping the top
    /// `limit`.
    #[instrument(skip(self, job, candidates), fields(job_id = job.id, org_id = %job.organization_id))]
    pub async fn match_job(
        &self,
        job: &JobRecord,
        candidates: &[CandidateRecord],
        limit: usize,
    ) -> BatchOutcome {
        let profile = self.preferences.get_profile(&job.organization_id);
        let mut outcome = self.rank_job(job, candidates, profile).await;
        outcome.truncate(limit);
        outcome
    }

    /// Ranks several jobs against the same pool, one job at a time.
    pub async fn match_jobs(
        &self,
        jobs: &[JobRecord],
        candidates: &[CandidateRecord],
        limit: usize,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            outcomes.push(self.match_job(job, candidates, limit).await);
        }
        outcomes
    }

    /// Full, untruncated ranking of `candidates` for `job` under `profile`.
    #[instrument(skip(self, job, candidates, profile), fields(job_id = job.id, candidates = candidates.len(), profile_version = profile.version))]
    pub async fn rank_job(
        &self,
        job: &JobRecord,
        candidates: &[CandidateRecord],
        profile: Arc<WeightProfile>,
    ) -> BatchOutcome {
        let (job_features, force_fallback) = match try_extract_job(job) {
            Ok(features) => (features, false),
            Err(e) => {
                warn!(error = %e, "Job record corrupted; scoring request with fallback");
                (extract_job(job), true)
            }
        };

        let pool = PoolComposition::from_backgrounds(candidates.iter().map(background_of));
        let ctx = ScoringContext::new(profile, pool);
        let job_features = Arc::new(job_features);
        let candidates: Arc<[CandidateRecord]> = Arc::from(candidates);

        let primary: Arc<dyn MatchingStrategy> = if force_fallback {
            Arc::new(self.fallback)
        } else {
            Arc::clone(&self.primary)
        };

        let mut tasks = JoinSet::new();
        let chunk_size = self.config.chunk_size;
        let chunk_count = candidates.len().div_ceil(chunk_size);
        let mut pending: BTreeMap<usize, Range<usize>> = BTreeMap::new();

        for chunk in 0..chunk_count {
            let start = chunk * chunk_size;
            let end = (start + chunk_size).min(candidates.len());
            pending.insert(chunk, start..end);

            let worker = ChunkWorker {
                primary: Arc::clone(&primary),
                fallback: self.fallback,
                job: Arc::clone(&job_features),
                ctx: ctx.clone(),
            };
            let candidates = Arc::clone(&candidates);
            let semaphore = Arc::clone(&self.semaphore);
            let timeout = self.config.chunk_timeout;

            tasks.spawn(async move {
                let ids = || candidates[start..end].iter().map(|c| c.id).collect::<Vec<_>>();

                let Ok(permit) = semaphore.acquire_owned().await else {
                    return (chunk, Err((ids(), SkipReason::ChunkFailed("semaphore closed".into()))));
                };

                // Held by the blocking task: a timed-out or abandoned chunk keeps its slot
                // until the work returns.
                let scoring = {
                    let candidates = Arc::clone(&candidates);
                    tokio::task::spawn_blocking(move || {
                        let _permit = permit;
                        worker.score(&candidates[start..end])
                    })
                };

                match time::timeout(timeout, scoring).await {
                    Ok(Ok(output)) => (chunk, Ok(output)),
                    Ok(Err(join_error)) => (
                        chunk,
                        Err((ids(), SkipReason::ChunkFailed(join_error.to_string()))),
                    ),
                    Err(_) => (chunk, Err((ids(), SkipReason::ChunkTimedOut))),
                }
            });
        }

        let mut results = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();
        let mut fallback_pairs = 0;

        let mut join_failure = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((chunk, Ok(output))) => {
                    pending.remove(&chunk);
                    results.extend(output.results);
                    skipped.extend(output.skipped);
                    fallback_pairs += output.fallback_pairs;
                }
                Ok((chunk, Err((ids, reason)))) => {
                    pending.remove(&chunk);
                    warn!(chunk, candidates = ids.len(), reason = %reason, "Skipping chunk");
                    skipped.extend(ids.into_iter().map(|candidate_id| SkippedCandidate {
                        candidate_id,
                        reason: reason.clone(),
                    }));
                }
                Err(join_error) => {
                    warn!(error = %join_error, "Chunk task failed to join");
                    join_failure = Some(join_error.to_string());
                }
            }
        }

        if !pending.is_empty() {
            let reason = SkipReason::ChunkFailed(
                join_failure.unwrap_or_else(|| "chunk task did not report".into()),
            );
            warn!(chunks = pending.len(), reason = %reason, "Skipping unreported chunks");
            skipped.extend(unreported_skips(&pending, &candidates, &reason));
        }

        sort_ranked(&mut results);
        skipped.sort_by_key(|s| s.candidate_id);

        debug!(
            scored = results.len(),
            skipped = skipped.len(),
            fallback_pairs,
            chunks = chunk_count,
            "Ranked candidate pool"
        );

        BatchOutcome {
            job_id: job.id,
            scored: results.len(),
            results,
            considered: candidates.len(),
            skipped,
            fallback_pairs,
            algorithm_version: primary.algorithm_version().to_string(),
        }
    }
}

/// Everything one chunk needs, owned so it can move onto the blocking pool.
struct ChunkWorker {
    primary: Arc<dyn MatchingStrategy>,
    fallback: FallbackScorer,
    job: Arc<JobFeatures>,
    ctx: ScoringContext,
}

impl ChunkWorker {
    fn score(&self, candidates: &[CandidateRecord]) -> ChunkOutput {
        let mut output = ChunkOutput::default();

        for candidate in candidates {
            let started = Instant::now();

            let features = match try_extract_candidate(candidate) {
                Ok(features) => features,
                Err(e) => {
                    warn!(candidate_id = candidate.id, error = %e, "Skipping candidate");
                    output.skipped.push(SkippedCandidate {
                        candidate_id: candidate.id,
                        reason: SkipReason::Extraction(e.to_string()),
                    });
                    continue;
                }
            };

            let primary = panic::catch_unwind(AssertUnwindSafe(|| {
                self.primary.score(&self.job, &features, &self.ctx)
            }))
            .unwrap_or_else(|payload| {
                Err(ScoringError::ComputationFailed {
                    candidate_id: candidate.id,
                    reason: format!("strategy panicked: {}", panic_message(payload.as_ref())),
                })
            });

            let mut result = match primary {
                Ok(result) => result,
                Err(primary_error) => {
                    match self.fallback.score(&self.job, &features, &self.ctx) {
                        Ok(result) => {
                            warn!(
                                candidate_id = candidate.id,
                                error = %primary_error,
                                algorithm_version = result.algorithm_version.as_str(),
                                "Primary strategy failed; using fallback"
                            );
                            output.fallback_pairs += 1;
                            result
                        }
                        Err(fallback_error) => {
                            warn!(
                                candidate_id = candidate.id,
                                error = %fallback_error,
                                "Skipping candidate"
                            );
                            output.skipped.push(SkippedCandidate {
                                candidate_id: candidate.id,
                                reason: SkipReason::Scoring(fallback_error.to_string()),
                            });
                            continue;
                        }
                    }
                }
            };

            result.processing_time_us =
                u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            output.results.push(result);
        }

        output
    }
}

/// Skip entries for every candidate of the chunks that never reported back.
pub(super) fn unreported_skips(
    pending: &BTreeMap<usize, Range<usize>>,
    candidates: &[CandidateRecord],
    reason: &SkipReason,
) -> Vec<SkippedCandidate> {
    pending
        .values()
        .flat_map(|range| &candidates[range.clone()])
        .map(|candidate| SkippedCandidate {
            candidate_id: candidate.id,
            reason: reason.clone(),
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
