use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, info, instrument, warn};

use super::error::LearningResult;
use super::profile::{FactorWeights, WeightProfile};
use super::store::PreferenceStore;
use crate::constants::{MIN_FACTOR_WEIGHT, NEUTRAL_SUB_SCORE};
use crate::features::{JobFeatures, try_extract_candidate, try_extract_job};
use crate::model::{CandidateRecord, Factor, FeedbackRecord, JobRecord, SubScores};
use crate::scoring::ScoringEngine;
use crate::store::RecordStore;

pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_LEARNING_MAX_DELTA: f64 = 0.03;
pub const DEFAULT_LEARNING_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningConfig {
    /// Step size applied to each factor's correlation signal.
    pub learning_rate: f64,
    /// Largest change one feedback record may make to one weight.
    pub max_delta: f64,
    pub interval: Duration,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_delta: DEFAULT_LEARNING_MAX_DELTA,
            interval: Duration::from_secs(DEFAULT_LEARNING_INTERVAL_SECS),
        }
    }
}

/// One usable feedback record: outcome strength and the pair's sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub signal: f64,
    pub sub_scores: SubScores,
}

/// Sub-scores as a learning signal for `job`.
///
/// A factor the job leaves unconstrained scores every candidate alike, so it reads neutral
/// here: no stated experience level, no education requirement, or a remote posting.
pub fn learning_signal(job: &JobFeatures, sub_scores: SubScores) -> SubScores {
    let mut signal = sub_scores;
    if job.experience_range.is_none() {
        signal.experience = NEUTRAL_SUB_SCORE;
    }
    if job.vector.education.rank().is_none() {
        signal.education = NEUTRAL_SUB_SCORE;
    }
    if job.vector.location.is_remote() {
        signal.location = NEUTRAL_SUB_SCORE;
    }
    signal
}

/// Applies observations to `weights` in order and returns the re-normalized result.
///
/// Each factor moves by `learning_rate * signal * (sub_score - 50) / 50`, clamped to
/// `±max_delta`, and never drops below [`MIN_FACTOR_WEIGHT`]. Weights are re-normalized after
/// every observation so one record's influence stays bounded.
pub fn apply_observations(
    weights: &FactorWeights,
    observations: &[Observation],
    config: &LearningConfig,
) -> FactorWeights {
    let mut current = weights.normalized().unwrap_or(FactorWeights::DEFAULT);

    for observation in observations {
        if !observation.signal.is_finite() || !observation.sub_scores.is_finite() {
            continue;
        }
        let mut next = current;
        for factor in Factor::ALL {
            let correlation = observation.signal
                * (observation.sub_scores.get(factor) - NEUTRAL_SUB_SCORE)
                / NEUTRAL_SUB_SCORE;
            let delta =
                (config.learning_rate * correlation).clamp(-config.max_delta, config.max_delta);
            next.set(factor, (current.get(factor) + delta).max(MIN_FACTOR_WEIGHT));
        }
        if let Some(normalized) = next.normalized() {
            current = normalized;
        }
    }

    current
}

/// Summary of one [`LearningEngine::run_once`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningSummary {
    pub organizations_checked: usize,
    pub profiles_published: usize,
    pub failures: usize,
}

/// Out-of-band updater of per-organization weight profiles.
///
/// Updates for one organization are serialized; different organizations may learn in
/// parallel. Nothing here runs on the scoring path.
pub struct LearningEngine {
    records: Arc<dyn RecordStore>,
    preferences: Arc<PreferenceStore>,
    scoring: ScoringEngine,
    config: LearningConfig,
    writers: parking_lot::Mutex<HashMap<String, Arc<Mutex<()>>>>,
    watermarks: parking_lot::Mutex<HashMap<String, DateTime<Utc>>>,
    periodic_running: Arc<AtomicBool>,
}

impl std::fmt::Debug for LearningEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningEngine")
            .field("config", &self.config)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl LearningEngine {
    pub fn new(
        records: Arc<dyn RecordStore>,
        preferences: Arc<PreferenceStore>,
        config: LearningConfig,
    ) -> Self {
        Self {
            records,
            preferences,
            scoring: ScoringEngine::new(),
            config,
            writers: parking_lot::Mutex::new(HashMap::new()),
            watermarks: parking_lot::Mutex::new(HashMap::new()),
            periodic_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Arc<PreferenceStore> {
        &self.preferences
    }

    fn writer_for(&self, organization_id: &str) -> Arc<Mutex<()>> {
        let mut writers = self.writers.lock();
        Arc::clone(writers.entry(organization_id.to_string()).or_default())
    }

    /// Folds a feedback batch into an organization's profile.
    ///
    /// Records for another organization, with an out-of-range values assessment, or whose job
    /// or candidate is missing or corrupted are logged and skipped. When nothing usable
    /// remains the current profile is returned unchanged; otherwise a new version is built
    /// from a copy and swapped in. Store failures abort the update and leave the profile as
    /// it was. The batch is applied as given; [`Self::run_once`] is what keeps already
    /// learned feedback out.
    #[instrument(skip(self, organization_id, feedback), fields(org_id = organization_id, records = feedback.len()))]
    pub async fn update_from_feedback(
        &self,
        organization_id: &str,
        feedback: &[FeedbackRecord],
    ) -> LearningResult<Arc<WeightProfile>> {
        let writer = self.writer_for(organization_id);
        let _guard = writer.lock().await;

        let current = self.preferences.get_profile(organization_id);

        let mut candidate_ids: Vec<i64> = feedback.iter().map(|f| f.candidate_id).collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();
        let candidates: HashMap<i64, CandidateRecord> = self
            .records
            .get_candidates(&candidate_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut jobs: HashMap<i64, Option<JobRecord>> = HashMap::new();
        let mut observations = Vec::with_capacity(feedback.len());
        let mut skipped = 0usize;
        let mut learned_through = current.learned_through;

        for record in feedback {
            if record.organization_id != organization_id {
                warn!(
                    candidate_id = record.candidate_id,
                    job_id = record.job_id,
                    found = %record.organization_id,
                    "Skipping feedback for another organization"
                );
                skipped += 1;
                continue;
            }

            let signal = match record.outcome.signal() {
                Ok(Some(signal)) => signal,
                Ok(None) => {
                    debug!(candidate_id = record.candidate_id, "Feedback carries no signal");
                    continue;
                }
                Err(e) => {
                    warn!(
                        candidate_id = record.candidate_id,
                        job_id = record.job_id,
                        error = %e,
                        "Skipping malformed feedback"
                    );
                    skipped += 1;
                    continue;
                }
            };

            if !jobs.contains_key(&record.job_id) {
                let job = self.records.get_job(record.job_id).await?;
                jobs.insert(record.job_id, job);
            }
            let Some(Some(job)) = jobs.get(&record.job_id) else {
                warn!(job_id = record.job_id, "Skipping feedback for unknown job");
                skipped += 1;
                continue;
            };
            let Some(candidate) = candidates.get(&record.candidate_id) else {
                warn!(
                    candidate_id = record.candidate_id,
                    "Skipping feedback for unknown candidate"
                );
                skipped += 1;
                continue;
            };

            let features = try_extract_job(job)
                .and_then(|job| try_extract_candidate(candidate).map(|c| (job, c)));
            let (job_features, candidate_features) = match features {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "Skipping feedback on corrupted record");
                    skipped += 1;
                    continue;
                }
            };

            let (sub_scores, _) = self.scoring.sub_scores(&job_features, &candidate_features);
            observations.push(Observation {
                signal,
                sub_scores: learning_signal(&job_features, sub_scores),
            });
            learned_through = learned_through.max(Some(record.recorded_at));
        }

        if observations.is_empty() {
            debug!(skipped, "No usable feedback; profile unchanged");
            return Ok(current);
        }

        let weights = apply_observations(&current.weights, &observations, &self.config);
        let next = WeightProfile {
            organization_id: Some(organization_id.to_string()),
            version: current.version + 1,
            weights,
            feedback_applied: current.feedback_applied + observations.len() as u64,
            learned_through,
        };

        let published = self.preferences.publish(next)?;
        info!(
            version = published.version,
            applied = observations.len(),
            skipped,
            "Published learned weight profile"
        );
        Ok(published)
    }

    /// Newest feedback already folded into the organization's profile.
    ///
    /// A profile loaded from a snapshot carries its own `learned_through`, which seeds the
    /// watermark after a restart.
    fn watermark_for(&self, organization_id: &str) -> Option<DateTime<Utc>> {
        let seen = self.watermarks.lock().get(organization_id).copied();
        let learned = self
            .preferences
            .learned_profile(organization_id)
            .and_then(|profile| profile.learned_through);
        seen.max(learned)
    }

    /// Learns from feedback newer than each organization's watermark.
    ///
    /// A failing organization is logged and counted; the others still update.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> LearningResult<LearningSummary> {
        let organizations = self.records.feedback_organizations().await?;
        let mut summary = LearningSummary {
            organizations_checked: organizations.len(),
            ..LearningSummary::default()
        };

        for organization_id in organizations {
            let since = self.watermark_for(&organization_id);
            let feedback = match self.records.get_feedback(&organization_id, since).await {
                Ok(mut feedback) => {
                    feedback.retain(|f| since.is_none_or(|since| f.recorded_at > since));
                    feedback
                }
                Err(e) => {
                    warn!(org_id = %organization_id, error = %e, "Feedback lookup failed");
                    summary.failures += 1;
                    continue;
                }
            };
            let Some(newest) = feedback.iter().map(|f| f.recorded_at).max() else {
                continue;
            };

            let before = self.preferences.get_profile(&organization_id).version;
            match self.update_from_feedback(&organization_id, &feedback).await {
                Ok(profile) => {
                    if profile.version > before {
                        summary.profiles_published += 1;
                    }
                    self.watermarks.lock().insert(organization_id, newest);
                }
                Err(e) => {
                    warn!(org_id = %organization_id, error = %e, "Learning update failed");
                    summary.failures += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Starts the periodic learning task (no-op if one is already running).
    pub fn spawn_periodic(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        if self.periodic_running.swap(true, Ordering::AcqRel) {
            return tokio::spawn(async {});
        }

        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = time::interval(engine.config.interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match engine.run_once().await {
                    Ok(summary) => debug!(?summary, "Periodic learning pass finished"),
                    Err(e) => warn!(error = %e, "Periodic learning pass failed"),
                }
            }
        })
    }

    /// Returns `true` while a periodic task has been started.
    pub fn is_periodic_running(&self) -> bool {
        self.periodic_running.load(Ordering::Acquire)
    }
}
