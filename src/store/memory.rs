use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RecordStore;
use super::error::{StoreError, StoreResult};
use crate::model::{CandidateRecord, FeedbackRecord, JobRecord};

/// On-disk JSON form of an [`InMemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
}

#[derive(Debug, Default)]
struct Records {
    jobs: BTreeMap<i64, JobRecord>,
    candidates: BTreeMap<i64, CandidateRecord>,
    feedback: Vec<FeedbackRecord>,
}

/// Process-local record store. Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<Records>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.write();
            records.jobs = snapshot.jobs.into_iter().map(|j| (j.id, j)).collect();
            records.candidates = snapshot
                .candidates
                .into_iter()
                .map(|c| (c.id, c))
                .collect();
            records.feedback = snapshot.feedback;
        }
        store
    }

    /// Reads a JSON [`StoreSnapshot`] from disk.
    pub fn load_snapshot(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Err(StoreError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            jobs = snapshot.jobs.len(),
            candidates = snapshot.candidates.len(),
            feedback = snapshot.feedback.len(),
            "Loaded record snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let records = self.records.read();
        StoreSnapshot {
            jobs: records.jobs.values().cloned().collect(),
            candidates: records.candidates.values().cloned().collect(),
            feedback: records.feedback.clone(),
        }
    }

    pub fn upsert_job(&self, job: JobRecord) {
        self.records.write().jobs.insert(job.id, job);
    }

    pub fn upsert_candidate(&self, candidate: CandidateRecord) {
        self.records
            .write()
            .candidates
            .insert(candidate.id, candidate);
    }

    pub fn record_feedback(&self, feedback: FeedbackRecord) {
        self.records.write().feedback.push(feedback);
    }

    /// Simulates the backing store going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                reason: "in-memory store marked unavailable".to_string(),
            })
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get_job(&self, job_id: i64) -> StoreResult<Option<JobRecord>> {
        self.ensure_available()?;
        Ok(self.records.read().jobs.get(&job_id).cloned())
    }

    async fn list_jobs(&self) -> StoreResult<Vec<JobRecord>> {
        self.ensure_available()?;
        Ok(self.records.read().jobs.values().cloned().collect())
    }

    async fn get_candidates(&self, ids: &[i64]) -> StoreResult<Vec<CandidateRecord>> {
        self.ensure_available()?;
        let records = self.records.read();
        let wanted: BTreeSet<i64> = ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| records.candidates.get(id).cloned())
            .collect())
    }

    async fn all_candidates(&self) -> StoreResult<Vec<CandidateRecord>> {
        self.ensure_available()?;
        Ok(self.records.read().candidates.values().cloned().collect())
    }

    async fn get_feedback(
        &self,
        organization_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<FeedbackRecord>> {
        self.ensure_available()?;
        let mut feedback: Vec<FeedbackRecord> = self
            .records
            .read()
            .feedback
            .iter()
            .filter(|f| f.organization_id == organization_id)
            .filter(|f| since.is_none_or(|since| f.recorded_at > since))
            .cloned()
            .collect();
        feedback.sort_by_key(|f| f.recorded_at);
        Ok(feedback)
    }

    async fn feedback_organizations(&self) -> StoreResult<Vec<String>> {
        self.ensure_available()?;
        let organizations: BTreeSet<String> = self
            .records
            .read()
            .feedback
            .iter()
            .map(|f| f.organization_id.clone())
            .collect();
        Ok(organizations.into_iter().collect())
    }
}
