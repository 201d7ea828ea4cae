//! Read access to persisted jobs, candidates and feedback.
//!
//! The engine never owns these records. [`RecordStore`] is the seam to whatever CRUD layer
//! holds them; [`InMemoryStore`] backs tests and the binary.

pub mod error;
pub mod memory;


pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryStore, StoreSnapshot};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{CandidateRecord, FeedbackRecord, JobRecord};

#[async_trait]
/// Lookups the matching engine needs from the record layer.
pub trait RecordStore: Send + Sync {
    /// Job by id, `Ok(None)` when it does not exist.
    async fn get_job(&self, job_id: i64) -> StoreResult<Option<JobRecord>>;

    /// Every job, ordered by id.
    async fn list_jobs(&self) -> StoreResult<Vec<JobRecord>>;

    /// Candidates with the given ids. Unknown ids are omitted.
    async fn get_candidates(&self, ids: &[i64]) -> StoreResult<Vec<CandidateRecord>>;

    /// The full candidate pool, ordered by id.
    async fn all_candidates(&self) -> StoreResult<Vec<CandidateRecord>>;

    /// Feedback for one organization recorded strictly after `since` (all of it when `None`),
    /// ordered by `recorded_at`.
    async fn get_feedback(
        &self,
        organization_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<FeedbackRecord>>;

    /// Organizations that have at least one feedback record.
    async fn feedback_organizations(&self) -> StoreResult<Vec<String>>;
}
