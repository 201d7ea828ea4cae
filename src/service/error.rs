use thiserror::Error;

use crate::store::StoreError;

/// Failures surfaced by [`super::MatchService`].
///
/// Scoring problems never appear here: they degrade to fallback results or skipped
/// candidates. Only a store that cannot be read, or a caller asking for a job that does not
/// exist, fails a request.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("job {job_id} not found")]
    JobNotFound { job_id: i64 },
}

pub type ServiceResult<T> = Result<T, MatchError>;
