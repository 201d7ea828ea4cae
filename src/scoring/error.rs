use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("invalid weight profile (version {version}): {reason}")]
    InvalidWeights { version: u64, reason: String },

    #[error("scoring computation failed for candidate {candidate_id}: {reason}")]
    ComputationFailed { candidate_id: i64, reason: String },
}

pub type ScoringResult<T> = Result<T, ScoringError>;
