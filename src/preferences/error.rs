use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LearningError {
    #[error("invalid weights for {organization}: {reason}")]
    InvalidWeights {
        organization: String,
        reason: String,
    },

    #[error("stale profile for {organization}: version {offered} does not supersede {current}")]
    StaleVersion {
        organization: String,
        offered: u64,
        current: u64,
    },

    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },

    #[error("profile snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

pub type LearningResult<T> = Result<T, LearningError>;
