use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached. This is the only data failure surfaced to callers.
    #[error("record store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },

    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
