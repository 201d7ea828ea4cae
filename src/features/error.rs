use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Job,
    Candidate,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Job => write!(f, "job"),
            RecordKind::Candidate => write!(f, "candidate"),
        }
    }
}

/// Raised only by the strict extraction path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("{kind} {id}: corrupted field '{field}': {reason}")]
    CorruptedField {
        kind: RecordKind,
        id: i64,
        field: &'static str,
        reason: String,
    },
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
