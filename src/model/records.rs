use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job posting as read from the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form required skills: delimited text or a JSON array string.
    #[serde(default)]
    pub required_skills: Option<String>,
    /// Level tag such as "Junior", "Mid" or "Senior".
    #[serde(default)]
    pub experience_level: Option<String>,
    /// Description and requirements prose.
    #[serde(default)]
    pub requirements: Option<String>,
    pub organization_id: String,
    /// Last-modified marker maintained by the CRUD layer.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Experience as stored upstream: usually a number, sometimes free text ("fresher", "3+").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawExperience {
    Years(i64),
    Fractional(f64),
    Text(String),
}

/// Five-dimension values assessment recorded during interviews, each on a 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuesScores {
    pub collaboration: i32,
    pub integrity: i32,
    pub ownership: i32,
    pub adaptability: i32,
    pub growth: i32,
}

impl ValuesScores {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn as_array(&self) -> [i32; 5] {
        [
            self.collaboration,
            self.integrity,
            self.ownership,
            self.adaptability,
            self.growth,
        ]
    }

    /// Returns `true` if every dimension is within 1–5.
    pub fn is_valid(&self) -> bool {
        self.as_array()
            .iter()
            .all(|v| (Self::MIN..=Self::MAX).contains(v))
    }

    /// Mean of the five dimensions, or `None` when any dimension is out of range.
    pub fn average(&self) -> Option<f64> {
        if !self.is_valid() {
            return None;
        }
        let sum: i32 = self.as_array().iter().sum();
        Some(sum as f64 / 5.0)
    }
}

/// Candidate profile as read from the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience_years: Option<RawExperience>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub values: Option<ValuesScores>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Hiring signal recorded by the interview/feedback subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Hired,
    NotHired,
    InterviewAdvanced,
    InterviewRejected,
    ValuesAssessment { scores: ValuesScores },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    #[error("values assessment out of range: {scores:?}")]
    ValuesOutOfRange { scores: ValuesScores },
}

impl Outcome {
    /// Signed strength of the outcome in [-1, 1].
    ///
    /// `Ok(None)` means the outcome carries no directional signal (a middling values
    /// assessment) and should not move any weights.
    pub fn signal(&self) -> Result<Option<f64>, OutcomeError> {
        let signal = match self {
            Outcome::Hired => Some(1.0),
            Outcome::InterviewAdvanced => Some(0.5),
            Outcome::NotHired => Some(-1.0),
            Outcome::InterviewRejected => Some(-0.5),
            Outcome::ValuesAssessment { scores } => {
                let average = scores
                    .average()
                    .ok_or(OutcomeError::ValuesOutOfRange { scores: *scores })?;
                if average >= 4.0 {
                    Some(0.5)
                } else if average <= 2.0 {
                    Some(-0.5)
                } else {
                    None
                }
            }
        };
        Ok(signal)
    }
}

/// One recorded outcome for a (candidate, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub candidate_id: i64,
    pub job_id: i64,
    pub organization_id: String,
    pub outcome: Outcome,
    pub recorded_at: DateTime<Utc>,
}
