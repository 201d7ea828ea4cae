//! Feature extraction: raw job/candidate records → typed feature vectors.
//!
//! Two entry points exist per record kind:
//!
//! - [`extract_job`] / [`extract_candidate`] are total. Malformed input degrades to safe
//!   defaults (empty skill set, zero years, unknown buckets) and never errors.
//! - [`try_extract_job`] / [`try_extract_candidate`] are strict. They apply the same defaults
//!   for *missing or unrecognized* data but reject *corrupted* data (a skills field that claims
//!   to be a JSON array and is not, or text with garbled characters). The batch matcher uses
//!   the strict path so a corrupted record is skipped rather than scored on garbage.

pub mod error;
pub mod levels;
pub mod location;
pub mod skills;

#[cfg(test)]
mod tests;

pub use error::{ExtractionError, ExtractionResult};
pub use levels::{EducationTier, ExperienceRange, Seniority};
pub use location::{LocationBucket, Region};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{CandidateRecord, JobRecord, ValuesScores};

/// Structured form of a record. Recomputed per scoring call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Canonical, lower-cased, de-duplicated skill names.
    pub skills: BTreeSet<String>,
    pub experience_years: f64,
    pub seniority: Seniority,
    pub education: EducationTier,
    pub location: LocationBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFeatures {
    pub job_id: i64,
    pub organization_id: String,
    pub vector: FeatureVector,
    /// Expected experience band, `None` when the posting states no level.
    pub experience_range: Option<ExperienceRange>,
    /// `true` when required skills were spotted in the prose rather than listed.
    pub skills_from_description: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeatures {
    pub candidate_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub vector: FeatureVector,
    /// Only present when all five dimensions are within range.
    pub values: Option<ValuesScores>,
    /// `true` when experience years were inferred from the seniority tag alone.
    pub experience_inferred: bool,
}

/// Background bucket used for pool-composition (diversity) accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Background {
    pub region: Region,
    pub education: EducationTier,
}

impl CandidateFeatures {
    pub fn background(&self) -> Background {
        Background {
            region: self.vector.location.region(),
            education: self.vector.education,
        }
    }
}

/// Background of a raw record without full extraction. Never fails.
pub fn background_of(candidate: &CandidateRecord) -> Background {
    Background {
        region: location::bucket_location(candidate.location.as_deref()).region(),
        education: levels::candidate_education(candidate.education.as_deref()),
    }
}

pub fn extract_job(job: &JobRecord) -> JobFeatures {
    let skills = job
        .required_skills
        .as_deref()
        .map(skills::parse_skill_text_lenient)
        .unwrap_or_default();
    build_job_features(job, skills)
}

pub fn try_extract_job(job: &JobRecord) -> ExtractionResult<JobFeatures> {
    let skills = match job.required_skills.as_deref() {
        Some(text) => {
            skills::parse_skill_text(text).map_err(|defect| ExtractionError::CorruptedField {
                kind: error::RecordKind::Job,
                id: job.id,
                field: "required_skills",
                reason: defect.to_string(),
            })?
        }
        None => BTreeSet::new(),
    };
    Ok(build_job_features(job, skills))
}

fn build_job_features(job: &JobRecord, listed_skills: BTreeSet<String>) -> JobFeatures {
    let (seniority, experience_range) =
        levels::experience_range_for_level(job.experience_level.as_deref());

    let (skills, skills_from_description) = if listed_skills.is_empty() {
        let mentioned = job
            .requirements
            .as_deref()
            .map(skills::skills_mentioned_in)
            .unwrap_or_default();
        let inferred = !mentioned.is_empty();
        (mentioned, inferred)
    } else {
        (listed_skills, false)
    };

    JobFeatures {
        job_id: job.id,
        organization_id: job.organization_id.clone(),
        vector: FeatureVector {
            skills,
            experience_years: experience_range.map(|r| r.min).unwrap_or(0.0),
            seniority,
            education: levels::required_education(job.requirements.as_deref()),
            location: location::bucket_location(job.location.as_deref()),
        },
        experience_range,
        skills_from_description,
    }
}

pub fn extract_candidate(candidate: &CandidateRecord) -> CandidateFeatures {
    let skills = candidate
        .skills
        .as_deref()
        .map(skills::parse_skill_text_lenient)
        .unwrap_or_default();
    build_candidate_features(candidate, skills)
}

pub fn try_extract_candidate(candidate: &CandidateRecord) -> ExtractionResult<CandidateFeatures> {
    let skills = match candidate.skills.as_deref() {
        Some(text) => {
            skills::parse_skill_text(text).map_err(|defect| ExtractionError::CorruptedField {
                kind: error::RecordKind::Candidate,
                id: candidate.id,
                field: "skills",
                reason: defect.to_string(),
            })?
        }
        None => BTreeSet::new(),
    };
    Ok(build_candidate_features(candidate, skills))
}

fn build_candidate_features(
    candidate: &CandidateRecord,
    skills: BTreeSet<String>,
) -> CandidateFeatures {
    let seniority = Seniority::parse(candidate.seniority.as_deref());

    let (experience_years, experience_inferred) = match &candidate.experience_years {
        Some(raw) => (levels::parse_experience(raw), false),
        None => match seniority.typical_years() {
            Some(years) => (years, true),
            None => (0.0, false),
        },
    };

    CandidateFeatures {
        candidate_id: candidate.id,
        name: candidate.name.clone(),
        email: candidate.email.clone(),
        vector: FeatureVector {
            skills,
            experience_years,
            seniority,
            education: levels::candidate_education(candidate.education.as_deref()),
            location: location::bucket_location(candidate.location.as_deref()),
        },
        values: candidate.values.filter(ValuesScores::is_valid),
        experience_inferred,
    }
}
