//! BLAKE3 fingerprints for cache keys.
//!
//! A cached ranking is only valid while the job, every candidate in the set, the
//! organization's weight profile and the algorithm that produced it are unchanged. The
//! fingerprint folds all of those into one 32-byte digest.

use blake3::Hasher;
use chrono::{DateTime, Utc};

use crate::model::{CandidateRecord, JobRecord, RawExperience};

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Used for short log-friendly identifiers. Collisions only cost a spurious cache miss or a
/// confusing log line, never a wrong ranking: cache keys use the full 32-byte digest.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

fn update_str(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_opt_str(hasher: &mut Hasher, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            update_str(hasher, v);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn update_timestamp(hasher: &mut Hasher, value: Option<&DateTime<Utc>>) {
    match value {
        Some(ts) => {
            hasher.update(&[1]);
            hasher.update(&ts.timestamp_micros().to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

/// Digest of every candidate field that can change a score.
///
/// Contact fields other than name and email are left out: a phone number change does not
/// alter a ranking.
pub fn hash_candidate_content(candidate: &CandidateRecord) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&candidate.id.to_le_bytes());
    update_str(&mut hasher, &candidate.name);
    update_opt_str(&mut hasher, candidate.email.as_deref());
    update_opt_str(&mut hasher, candidate.location.as_deref());
    update_opt_str(&mut hasher, candidate.skills.as_deref());
    update_opt_str(&mut hasher, candidate.seniority.as_deref());
    update_opt_str(&mut hasher, candidate.education.as_deref());

    match &candidate.experience_years {
        None => {
            hasher.update(&[0]);
        }
        Some(RawExperience::Years(years)) => {
            hasher.update(&[1]);
            hasher.update(&years.to_le_bytes());
        }
        Some(RawExperience::Fractional(years)) => {
            hasher.update(&[2]);
            hasher.update(&years.to_bits().to_le_bytes());
        }
        Some(RawExperience::Text(text)) => {
            hasher.update(&[3]);
            update_str(&mut hasher, text);
        }
    }

    match &candidate.values {
        Some(values) => {
            hasher.update(&[1]);
            for dimension in values.as_array() {
                hasher.update(&dimension.to_le_bytes());
            }
        }
        None => {
            hasher.update(&[0]);
        }
    }

    update_timestamp(&mut hasher, candidate.updated_at.as_ref());
    *hasher.finalize().as_bytes()
}

/// Digest of every job field that can change a score.
pub fn hash_job_content(job: &JobRecord) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&job.id.to_le_bytes());
    update_opt_str(&mut hasher, job.location.as_deref());
    update_opt_str(&mut hasher, job.required_skills.as_deref());
    update_opt_str(&mut hasher, job.experience_level.as_deref());
    update_opt_str(&mut hasher, job.requirements.as_deref());
    update_str(&mut hasher, &job.organization_id);
    update_timestamp(&mut hasher, job.updated_at.as_ref());
    *hasher.finalize().as_bytes()
}

/// Fingerprint of a (job, candidate set) pair under a given profile version and algorithm.
///
/// Candidate order does not matter; duplicate ids are hashed once each time they appear.
pub fn candidate_set_fingerprint(
    job: &JobRecord,
    candidates: &[CandidateRecord],
    profile_version: u64,
    algorithm_version: &str,
) -> [u8; 32] {
    let mut members: Vec<(i64, [u8; 32])> = candidates
        .iter()
        .map(|c| (c.id, hash_candidate_content(c)))
        .collect();
    members.sort_unstable();

    let mut hasher = Hasher::new();
    hasher.update(&hash_job_content(job));
    hasher.update(&profile_version.to_le_bytes());
    update_str(&mut hasher, algorithm_version);
    hasher.update(&(members.len() as u64).to_le_bytes());
    for (id, digest) in &members {
        hasher.update(&id.to_le_bytes());
        hasher.update(digest);
    }
    *hasher.finalize().as_bytes()
}
