//! Independent per-factor sub-scores, each on a 0–100 scale.

use std::collections::BTreeSet;

use crate::constants::{MAX_SCORE, NEUTRAL_SUB_SCORE, clamp_score};
use crate::features::{EducationTier, ExperienceRange, LocationBucket, Region};
use crate::model::ValuesScores;

/// Points lost per year beyond the top of the expected range.
pub const OVERQUALIFIED_PENALTY_PER_YEAR: f64 = 3.0;
/// Most an over-experienced candidate can lose.
pub const OVERQUALIFIED_PENALTY_CAP: f64 = 15.0;
/// Points lost per education tier below the requirement.
pub const EDUCATION_TIER_PENALTY: f64 = 35.0;
pub const SAME_REGION_SCORE: f64 = 60.0;
pub const DIFFERENT_REGION_SCORE: f64 = 20.0;

/// Share of the required skills the candidate covers, with the sorted matched list.
///
/// Extra candidate skills never lower the score. A job with no required skills scores neutral.
pub fn skills_score(required: &BTreeSet<String>, candidate: &BTreeSet<String>) -> (f64, Vec<String>) {
    if required.is_empty() {
        return (NEUTRAL_SUB_SCORE, Vec::new());
    }
    let matched: Vec<String> = required.intersection(candidate).cloned().collect();
    let score = matched.len() as f64 / required.len() as f64 * MAX_SCORE;
    (clamp_score(score), matched)
}

/// Closeness of `years` to the expected range.
///
/// Inside the range is full marks. Below it, credit grows linearly toward the minimum.
/// Above it, a small capped penalty applies so large excess neither inflates nor sinks the score.
pub fn experience_score(years: f64, range: Option<&ExperienceRange>) -> f64 {
    let Some(range) = range else {
        return MAX_SCORE;
    };
    if range.contains(years) {
        return MAX_SCORE;
    }
    if years < range.min {
        if range.min <= 0.0 {
            return MAX_SCORE;
        }
        return clamp_score(years.max(0.0) / range.min * MAX_SCORE);
    }
    let excess = years - range.max;
    clamp_score(MAX_SCORE - (excess * OVERQUALIFIED_PENALTY_PER_YEAR).min(OVERQUALIFIED_PENALTY_CAP))
}

pub fn education_score(candidate: EducationTier, required: EducationTier) -> f64 {
    let Some(required_rank) = required.rank() else {
        return MAX_SCORE;
    };
    let Some(candidate_rank) = candidate.rank() else {
        return NEUTRAL_SUB_SCORE;
    };
    if candidate_rank >= required_rank {
        MAX_SCORE
    } else {
        let gap = f64::from(required_rank - candidate_rank);
        clamp_score(MAX_SCORE - gap * EDUCATION_TIER_PENALTY)
    }
}

pub fn location_score(job: &LocationBucket, candidate: &LocationBucket) -> f64 {
    match (job, candidate) {
        (LocationBucket::Remote, _) | (_, LocationBucket::Remote) => MAX_SCORE,
        (LocationBucket::Unknown, _) | (_, LocationBucket::Unknown) => NEUTRAL_SUB_SCORE,
        (
            LocationBucket::Place {
                place: job_place,
                region: job_region,
            },
            LocationBucket::Place {
                place: candidate_place,
                region: candidate_region,
            },
        ) => {
            if job_place == candidate_place {
                MAX_SCORE
            } else if *job_region == Region::Unknown || *candidate_region == Region::Unknown {
                NEUTRAL_SUB_SCORE
            } else if job_region == candidate_region {
                SAME_REGION_SCORE
            } else {
                DIFFERENT_REGION_SCORE
            }
        }
    }
}

/// Average of the five values dimensions mapped from 1–5 onto 0–100; neutral when absent.
pub fn values_score(values: Option<&ValuesScores>) -> f64 {
    values
        .and_then(ValuesScores::average)
        .map(|avg| {
            let span = f64::from(ValuesScores::MAX - ValuesScores::MIN);
            clamp_score((avg - f64::from(ValuesScores::MIN)) / span * MAX_SCORE)
        })
        .unwrap_or(NEUTRAL_SUB_SCORE)
}
