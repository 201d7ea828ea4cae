use std::cmp::Ordering;

use tracing::trace;

use super::error::{ScoringError, ScoringResult};
use super::factors;
use crate::constants::{FULL_ALGORITHM_VERSION, clamp_score, round_score};
use crate::features::{CandidateFeatures, JobFeatures};
use crate::model::{Factor, MatchResult, RecommendationTier, SubScores};
use crate::preferences::{FactorWeights, WeightProfile};

/// Weighted multi-factor scorer. Stateless; safe to share across chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Every sub-score for a pair, plus the sorted list of matched required skills.
    pub fn sub_scores(
        &self,
        job: &JobFeatures,
        candidate: &CandidateFeatures,
    ) -> (SubScores, Vec<String>) {
        let (skills, matched_skills) =
            factors::skills_score(&job.vector.skills, &candidate.vector.skills);

        let sub_scores = SubScores {
            skills,
            experience: factors::experience_score(
                candidate.vector.experience_years,
                job.experience_range.as_ref(),
            ),
            education: factors::education_score(
                candidate.vector.education,
                job.vector.education,
            ),
            location: factors::location_score(&job.vector.location, &candidate.vector.location),
            values: factors::values_score(candidate.values.as_ref()),
        };
        (sub_scores, matched_skills)
    }

    /// Scores one pair before the bias stage.
    ///
    /// The total is the weighted sum of sub-scores with weights re-normalized to sum to one,
    /// rounded to one decimal. Identical inputs always produce an identical result.
    pub fn score(
        &self,
        job: &JobFeatures,
        candidate: &CandidateFeatures,
        profile: &WeightProfile,
    ) -> ScoringResult<MatchResult> {
        let weights = profile
            .weights
            .normalized()
            .ok_or_else(|| ScoringError::InvalidWeights {
                version: profile.version,
                reason: format!("{:?}", profile.weights),
            })?;

        let (sub_scores, matched_skills) = self.sub_scores(job, candidate);
        if !sub_scores.is_finite() {
            return Err(ScoringError::ComputationFailed {
                candidate_id: candidate.candidate_id,
                reason: format!("non-finite sub-scores {:?}", sub_scores),
            });
        }

        let total = round_score(weighted_total(&sub_scores, &weights));

        trace!(
            job_id = job.job_id,
            candidate_id = candidate.candidate_id,
            total,
            "Scored pair"
        );

        Ok(MatchResult {
            candidate_id: candidate.candidate_id,
            candidate_name: candidate.name.clone(),
            candidate_email: candidate.email.clone(),
            job_id: job.job_id,
            total_score: total,
            sub_scores,
            matched_skills,
            recommendation: RecommendationTier::from_score(total),
            algorithm_version: FULL_ALGORITHM_VERSION.to_string(),
            processing_time_us: 0,
        })
    }
}

/// Weighted sum of sub-scores. `weights` must already be normalized.
pub fn weighted_total(sub_scores: &SubScores, weights: &FactorWeights) -> f64 {
    let total = Factor::ALL
        .iter()
        .map(|f| sub_scores.get(*f) * weights.get(*f))
        .sum();
    clamp_score(total)
}

/// Ranking order: total descending, then skills, then experience, then candidate id ascending.
pub fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| b.sub_scores.skills.total_cmp(&a.sub_scores.skills))
        .then_with(|| b.sub_scores.experience.total_cmp(&a.sub_scores.experience))
        .then_with(|| a.candidate_id.cmp(&b.candidate_id))
}

/// Sorts results into ranking order in place.
pub fn sort_ranked(results: &mut [MatchResult]) {
    results.sort_by(rank_order);
}
