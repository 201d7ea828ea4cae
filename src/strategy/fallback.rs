use super::{MatchingStrategy, ScoringContext};
use crate::constants::{FALLBACK_ALGORITHM_VERSION, round_score};
use crate::features::{CandidateFeatures, JobFeatures};
use crate::model::{MatchResult, RecommendationTier, SubScores};
use crate::preferences::FactorWeights;
use crate::scoring::{ScoringResult, factors, weighted_total};

/// Dependency-free scorer: skills and experience only, with fixed weights.
///
/// Ignores the organization's profile and the candidate pool, so it can run whenever feature
/// extraction succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScorer;

impl FallbackScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores a pair. Never fails.
    pub fn score_pair(&self, job: &JobFeatures, candidate: &CandidateFeatures) -> MatchResult {
        let (skills, matched_skills) =
            factors::skills_score(&job.vector.skills, &candidate.vector.skills);
        let sub_scores = SubScores {
            skills,
            experience: factors::experience_score(
                candidate.vector.experience_years,
                job.experience_range.as_ref(),
            ),
            ..SubScores::neutral()
        };

        let total = round_score(weighted_total(&sub_scores, &FactorWeights::FALLBACK));

        MatchResult {
            candidate_id: candidate.candidate_id,
            candidate_name: candidate.name.clone(),
            candidate_email: candidate.email.clone(),
            job_id: job.job_id,
            total_score: total,
            sub_scores,
            matched_skills,
            recommendation: RecommendationTier::from_fallback_score(total),
            algorithm_version: FALLBACK_ALGORITHM_VERSION.to_string(),
            processing_time_us: 0,
        }
    }
}

impl MatchingStrategy for FallbackScorer {
    fn algorithm_version(&self) -> &'static str {
        FALLBACK_ALGORITHM_VERSION
    }

    fn score(
        &self,
        job: &JobFeatures,
        candidate: &CandidateFeatures,
        _ctx: &ScoringContext,
    ) -> ScoringResult<MatchResult> {
        Ok(self.score_pair(job, candidate))
    }
}
