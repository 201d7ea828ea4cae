use super::{MatchingStrategy, ScoringContext};
use crate::bias::{BiasConfig, BiasContext, BiasMitigator};
use crate::constants::FULL_ALGORITHM_VERSION;
use crate::features::{CandidateFeatures, JobFeatures};
use crate::model::MatchResult;
use crate::scoring::{ScoringEngine, ScoringError, ScoringResult};

/// Full pipeline: weighted scoring with the organization's profile, then bias mitigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedPipeline {
    engine: ScoringEngine,
    bias: BiasMitigator,
}

impl WeightedPipeline {
    pub fn new(bias: BiasConfig) -> Self {
        Self {
            engine: ScoringEngine::new(),
            bias: BiasMitigator::new(bias),
        }
    }

    pub fn bias(&self) -> &BiasMitigator {
        &self.bias
    }
}

impl MatchingStrategy for WeightedPipeline {
    fn algorithm_version(&self) -> &'static str {
        FULL_ALGORITHM_VERSION
    }

    fn score(
        &self,
        job: &JobFeatures,
        candidate: &CandidateFeatures,
        ctx: &ScoringContext,
    ) -> ScoringResult<MatchResult> {
        let raw = self.engine.score(job, candidate, &ctx.profile)?;

        let weights = ctx
            .profile
            .weights
            .normalized()
            .ok_or_else(|| ScoringError::InvalidWeights {
                version: ctx.profile.version,
                reason: format!("{:?}", ctx.profile.weights),
            })?;

        let bias_ctx = BiasContext {
            weights,
            experience_inferred: candidate.experience_inferred,
            diversity_score: Some(ctx.pool.diversity_score(&candidate.background())),
        };
        Ok(self.bias.adjust(raw, &bias_ctx))
    }
}
