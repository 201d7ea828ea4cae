//! Post-scoring bias mitigation.
//!
//! Two deterministic adjustments run on every full-pipeline result:
//!
//! - **Swing caps.** A secondary factor (education, location, values) moves the total by
//!   `weight * (sub_score - 50)` points. That swing is clamped to
//!   [`BiasConfig::secondary_swing_ceiling`]. When experience years were inferred from a
//!   seniority label alone, the experience swing is clamped to
//!   [`BiasConfig::seniority_swing_ceiling`].
//! - **Diversity blend.** `total = (1 - d) * total + d * diversity`, where `diversity` rewards
//!   backgrounds that are rare in the current candidate pool and `d` never exceeds
//!   [`MAX_DIVERSITY_WEIGHT`].
//!
//! Sub-scores are reported unchanged; only the total and the tier move.

pub mod pool;

#[cfg(test)]
mod tests;

pub use pool::PoolComposition;

use crate::constants::{MAX_DIVERSITY_WEIGHT, NEUTRAL_SUB_SCORE, clamp_score, round_score};
use crate::model::{Factor, MatchResult, RecommendationTier};
use crate::preferences::FactorWeights;

pub const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.05;
pub const DEFAULT_SECONDARY_SWING_CEILING: f64 = 10.0;
pub const DEFAULT_SENIORITY_SWING_CEILING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasConfig {
    /// Share of the total given to the diversity factor, in `[0, MAX_DIVERSITY_WEIGHT]`.
    pub diversity_weight: f64,
    /// Largest number of points a secondary factor may move the total.
    pub secondary_swing_ceiling: f64,
    /// Largest number of points seniority-inferred experience may move the total.
    pub seniority_swing_ceiling: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            diversity_weight: DEFAULT_DIVERSITY_WEIGHT,
            secondary_swing_ceiling: DEFAULT_SECONDARY_SWING_CEILING,
            seniority_swing_ceiling: DEFAULT_SENIORITY_SWING_CEILING,
        }
    }
}

/// Per-pair inputs to [`BiasMitigator::adjust`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasContext {
    /// Normalized weights the raw result was scored with.
    pub weights: FactorWeights,
    pub experience_inferred: bool,
    /// Pool-relative diversity score in 0–100, `None` to skip the blend.
    pub diversity_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasMitigator {
    config: BiasConfig,
}

impl Default for BiasMitigator {
    fn default() -> Self {
        Self::new(BiasConfig::default())
    }
}

impl BiasMitigator {
    /// Creates a mitigator. Out-of-range settings are clamped into their valid ranges.
    pub fn new(config: BiasConfig) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            config: BiasConfig {
                diversity_weight: sanitize(config.diversity_weight).min(MAX_DIVERSITY_WEIGHT),
                secondary_swing_ceiling: sanitize(config.secondary_swing_ceiling),
                seniority_swing_ceiling: sanitize(config.seniority_swing_ceiling),
            },
        }
    }

    pub fn config(&self) -> &BiasConfig {
        &self.config
    }

    fn swing_ceiling(&self, factor: Factor, ctx: &BiasContext) -> f64 {
        match factor {
            Factor::Education | Factor::Location | Factor::Values => {
                self.config.secondary_swing_ceiling
            }
            Factor::Experience if ctx.experience_inferred => self.config.seniority_swing_ceiling,
            Factor::Skills | Factor::Experience => f64::INFINITY,
        }
    }

    /// Capped weighted total before the diversity blend.
    pub fn capped_total(&self, raw: &MatchResult, ctx: &BiasContext) -> f64 {
        let total: f64 = Factor::ALL
            .iter()
            .map(|factor| {
                let weight = ctx.weights.get(*factor);
                let ceiling = self.swing_ceiling(*factor, ctx);
                let swing = weight * (raw.sub_scores.get(*factor) - NEUTRAL_SUB_SCORE);
                weight * NEUTRAL_SUB_SCORE + swing.clamp(-ceiling, ceiling)
            })
            .sum();
        clamp_score(total)
    }

    /// Applies swing caps and the diversity blend, then re-derives the tier.
    pub fn adjust(&self, raw: MatchResult, ctx: &BiasContext) -> MatchResult {
        let capped = self.capped_total(&raw, ctx);

        let blended = match ctx.diversity_score {
            Some(diversity) if self.config.diversity_weight > 0.0 => {
                let d = self.config.diversity_weight;
                (1.0 - d) * capped + d * clamp_score(diversity)
            }
            _ => capped,
        };

        let total_score = round_score(clamp_score(blended));
        MatchResult {
            total_score,
            recommendation: RecommendationTier::from_score(total_score),
            ..raw
        }
    }
}
