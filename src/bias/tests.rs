use super::*;
use crate::features::{Background, EducationTier, Region};
use crate::model::SubScores;

fn raw(sub_scores: SubScores, total: f64) -> MatchResult {
    MatchResult {
        candidate_id: 1,
        candidate_name: "Asha".into(),
        candidate_email: None,
        job_id: 1,
        total_score: total,
        sub_scores,
        matched_skills: vec!["python".into()],
        recommendation: RecommendationTier::from_score(total),
        algorithm_version: "weighted-v2".into(),
        processing_time_us: 0,
    }
}

fn ctx(weights: FactorWeights) -> BiasContext {
    BiasContext {
        weights: weights.normalized().unwrap(),
        experience_inferred: false,
        diversity_score: None,
    }
}

fn scenario_one() -> SubScores {
    SubScores {
        skills: 100.0,
        experience: 100.0,
        education: 100.0,
        location: 50.0,
        values: 50.0,
    }
}

#[test]
fn test_within_ceilings_total_is_unchanged() {
    let mitigator = BiasMitigator::default();
    let adjusted = mitigator.adjust(raw(scenario_one(), 87.5), &ctx(FactorWeights::DEFAULT));

    assert_eq!(adjusted.total_score, 87.5);
    assert_eq!(adjusted.sub_scores, scenario_one());
    assert_eq!(adjusted.matched_skills, vec!["python"]);
}

#[test]
fn test_secondary_factor_swing_is_capped() {
    let values_heavy = FactorWeights {
        skills: 0.2,
        experience: 0.2,
        education: 0.0,
        location: 0.0,
        values: 0.6,
    };
    let sub_scores = SubScores {
        skills: 50.0,
        experience: 50.0,
        values: 100.0,
        ..SubScores::neutral()
    };
    // Uncapped: 10 + 10 + 60 = 80. Values swing of 30 is capped at 10.
    let adjusted = BiasMitigator::default().adjust(raw(sub_scores, 80.0), &ctx(values_heavy));

    assert_eq!(adjusted.total_score, 60.0);
    assert_eq!(adjusted.recommendation, RecommendationTier::GoodMatch);
}

#[test]
fn test_negative_secondary_swing_is_capped() {
    let location_heavy = FactorWeights {
        skills: 0.5,
        experience: 0.0,
        education: 0.0,
        location: 0.5,
        values: 0.0,
    };
    let sub_scores = SubScores {
        skills: 100.0,
        location: 0.0,
        ..SubScores::neutral()
    };
    let adjusted = BiasMitigator::default().adjust(raw(sub_scores, 50.0), &ctx(location_heavy));

    // 50 from skills, 25 baseline from location, swing -25 capped at -10.
    assert_eq!(adjusted.total_score, 65.0);
}

#[test]
fn test_inferred_experience_swing_is_capped() {
    let sub_scores = SubScores {
        experience: 100.0,
        ..SubScores::neutral()
    };
    let mitigator = BiasMitigator::default();

    let measured = mitigator.adjust(raw(sub_scores, 62.5), &ctx(FactorWeights::DEFAULT));
    assert_eq!(measured.total_score, 62.5);

    let mut inferred_ctx = ctx(FactorWeights::DEFAULT);
    inferred_ctx.experience_inferred = true;
    let inferred = mitigator.adjust(raw(sub_scores, 62.5), &inferred_ctx);
    assert_eq!(inferred.total_score, 55.0);
}

#[test]
fn test_diversity_contribution_is_bounded() {
    let mitigator = BiasMitigator::default();
    let mut context = ctx(FactorWeights::DEFAULT);

    context.diversity_score = Some(100.0);
    let favoured = mitigator.adjust(raw(scenario_one(), 87.5), &context);
    context.diversity_score = Some(0.0);
    let common = mitigator.adjust(raw(scenario_one(), 87.5), &context);

    assert!(favoured.total_score > common.total_score);
    assert!(favoured.total_score - common.total_score <= 100.0 * DEFAULT_DIVERSITY_WEIGHT + 0.1);
}

#[test]
fn test_diversity_weight_is_clamped() {
    let mitigator = BiasMitigator::new(BiasConfig {
        diversity_weight: 0.9,
        secondary_swing_ceiling: -3.0,
        seniority_swing_ceiling: f64::NAN,
    });
    assert_eq!(mitigator.config().diversity_weight, MAX_DIVERSITY_WEIGHT);
    assert_eq!(mitigator.config().secondary_swing_ceiling, 0.0);
    assert_eq!(mitigator.config().seniority_swing_ceiling, 0.0);
}

#[test]
fn test_adjust_is_deterministic() {
    let mitigator = BiasMitigator::default();
    let mut context = ctx(FactorWeights::DEFAULT);
    context.diversity_score = Some(73.0);

    let first = mitigator.adjust(raw(scenario_one(), 87.5), &context);
    let second = mitigator.adjust(raw(scenario_one(), 87.5), &context);
    assert_eq!(first, second);
}

#[test]
fn test_pool_diversity_rewards_rare_backgrounds() {
    let common = Background {
        region: Region::SouthAsia,
        education: EducationTier::Bachelor,
    };
    let rare = Background {
        region: Region::Europe,
        education: EducationTier::Master,
    };
    let unknown = Background {
        region: Region::Unknown,
        education: EducationTier::Unknown,
    };

    let pool = PoolComposition::from_backgrounds([common, common, common, rare, unknown]);
    assert_eq!(pool.len(), 5);
    assert_eq!(pool.count(&common), 3);
    assert!(pool.diversity_score(&rare) > pool.diversity_score(&common));
    assert_eq!(pool.diversity_score(&rare), 80.0);
    assert_eq!(pool.diversity_score(&unknown), 50.0);

    assert_eq!(PoolComposition::default().diversity_score(&rare), 50.0);
}
