//! End-to-end ranking scenarios through the public API.

mod common;

use std::sync::Arc;

use hirematch::batch::{BatchConfig, BatchMatcher, SkipReason};
use hirematch::bias::BiasConfig;
use hirematch::config::EngineConfig;
use hirematch::constants::{GOOD_MATCH_THRESHOLD, STRONG_MATCH_THRESHOLD};
use hirematch::model::{MatchResult, RecommendationTier, SubScores};
use hirematch::preferences::PreferenceStore;
use hirematch::scoring::sort_ranked;
use hirematch::strategy::WeightedPipeline;

use common::fixtures::{
    CandidateBuilder, data_engineer_job, service_for, store_with, strong_candidate,
    weak_candidate,
};

#[tokio::test]
async fn test_full_coverage_candidate_is_strong_match() {
    let store = store_with(
        vec![data_engineer_job()],
        vec![strong_candidate(), weak_candidate()],
    );
    let service = service_for(&store, EngineConfig::default());

    let top = service.get_top_matches(1, 10).await.unwrap();
    let a = &top.matches[0];

    assert_eq!(a.candidate_id, 1);
    assert_eq!(a.sub_scores.skills, 100.0);
    assert!(a.total_score >= STRONG_MATCH_THRESHOLD);
    assert_eq!(a.recommendation, RecommendationTier::StrongMatch);
    assert_eq!(a.recommendation.as_str(), "Strong Match");
    assert_eq!(a.matched_skills, vec!["python".to_string(), "sql".to_string()]);
    assert_eq!(a.algorithm_version, "weighted-v2");
}

#[tokio::test]
async fn test_no_overlap_candidate_is_review() {
    let store = store_with(
        vec![data_engineer_job()],
        vec![strong_candidate(), weak_candidate()],
    );
    let service = service_for(&store, EngineConfig::default());

    let top = service.get_top_matches(1, 10).await.unwrap();
    let b = top.matches.iter().find(|m| m.candidate_id == 2).unwrap();

    assert_eq!(b.sub_scores.skills, 0.0);
    assert!(b.total_score < GOOD_MATCH_THRESHOLD);
    assert_eq!(b.recommendation, RecommendationTier::Review);
    assert!(b.matched_skills.is_empty());
}

#[tokio::test]
async fn test_equal_totals_break_ties_by_id() {
    let twin = |id| {
        CandidateBuilder::new(id)
            .skills("python")
            .years(3)
            .build()
    };
    let candidates = vec![twin(9), twin(4), twin(6)];

    let matcher = BatchMatcher::new(
        Arc::new(WeightedPipeline::new(BiasConfig::default())),
        Arc::new(PreferenceStore::new()),
        BatchConfig {
            chunk_size: 1,
            ..BatchConfig::default()
        },
    );
    let outcome = matcher.match_job(&data_engineer_job(), &candidates, 10).await;

    let ids: Vec<i64> = outcome.results.iter().map(|r| r.candidate_id).collect();
    assert_eq!(ids, vec![4, 6, 9]);
}

#[test]
fn test_tie_break_prefers_skills_then_experience() {
    let result = |id: i64, skills: f64, experience: f64| MatchResult {
        candidate_id: id,
        candidate_name: format!("Candidate {id}"),
        candidate_email: None,
        job_id: 1,
        total_score: 70.0,
        sub_scores: SubScores {
            skills,
            experience,
            ..SubScores::neutral()
        },
        matched_skills: Vec::new(),
        recommendation: RecommendationTier::from_score(70.0),
        algorithm_version: "weighted-v2".to_string(),
        processing_time_us: 0,
    };

    let mut results = vec![
        result(1, 60.0, 80.0),
        result(2, 80.0, 40.0),
        result(3, 60.0, 90.0),
        result(4, 80.0, 40.0),
    ];
    sort_ranked(&mut results);

    let ids: Vec<i64> = results.iter().map(|r| r.candidate_id).collect();
    assert_eq!(ids, vec![2, 4, 3, 1]);
}

#[tokio::test]
async fn test_corrupted_candidate_dropped_from_batch_of_fifty() {
    let candidates: Vec<_> = (1..=50)
        .map(|id| {
            let skills = if id == 37 {
                "[\"python\", \"sql\"".to_string()
            } else {
                "python, sql".to_string()
            };
            CandidateBuilder::new(id).skills(&skills).years(3).build()
        })
        .collect();
    let store = store_with(vec![data_engineer_job()], candidates);
    let service = service_for(&store, EngineConfig::default());

    let top = service.get_top_matches(1, 100).await.unwrap();

    assert_eq!(top.matches.len(), 49);
    assert!(top.matches.iter().all(|m| m.candidate_id != 37));
    assert_eq!(top.total_candidates_considered, 50);
    assert_eq!(top.skipped_candidates.len(), 1);
    assert_eq!(top.skipped_candidates[0].candidate_id, 37);
    assert!(matches!(
        top.skipped_candidates[0].reason,
        SkipReason::Extraction(_)
    ));
}
