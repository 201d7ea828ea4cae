use super::*;

fn values(all: i32) -> ValuesScores {
    ValuesScores {
        collaboration: all,
        integrity: all,
        ownership: all,
        adaptability: all,
        growth: all,
    }
}

#[test]
fn test_values_average_and_validity() {
    assert_eq!(values(4).average(), Some(4.0));
    assert!(!values(0).is_valid());
    assert_eq!(values(6).average(), None);

    let mixed = ValuesScores {
        collaboration: 1,
        integrity: 2,
        ownership: 3,
        adaptability: 4,
        growth: 5,
    };
    assert_eq!(mixed.average(), Some(3.0));
}

#[test]
fn test_outcome_signal_direction() {
    assert_eq!(Outcome::Hired.signal().unwrap(), Some(1.0));
    assert_eq!(Outcome::NotHired.signal().unwrap(), Some(-1.0));
    assert_eq!(Outcome::InterviewAdvanced.signal().unwrap(), Some(0.5));
    assert_eq!(Outcome::InterviewRejected.signal().unwrap(), Some(-0.5));
}

#[test]
fn test_values_outcome_signal() {
    let high = Outcome::ValuesAssessment { scores: values(5) };
    let middling = Outcome::ValuesAssessment { scores: values(3) };
    let low = Outcome::ValuesAssessment { scores: values(1) };
    let broken = Outcome::ValuesAssessment { scores: values(9) };

    assert_eq!(high.signal().unwrap(), Some(0.5));
    assert_eq!(middling.signal().unwrap(), None);
    assert_eq!(low.signal().unwrap(), Some(-0.5));
    assert!(matches!(
        broken.signal(),
        Err(OutcomeError::ValuesOutOfRange { .. })
    ));
}

#[test]
fn test_tier_thresholds() {
    assert_eq!(
        RecommendationTier::from_score(75.0),
        RecommendationTier::StrongMatch
    );
    assert_eq!(
        RecommendationTier::from_score(74.9),
        RecommendationTier::GoodMatch
    );
    assert_eq!(
        RecommendationTier::from_score(54.9),
        RecommendationTier::Review
    );
    assert_eq!(
        RecommendationTier::from_fallback_score(20.0),
        RecommendationTier::FallbackMatch
    );
    assert_eq!(
        RecommendationTier::from_fallback_score(80.0),
        RecommendationTier::StrongMatch
    );
}

#[test]
fn test_tier_serializes_as_label() {
    let json = serde_json::to_string(&RecommendationTier::StrongMatch).unwrap();
    assert_eq!(json, "\"Strong Match\"");
    assert_eq!(RecommendationTier::FallbackMatch.to_string(), "Fallback Match");
}

#[test]
fn test_candidate_record_accepts_numeric_or_text_experience() {
    let numeric: CandidateRecord =
        serde_json::from_str(r#"{"id": 1, "name": "A", "experience_years": 4}"#).unwrap();
    assert_eq!(numeric.experience_years, Some(RawExperience::Years(4)));

    let text: CandidateRecord =
        serde_json::from_str(r#"{"id": 2, "name": "B", "experience_years": "fresher"}"#).unwrap();
    assert_eq!(
        text.experience_years,
        Some(RawExperience::Text("fresher".into()))
    );
    assert!(text.skills.is_none());
}

#[test]
fn test_feedback_outcome_tagged_serialization() {
    let json = r#"{
        "candidate_id": 3,
        "job_id": 9,
        "organization_id": "acme",
        "outcome": {"kind": "interview_advanced"},
        "recorded_at": "2026-01-05T10:00:00Z"
    }"#;
    let record: FeedbackRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.outcome, Outcome::InterviewAdvanced);
    assert_eq!(record.organization_id, "acme");
}
