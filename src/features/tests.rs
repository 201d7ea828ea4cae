use super::skills::{normalize_skill, parse_skill_text, parse_skill_text_lenient, skills_mentioned_in};
use super::*;
use crate::model::RawExperience;

fn job(required_skills: Option<&str>, level: Option<&str>) -> JobRecord {
    JobRecord {
        id: 10,
        title: "Backend Engineer".into(),
        location: Some("Bangalore, India".into()),
        required_skills: required_skills.map(str::to_string),
        experience_level: level.map(str::to_string),
        requirements: Some("Bachelor's or Master's degree in CS".into()),
        organization_id: "acme".into(),
        ..JobRecord::default()
    }
}

fn candidate(skills: Option<&str>) -> CandidateRecord {
    CandidateRecord {
        id: 7,
        name: "Asha".into(),
        email: Some("asha@example.com".into()),
        location: Some("Mumbai".into()),
        skills: skills.map(str::to_string),
        experience_years: Some(RawExperience::Years(4)),
        education: Some("B.Tech Computer Science".into()),
        ..CandidateRecord::default()
    }
}

#[test]
fn test_skill_aliases_canonicalize() {
    assert_eq!(normalize_skill("JS"), "javascript");
    assert_eq!(normalize_skill("  K8s "), "kubernetes");
    assert_eq!(normalize_skill("Postgres"), "postgresql");
    assert_eq!(normalize_skill("Node.js"), "nodejs");
    assert_eq!(normalize_skill("MyInternalTool"), "myinternaltool");
}

#[test]
fn test_skill_text_is_deduplicated_and_lowercased() {
    let skills = parse_skill_text("Python, python; SQL / AWS").unwrap();
    let expected: Vec<&str> = vec!["aws", "python", "sql"];
    assert_eq!(skills.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[test]
fn test_skill_text_json_array() {
    let skills = parse_skill_text(r#"["Python", "SQL", "aws"]"#).unwrap();
    assert_eq!(skills.len(), 3);
    assert!(skills.contains("sql"));
}

#[test]
fn test_malformed_json_array_is_corrupted() {
    assert!(parse_skill_text(r#"["python", "sql""#).is_err());
    assert!(parse_skill_text("python\u{0}sql").is_err());
    assert!(parse_skill_text("pyth\u{FFFD}on").is_err());
}

#[test]
fn test_lenient_parse_salvages_tokens() {
    let skills = parse_skill_text_lenient(r#"["python", "sql""#);
    assert!(skills.contains("python"));
    assert!(skills.contains("sql"));
}

#[test]
fn test_empty_skill_text_yields_empty_set() {
    assert!(parse_skill_text("").unwrap().is_empty());
    assert!(parse_skill_text(" , ; ").unwrap().is_empty());

    let features = extract_candidate(&candidate(None));
    assert!(features.vector.skills.is_empty());
}

#[test]
fn test_skills_spotted_in_prose() {
    let found = skills_mentioned_in("We use Python and PostgreSQL on AWS; Kubernetes a plus.");
    assert!(found.contains("python"));
    assert!(found.contains("postgresql"));
    assert!(found.contains("aws"));
    assert!(found.contains("kubernetes"));
    assert!(!found.contains("go"));
}

#[test]
fn test_job_without_listed_skills_uses_description() {
    let mut record = job(None, Some("Mid"));
    record.requirements = Some("Strong Python and SQL skills".into());
    let features = extract_job(&record);
    assert!(features.skills_from_description);
    assert!(features.vector.skills.contains("python"));
    assert!(features.vector.skills.contains("sql"));
}

#[test]
fn test_experience_defaults() {
    assert_eq!(levels::parse_experience(&RawExperience::Years(5)), 5.0);
    assert_eq!(levels::parse_experience(&RawExperience::Years(-2)), 0.0);
    assert_eq!(
        levels::parse_experience(&RawExperience::Text("fresher".into())),
        0.0
    );
    assert_eq!(
        levels::parse_experience(&RawExperience::Text("3+ years".into())),
        3.0
    );
    assert_eq!(
        levels::parse_experience(&RawExperience::Fractional(f64::NAN)),
        0.0
    );
}

#[test]
fn test_missing_experience_inferred_from_seniority() {
    let mut record = candidate(Some("rust"));
    record.experience_years = None;
    record.seniority = Some("Senior Engineer".into());

    let features = extract_candidate(&record);
    assert!(features.experience_inferred);
    assert_eq!(features.vector.experience_years, 6.0);

    record.seniority = None;
    let features = extract_candidate(&record);
    assert!(!features.experience_inferred);
    assert_eq!(features.vector.experience_years, 0.0);
}

#[test]
fn test_job_level_ranges() {
    let (seniority, range) = levels::experience_range_for_level(Some("Mid"));
    assert_eq!(seniority, Seniority::Mid);
    assert_eq!(range, Some(ExperienceRange { min: 2.0, max: 5.0 }));

    let (_, range) = levels::experience_range_for_level(Some("3-6 years"));
    assert_eq!(range, Some(ExperienceRange { min: 3.0, max: 6.0 }));

    let (_, range) = levels::experience_range_for_level(Some("5+"));
    assert_eq!(range, Some(ExperienceRange { min: 5.0, max: 10.0 }));

    let (seniority, range) = levels::experience_range_for_level(None);
    assert_eq!(seniority, Seniority::Unknown);
    assert!(range.is_none());
}

#[test]
fn test_education_tiers() {
    assert_eq!(
        levels::candidate_education(Some("MSc Data Science, BSc Physics")),
        EducationTier::Master
    );
    assert_eq!(
        levels::required_education(Some("Bachelor's or Master's degree")),
        EducationTier::Bachelor
    );
    assert_eq!(
        levels::candidate_education(Some("High School")),
        EducationTier::HighSchool
    );
    assert_eq!(
        levels::candidate_education(Some("self taught")),
        EducationTier::Unknown
    );
    assert_eq!(levels::candidate_education(None), EducationTier::Unknown);
}

#[test]
fn test_location_buckets() {
    assert_eq!(location::bucket_location(Some("Remote")), LocationBucket::Remote);
    assert_eq!(location::bucket_location(Some("  ")), LocationBucket::Unknown);
    assert_eq!(location::bucket_location(None), LocationBucket::Unknown);

    let bucket = location::bucket_location(Some("Bangalore, India"));
    assert_eq!(
        bucket,
        LocationBucket::Place {
            place: "bangalore".into(),
            region: Region::SouthAsia
        }
    );

    let spaced = location::bucket_location(Some("Bangalore India"));
    assert_eq!(spaced.region(), Region::SouthAsia);
    let city = location::bucket_location(Some("New York City"));
    assert_eq!(city.region(), Region::NorthAmerica);
    let substring = location::bucket_location(Some("Pauslo"));
    assert_eq!(substring.region(), Region::Unknown);

    let unknown_region = location::bucket_location(Some("Springfield"));
    assert_eq!(unknown_region.region(), Region::Unknown);
}

#[test]
fn test_strict_extraction_rejects_corrupted_candidate() {
    let corrupted = candidate(Some(r#"["python", "#));
    let err = try_extract_candidate(&corrupted).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::CorruptedField {
            field: "skills",
            id: 7,
            ..
        }
    ));

    let lenient = extract_candidate(&corrupted);
    assert!(lenient.vector.skills.contains("python"));
}

#[test]
fn test_strict_and_lenient_agree_on_clean_input() {
    let record = candidate(Some("Python, SQL"));
    assert_eq!(try_extract_candidate(&record).unwrap(), extract_candidate(&record));

    let posting = job(Some("python, sql"), Some("Mid"));
    assert_eq!(try_extract_job(&posting).unwrap(), extract_job(&posting));
}

#[test]
fn test_out_of_range_values_are_dropped() {
    let mut record = candidate(Some("python"));
    record.values = Some(crate::model::ValuesScores {
        collaboration: 5,
        integrity: 5,
        ownership: 7,
        adaptability: 5,
        growth: 5,
    });
    assert!(extract_candidate(&record).values.is_none());
}

#[test]
fn test_background_matches_extracted_features() {
    let record = candidate(Some("python"));
    assert_eq!(background_of(&record), extract_candidate(&record).background());
}
