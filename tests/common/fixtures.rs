//! Test fixtures for integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hirematch::config::EngineConfig;
use hirematch::model::{
    CandidateRecord, FeedbackRecord, JobRecord, Outcome, RawExperience, ValuesScores,
};
use hirematch::service::MatchService;
use hirematch::store::InMemoryStore;

pub const DEFAULT_ORG: &str = "acme";

pub fn fixed_time(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
}

#[derive(Default)]
pub struct JobBuilder {
    id: i64,
    skills: Option<String>,
    level: Option<String>,
    location: Option<String>,
    requirements: Option<String>,
    organization_id: Option<String>,
}

impl JobBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn skills(mut self, skills: &str) -> Self {
        self.skills = Some(skills.to_string());
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn requirements(mut self, text: &str) -> Self {
        self.requirements = Some(text.to_string());
        self
    }

    pub fn organization(mut self, org: &str) -> Self {
        self.organization_id = Some(org.to_string());
        self
    }

    pub fn build(self) -> JobRecord {
        JobRecord {
            id: self.id,
            title: format!("Job {}", self.id),
            department: None,
            location: self.location,
            required_skills: self.skills,
            experience_level: self.level,
            requirements: self.requirements,
            organization_id: self
                .organization_id
                .unwrap_or_else(|| DEFAULT_ORG.to_string()),
            updated_at: None,
        }
    }
}

#[derive(Default)]
pub struct CandidateBuilder {
    id: i64,
    skills: Option<String>,
    years: Option<RawExperience>,
    seniority: Option<String>,
    education: Option<String>,
    location: Option<String>,
    values: Option<ValuesScores>,
}

impl CandidateBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn skills(mut self, skills: &str) -> Self {
        self.skills = Some(skills.to_string());
        self
    }

    pub fn years(mut self, years: i64) -> Self {
        self.years = Some(RawExperience::Years(years));
        self
    }

    pub fn seniority(mut self, seniority: &str) -> Self {
        self.seniority = Some(seniority.to_string());
        self
    }

    pub fn education(mut self, education: &str) -> Self {
        self.education = Some(education.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn values(mut self, score: i32) -> Self {
        self.values = Some(ValuesScores {
            collaboration: score,
            integrity: score,
            ownership: score,
            adaptability: score,
            growth: score,
        });
        self
    }

    pub fn build(self) -> CandidateRecord {
        CandidateRecord {
            id: self.id,
            name: format!("Candidate {}", self.id),
            email: Some(format!("candidate{}@example.com", self.id)),
            phone: None,
            location: self.location,
            experience_years: self.years,
            skills: self.skills,
            seniority: self.seniority,
            education: self.education,
            values: self.values,
            updated_at: None,
        }
    }
}

/// Job requiring python and sql at mid level.
pub fn data_engineer_job() -> JobRecord {
    JobBuilder::new(1)
        .skills(r#"["python","sql"]"#)
        .level("Mid")
        .build()
}

/// Candidate A: python, sql, aws with 4 years.
pub fn strong_candidate() -> CandidateRecord {
    CandidateBuilder::new(1)
        .skills(r#"["python","sql","aws"]"#)
        .years(4)
        .build()
}

/// Candidate B: java with no experience.
pub fn weak_candidate() -> CandidateRecord {
    CandidateBuilder::new(2).skills(r#"["java"]"#).years(0).build()
}

/// Deterministic pool of `n` candidates with varied skills, experience and backgrounds.
pub fn varied_pool(n: i64) -> Vec<CandidateRecord> {
    const SKILLS: [&str; 4] = ["python, sql", "python", "sql, aws", "java, spring"];
    const PLACES: [&str; 3] = ["Berlin", "Austin, TX", "Remote"];
    const EDUCATION: [&str; 3] = ["BSc Computer Science", "Master of Science", "High School"];

    (1..=n)
        .map(|id| {
            let i = id as usize;
            CandidateBuilder::new(id)
                .skills(SKILLS[i % SKILLS.len()])
                .years(id % 9)
                .location(PLACES[i % PLACES.len()])
                .education(EDUCATION[i % EDUCATION.len()])
                .build()
        })
        .collect()
}

pub fn feedback(candidate_id: i64, job_id: i64, outcome: Outcome, day: u32) -> FeedbackRecord {
    FeedbackRecord {
        candidate_id,
        job_id,
        organization_id: DEFAULT_ORG.to_string(),
        outcome,
        recorded_at: fixed_time(day),
    }
}

/// Store holding `jobs` and `candidates`.
pub fn store_with(jobs: Vec<JobRecord>, candidates: Vec<CandidateRecord>) -> InMemoryStore {
    let store = InMemoryStore::new();
    for job in jobs {
        store.upsert_job(job);
    }
    for candidate in candidates {
        store.upsert_candidate(candidate);
    }
    store
}

pub fn service_for(store: &InMemoryStore, config: EngineConfig) -> MatchService {
    MatchService::from_config(&config, Arc::new(store.clone()))
}
