use serde::{Deserialize, Serialize};

use crate::constants::{GOOD_MATCH_THRESHOLD, NEUTRAL_SUB_SCORE, STRONG_MATCH_THRESHOLD};

/// Scoring factors, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Skills,
    Experience,
    Education,
    Location,
    Values,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Skills,
        Factor::Experience,
        Factor::Education,
        Factor::Location,
        Factor::Values,
    ];

    /// Factors whose influence the bias stage caps. Skills and experience are the primary signal.
    pub const SECONDARY: [Factor; 3] = [Factor::Education, Factor::Location, Factor::Values];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Skills => "skills",
            Factor::Experience => "experience",
            Factor::Education => "education",
            Factor::Location => "location",
            Factor::Values => "values",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-factor sub-scores, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub values: f64,
}

impl SubScores {
    /// All factors at the neutral midpoint.
    pub fn neutral() -> Self {
        Self {
            skills: NEUTRAL_SUB_SCORE,
            experience: NEUTRAL_SUB_SCORE,
            education: NEUTRAL_SUB_SCORE,
            location: NEUTRAL_SUB_SCORE,
            values: NEUTRAL_SUB_SCORE,
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Skills => self.skills,
            Factor::Experience => self.experience,
            Factor::Education => self.education,
            Factor::Location => self.location,
            Factor::Values => self.values,
        }
    }

    pub fn is_finite(&self) -> bool {
        Factor::ALL.iter().all(|f| self.get(*f).is_finite())
    }
}

impl Default for SubScores {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Human-readable bucket derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationTier {
    #[serde(rename = "Strong Match")]
    StrongMatch,
    #[serde(rename = "Good Match")]
    GoodMatch,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Fallback Match")]
    FallbackMatch,
}

impl RecommendationTier {
    /// Tier for a total produced by the full pipeline.
    pub fn from_score(total: f64) -> Self {
        if total >= STRONG_MATCH_THRESHOLD {
            RecommendationTier::StrongMatch
        } else if total >= GOOD_MATCH_THRESHOLD {
            RecommendationTier::GoodMatch
        } else {
            RecommendationTier::Review
        }
    }

    /// Tier for a total produced by the fallback scorer.
    pub fn from_fallback_score(total: f64) -> Self {
        match Self::from_score(total) {
            RecommendationTier::Review => RecommendationTier::FallbackMatch,
            other => other,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationTier::StrongMatch => "Strong Match",
            RecommendationTier::GoodMatch => "Good Match",
            RecommendationTier::Review => "Review",
            RecommendationTier::FallbackMatch => "Fallback Match",
        }
    }
}

impl std::fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scored (job, candidate) pair. Not mutated once handed to a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub job_id: i64,
    /// Weighted total in 0–100, rounded to one decimal.
    pub total_score: f64,
    pub sub_scores: SubScores,
    /// Required skills the candidate has, sorted.
    pub matched_skills: Vec<String>,
    pub recommendation: RecommendationTier,
    pub algorithm_version: String,
    /// Wall time spent extracting and scoring this pair; zero until stamped by the batch matcher.
    pub processing_time_us: u64,
}

impl MatchResult {
    pub fn is_fallback(&self) -> bool {
        self.algorithm_version == crate::constants::FALLBACK_ALGORITHM_VERSION
    }
}
