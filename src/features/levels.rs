//! Ordinal buckets: education tier, seniority and experience ranges.

use serde::{Deserialize, Serialize};

use crate::model::RawExperience;

/// Ordered education tiers. `Unknown` sorts lowest but is never compared ordinally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationTier {
    Unknown,
    HighSchool,
    Diploma,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationTier {
    /// Position on the ordinal scale (`None` for unknown).
    pub fn rank(&self) -> Option<u8> {
        match self {
            EducationTier::Unknown => None,
            EducationTier::HighSchool => Some(1),
            EducationTier::Diploma => Some(2),
            EducationTier::Bachelor => Some(3),
            EducationTier::Master => Some(4),
            EducationTier::Doctorate => Some(5),
        }
    }
}

const EDUCATION_KEYWORDS: &[(&str, EducationTier)] = &[
    ("phd", EducationTier::Doctorate),
    ("ph.d", EducationTier::Doctorate),
    ("doctorate", EducationTier::Doctorate),
    ("doctoral", EducationTier::Doctorate),
    ("master", EducationTier::Master),
    ("masters", EducationTier::Master),
    ("master's", EducationTier::Master),
    ("msc", EducationTier::Master),
    ("mba", EducationTier::Master),
    ("mtech", EducationTier::Master),
    ("m.tech", EducationTier::Master),
    ("bachelor", EducationTier::Bachelor),
    ("bachelors", EducationTier::Bachelor),
    ("bachelor's", EducationTier::Bachelor),
    ("bsc", EducationTier::Bachelor),
    ("btech", EducationTier::Bachelor),
    ("b.tech", EducationTier::Bachelor),
    ("degree", EducationTier::Bachelor),
    ("graduate", EducationTier::Bachelor),
    ("undergraduate", EducationTier::Bachelor),
    ("diploma", EducationTier::Diploma),
    ("12th", EducationTier::HighSchool),
    ("secondary", EducationTier::HighSchool),
    ("highschool", EducationTier::HighSchool),
];

fn education_mentions(text: &str) -> impl Iterator<Item = EducationTier> + '_ {
    let lowered = text.to_lowercase().replace("high school", "highschool");
    let words: Vec<String> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '.' || c == '\''))
        .map(|w| w.trim_matches(|c| c == '.' || c == '\'').to_string())
        .filter(|w| !w.is_empty())
        .collect();

    EDUCATION_KEYWORDS
        .iter()
        .filter(move |(keyword, _)| words.iter().any(|w| w == keyword))
        .map(|(_, tier)| *tier)
}

/// Highest tier a candidate's education text mentions.
pub fn candidate_education(raw: Option<&str>) -> EducationTier {
    raw.map(|text| {
        education_mentions(text)
            .max()
            .unwrap_or(EducationTier::Unknown)
    })
    .unwrap_or(EducationTier::Unknown)
}

/// Lowest tier a job's requirements mention ("Bachelor's or Master's" requires a Bachelor's).
pub fn required_education(raw: Option<&str>) -> EducationTier {
    raw.map(|text| {
        education_mentions(text)
            .min()
            .unwrap_or(EducationTier::Unknown)
    })
    .unwrap_or(EducationTier::Unknown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seniority {
    Unknown,
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Seniority::Unknown;
        };
        let lowered = raw.to_lowercase();
        let has = |needle: &str| lowered.contains(needle);

        if has("lead") || has("principal") || has("staff") || has("head") || has("architect") {
            Seniority::Lead
        } else if has("senior") || has("sr") {
            Seniority::Senior
        } else if has("mid") || has("intermediate") {
            Seniority::Mid
        } else if has("junior") || has("jr") || has("entry") || has("fresher") || has("graduate")
        {
            Seniority::Junior
        } else if has("intern") || has("trainee") {
            Seniority::Intern
        } else {
            Seniority::Unknown
        }
    }

    /// Typical years of experience for the tag, used when years are missing.
    pub fn typical_years(&self) -> Option<f64> {
        match self {
            Seniority::Unknown => None,
            Seniority::Intern => Some(0.0),
            Seniority::Junior => Some(1.0),
            Seniority::Mid => Some(3.0),
            Seniority::Senior => Some(6.0),
            Seniority::Lead => Some(9.0),
        }
    }

    /// Expected experience band for a job posted at this level.
    pub fn expected_range(&self) -> Option<ExperienceRange> {
        let (min, max) = match self {
            Seniority::Unknown => return None,
            Seniority::Intern | Seniority::Junior => (0.0, 2.0),
            Seniority::Mid => (2.0, 5.0),
            Seniority::Senior => (5.0, 10.0),
            Seniority::Lead => (8.0, 15.0),
        };
        Some(ExperienceRange { min, max })
    }
}

/// Inclusive band of years a job expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min: f64,
    pub max: f64,
}

impl ExperienceRange {
    pub fn contains(&self, years: f64) -> bool {
        years >= self.min && years <= self.max
    }
}

/// Parses a job's level tag: either a named level ("Mid") or a numeric band ("3-5 years", "5+").
pub fn experience_range_for_level(raw: Option<&str>) -> (Seniority, Option<ExperienceRange>) {
    let seniority = Seniority::parse(raw);
    let numbers: Vec<f64> = raw
        .map(|text| {
            text.split(|c: char| !(c.is_ascii_digit() || c == '.'))
                .filter_map(|n| n.parse::<f64>().ok())
                .filter(|n| n.is_finite() && *n >= 0.0)
                .collect()
        })
        .unwrap_or_default();

    let numeric = match numbers.as_slice() {
        [] => None,
        [min] => Some(ExperienceRange {
            min: *min,
            max: min + 5.0,
        }),
        [a, b, ..] => Some(ExperienceRange {
            min: a.min(*b),
            max: a.max(*b),
        }),
    };

    (seniority, numeric.or_else(|| seniority.expected_range()))
}

/// Interprets a raw experience value. Unparsable text ("fresher") is zero years.
pub fn parse_experience(raw: &RawExperience) -> f64 {
    match raw {
        RawExperience::Years(years) => (*years).max(0) as f64,
        RawExperience::Fractional(years) if years.is_finite() && *years >= 0.0 => *years,
        RawExperience::Fractional(_) => 0.0,
        RawExperience::Text(text) => text
            .trim()
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .find(|n| !n.is_empty())
            .and_then(|n| n.parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n >= 0.0)
            .unwrap_or(0.0),
    }
}
