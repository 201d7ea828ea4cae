//! Location bucketing: a normalized place name plus a broad region.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    NorthAmerica,
    LatinAmerica,
    Europe,
    MiddleEast,
    Africa,
    SouthAsia,
    EastAsia,
    Oceania,
    Unknown,
}

/// Place keyword → region. A keyword matches whole words inside a comma or dash separated part.
const REGION_KEYWORDS: &[(&str, Region)] = &[
    ("usa", Region::NorthAmerica),
    ("us", Region::NorthAmerica),
    ("united states", Region::NorthAmerica),
    ("canada", Region::NorthAmerica),
    ("new york", Region::NorthAmerica),
    ("san francisco", Region::NorthAmerica),
    ("seattle", Region::NorthAmerica),
    ("austin", Region::NorthAmerica),
    ("toronto", Region::NorthAmerica),
    ("vancouver", Region::NorthAmerica),
    ("mexico", Region::LatinAmerica),
    ("brazil", Region::LatinAmerica),
    ("sao paulo", Region::LatinAmerica),
    ("buenos aires", Region::LatinAmerica),
    ("uk", Region::Europe),
    ("united kingdom", Region::Europe),
    ("london", Region::Europe),
    ("germany", Region::Europe),
    ("berlin", Region::Europe),
    ("france", Region::Europe),
    ("paris", Region::Europe),
    ("amsterdam", Region::Europe),
    ("dublin", Region::Europe),
    ("uae", Region::MiddleEast),
    ("dubai", Region::MiddleEast),
    ("riyadh", Region::MiddleEast),
    ("nigeria", Region::Africa),
    ("lagos", Region::Africa),
    ("kenya", Region::Africa),
    ("nairobi", Region::Africa),
    ("india", Region::SouthAsia),
    ("bangalore", Region::SouthAsia),
    ("bengaluru", Region::SouthAsia),
    ("mumbai", Region::SouthAsia),
    ("delhi", Region::SouthAsia),
    ("hyderabad", Region::SouthAsia),
    ("pune", Region::SouthAsia),
    ("chennai", Region::SouthAsia),
    ("japan", Region::EastAsia),
    ("tokyo", Region::EastAsia),
    ("singapore", Region::EastAsia),
    ("china", Region::EastAsia),
    ("shanghai", Region::EastAsia),
    ("seoul", Region::EastAsia),
    ("australia", Region::Oceania),
    ("sydney", Region::Oceania),
    ("melbourne", Region::Oceania),
    ("new zealand", Region::Oceania),
];

const REMOTE_KEYWORDS: &[&str] = &["remote", "anywhere", "work from home", "wfh"];

/// Bucketed location of a job or candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationBucket {
    /// Matches any location.
    Remote,
    Place {
        /// Lower-cased first component, e.g. "bangalore" for "Bangalore, India".
        place: String,
        region: Region,
    },
    Unknown,
}

impl LocationBucket {
    pub fn region(&self) -> Region {
        match self {
            LocationBucket::Place { region, .. } => *region,
            LocationBucket::Remote | LocationBucket::Unknown => Region::Unknown,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, LocationBucket::Remote)
    }
}

/// Buckets free-form location text. Never fails: empty text maps to [`LocationBucket::Unknown`].
pub fn bucket_location(raw: Option<&str>) -> LocationBucket {
    let Some(raw) = raw else {
        return LocationBucket::Unknown;
    };
    let lowered = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if lowered.is_empty() {
        return LocationBucket::Unknown;
    }

    if REMOTE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return LocationBucket::Remote;
    }

    let parts: Vec<&str> = lowered
        .split(|c: char| c == ',' || c == '-' || c == '(' || c == ')')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let Some(place) = parts.first() else {
        return LocationBucket::Unknown;
    };

    let region = parts
        .iter()
        .rev()
        .find_map(|part| region_for(part))
        .unwrap_or(Region::Unknown);

    LocationBucket::Place {
        place: (*place).to_string(),
        region,
    }
}

fn region_for(part: &str) -> Option<Region> {
    let words: Vec<&str> = part.split_whitespace().collect();
    REGION_KEYWORDS
        .iter()
        .find(|(keyword, _)| {
            let needle: Vec<&str> = keyword.split_whitespace().collect();
            words.windows(needle.len()).any(|window| window == needle.as_slice())
        })
        .map(|(_, region)| *region)
}
