use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::model::Factor;

/// Relative importance of each scoring factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub values: f64,
}

impl FactorWeights {
    pub const DEFAULT: FactorWeights = FactorWeights {
        skills: 0.40,
        experience: 0.25,
        education: 0.10,
        location: 0.10,
        values: 0.15,
    };

    /// Weights used by the fallback scorer. Only skills and experience count.
    pub const FALLBACK: FactorWeights = FactorWeights {
        skills: 0.70,
        experience: 0.30,
        education: 0.0,
        location: 0.0,
        values: 0.0,
    };

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Skills => self.skills,
            Factor::Experience => self.experience,
            Factor::Education => self.education,
            Factor::Location => self.location,
            Factor::Values => self.values,
        }
    }

    pub fn set(&mut self, factor: Factor, weight: f64) {
        match factor {
            Factor::Skills => self.skills = weight,
            Factor::Experience => self.experience = weight,
            Factor::Education => self.education = weight,
            Factor::Location => self.location = weight,
            Factor::Values => self.values = weight,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|f| self.get(*f)).sum()
    }

    /// Every weight finite and non-negative, with a positive total.
    pub fn is_valid(&self) -> bool {
        Factor::ALL
            .iter()
            .all(|f| self.get(*f).is_finite() && self.get(*f) >= 0.0)
            && self.sum() > 0.0
    }

    pub fn is_normalized(&self) -> bool {
        self.is_valid() && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Scales the weights to sum to one. `None` when the weights are not [valid](Self::is_valid).
    pub fn normalized(&self) -> Option<FactorWeights> {
        if !self.is_valid() {
            return None;
        }
        let sum = self.sum();
        let mut out = *self;
        for factor in Factor::ALL {
            out.set(factor, self.get(factor) / sum);
        }
        Some(out)
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weight profile of one organization, or the global default when `organization_id` is `None`.
///
/// Profiles are immutable once published. The learning engine supersedes a profile by
/// publishing a copy with a higher `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub organization_id: Option<String>,
    /// 0 for defaults, incremented on every learned update.
    pub version: u64,
    pub weights: FactorWeights,
    /// Feedback records folded into this profile over its lifetime.
    #[serde(default)]
    pub feedback_applied: u64,
    /// Newest `recorded_at` among the feedback folded in.
    #[serde(default)]
    pub learned_through: Option<DateTime<Utc>>,
}

impl WeightProfile {
    pub fn global_default() -> Self {
        Self::with_weights(None, FactorWeights::DEFAULT)
    }

    /// Unlearned profile for an organization, seeded from `weights`.
    pub fn with_weights(organization_id: Option<String>, weights: FactorWeights) -> Self {
        Self {
            organization_id,
            version: 0,
            weights,
            feedback_applied: 0,
            learned_through: None,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.version > 0
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::global_default()
    }
}
