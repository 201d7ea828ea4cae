//! Matching strategies and their one-time selection.
//!
//! [`MatchingStrategy`] is the seam between the batch matcher and the scorer. Two
//! implementations exist:
//!
//! - [`WeightedPipeline`]: learned weights plus bias mitigation (`weighted-v2`).
//! - [`FallbackScorer`]: fixed skills/experience weights, no profile (`fallback-v1`).
//!
//! The primary strategy is chosen once by [`select_strategy`]. The fallback scorer is also
//! kept by the batch matcher for pairs the primary strategy fails on.

pub mod fallback;
pub mod full;


pub use fallback::FallbackScorer;
pub use full::WeightedPipeline;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bias::{BiasConfig, PoolComposition};
use crate::features::{CandidateFeatures, JobFeatures};
use crate::model::MatchResult;
use crate::preferences::{LearningError, PreferenceStore, WeightProfile};
use crate::scoring::ScoringResult;

/// Read-only inputs shared by every pair scored for one job.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub profile: Arc<WeightProfile>,
    pub pool: Arc<PoolComposition>,
}

impl ScoringContext {
    pub fn new(profile: Arc<WeightProfile>, pool: PoolComposition) -> Self {
        Self {
            profile,
            pool: Arc::new(pool),
        }
    }
}

/// Scores one extracted (job, candidate) pair.
pub trait MatchingStrategy: Send + Sync + std::fmt::Debug {
    /// Version tag stamped on every result this strategy produces.
    fn algorithm_version(&self) -> &'static str;

    fn score(
        &self,
        job: &JobFeatures,
        candidate: &CandidateFeatures,
        ctx: &ScoringContext,
    ) -> ScoringResult<MatchResult>;
}

/// How the primary strategy is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    /// Full pipeline unless its dependencies fail to load.
    #[default]
    Auto,
    Full,
    Fallback,
}

impl StrategyMode {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyMode::Auto => "auto",
            StrategyMode::Full => "full",
            StrategyMode::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StrategyMode::Auto),
            "full" => Ok(StrategyMode::Full),
            "fallback" => Ok(StrategyMode::Fallback),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// Outcome of [`select_strategy`].
#[derive(Debug, Clone)]
pub struct StrategySelection {
    pub strategy: Arc<dyn MatchingStrategy>,
    pub preferences: Arc<PreferenceStore>,
    /// Why this strategy was chosen, for logs and diagnostics.
    pub reason: String,
}

impl StrategySelection {
    pub fn is_fallback(&self) -> bool {
        self.strategy.algorithm_version() == FallbackScorer.algorithm_version()
    }
}

/// Picks the primary strategy once, probing the full pipeline's dependencies.
///
/// The full pipeline depends on the learned-profile snapshot when one is configured. A file
/// that does not exist yet is a fresh start with default weights. In `Auto` mode a snapshot
/// that exists but cannot be loaded switches the whole engine to the fallback scorer; in
/// `Full` mode it only costs the learned profiles.
pub fn select_strategy(
    mode: StrategyMode,
    profiles_path: Option<&Path>,
    bias: BiasConfig,
) -> StrategySelection {
    let full = |preferences: PreferenceStore, reason: String| StrategySelection {
        strategy: Arc::new(WeightedPipeline::new(bias)),
        preferences: Arc::new(preferences),
        reason,
    };
    let fallback = |reason: String| StrategySelection {
        strategy: Arc::new(FallbackScorer::new()),
        preferences: Arc::new(PreferenceStore::new()),
        reason,
    };

    let selection = match (mode, profiles_path) {
        (StrategyMode::Fallback, _) => fallback("fallback strategy configured".to_string()),
        (_, None) => full(
            PreferenceStore::new(),
            "no profile snapshot configured; using default weights".to_string(),
        ),
        (mode, Some(path)) => match PreferenceStore::load_snapshot(path) {
            Ok(preferences) => full(
                preferences,
                format!("loaded profile snapshot from {}", path.display()),
            ),
            Err(LearningError::SnapshotNotFound { .. }) => full(
                PreferenceStore::new(),
                format!(
                    "no profile snapshot at {} yet; using default weights",
                    path.display()
                ),
            ),
            Err(e) if mode == StrategyMode::Auto => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Profile snapshot unavailable; switching to fallback strategy"
                );
                fallback(format!("profile snapshot unavailable: {}", e))
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Profile snapshot unavailable; full strategy forced with default weights"
                );
                full(
                    PreferenceStore::new(),
                    format!("profile snapshot unavailable: {}", e),
                )
            }
        },
    };

    info!(
        mode = %mode,
        algorithm_version = selection.strategy.algorithm_version(),
        reason = %selection.reason,
        "Matching strategy selected"
    );
    selection
}
