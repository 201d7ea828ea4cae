//! Hirematch library crate (used by the `hirematch` binary and integration tests).
//!
//! Ranks candidates against job postings with per-organization learned weights.
//!
//! # Public API Surface
//!
//! ## Service
//! - [`MatchService`], [`TopMatches`], [`MatchError`] - `get_top_matches` / `batch_match`
//! - [`EngineConfig`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Pipeline
//! - [`extract_job`], [`extract_candidate`] and their strict `try_` forms - Feature extraction
//! - [`ScoringEngine`] - Five-factor weighted scoring
//! - [`BiasMitigator`] - Swing caps and pool diversity blend
//! - [`MatchingStrategy`], [`WeightedPipeline`], [`FallbackScorer`] - Strategy selection
//! - [`BatchMatcher`] - Chunked concurrent ranking
//! - [`ResultCache`] - Fingerprint-keyed ranking cache
//!
//! ## Learning
//! - [`PreferenceStore`], [`WeightProfile`], [`FactorWeights`] - Versioned weight profiles
//! - [`LearningEngine`] - Feedback-driven profile updates
//!
//! ## Data
//! - [`RecordStore`], [`InMemoryStore`] - Job, candidate and feedback access
//! - [`JobRecord`], [`CandidateRecord`], [`FeedbackRecord`], [`MatchResult`] - Record schemas

pub mod batch;
pub mod bias;
pub mod cache;
pub mod config;
pub mod constants;
pub mod features;
pub mod hashing;
pub mod model;
pub mod preferences;
pub mod scoring;
pub mod service;
pub mod store;
pub mod strategy;

pub use batch::{BatchConfig, BatchMatcher, BatchOutcome, SkipReason, SkippedCandidate};
pub use bias::{BiasConfig, BiasContext, BiasMitigator, PoolComposition};
pub use cache::{CacheStatus, CachedRanking, ResultCache};
pub use config::{ConfigError, EngineConfig};
pub use constants::{FALLBACK_ALGORITHM_VERSION, FULL_ALGORITHM_VERSION};
pub use features::{
    CandidateFeatures, ExtractionError, FeatureVector, JobFeatures, extract_candidate,
    extract_job, try_extract_candidate, try_extract_job,
};
pub use hashing::{candidate_set_fingerprint, hash_candidate_content, hash_job_content};
pub use model::{
    CandidateRecord, Factor, FeedbackRecord, JobRecord, MatchResult, Outcome, RawExperience,
    RecommendationTier, SubScores, ValuesScores,
};
pub use preferences::{
    FactorWeights, LearningConfig, LearningEngine, LearningError, LearningSummary,
    PreferenceStore, WeightProfile,
};
pub use scoring::{ScoringEngine, ScoringError};
pub use service::{MatchError, MatchService, ServiceResult, TopMatches};
pub use store::{InMemoryStore, RecordStore, StoreError, StoreSnapshot};
pub use strategy::{
    FallbackScorer, MatchingStrategy, ScoringContext, StrategyMode, StrategySelection,
    WeightedPipeline, select_strategy,
};
