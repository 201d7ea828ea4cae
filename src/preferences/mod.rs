//! Per-organization weight profiles and the engine that learns them.
//!
//! [`PreferenceStore`] is the only place profiles live. It hands out immutable
//! `Arc<WeightProfile>` snapshots to scorers and accepts whole new versions from
//! [`LearningEngine`], which runs out of band against recorded hiring feedback.

pub mod error;
pub mod learning;
pub mod profile;
pub mod store;


pub use error::{LearningError, LearningResult};
pub use learning::{
    DEFAULT_LEARNING_INTERVAL_SECS, DEFAULT_LEARNING_MAX_DELTA, DEFAULT_LEARNING_RATE,
    LearningConfig, LearningEngine, LearningSummary, Observation, apply_observations,
    learning_signal,
};
pub use profile::{FactorWeights, WeightProfile};
pub use store::{PreferenceStore, ProfileSnapshot};
