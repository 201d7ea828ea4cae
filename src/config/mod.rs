//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `HIREMATCH_*` environment variables.
//! Knobs that carry an invariant (chunking, timeouts, diversity and learning rates) are parsed
//! strictly and reject malformed values; the remaining tuning knobs fall back to their default
//! when unparsable.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::batch::BatchConfig;
use crate::bias::{
    BiasConfig, DEFAULT_DIVERSITY_WEIGHT, DEFAULT_SECONDARY_SWING_CEILING,
    DEFAULT_SENIORITY_SWING_CEILING,
};
use crate::cache::ResultCache;
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_TIMEOUT_MS,
    DEFAULT_MAX_CONCURRENT_CHUNKS, DEFAULT_RESULT_LIMIT, MAX_DIVERSITY_WEIGHT,
};
use crate::preferences::{
    DEFAULT_LEARNING_INTERVAL_SECS, DEFAULT_LEARNING_MAX_DELTA, DEFAULT_LEARNING_RATE,
    LearningConfig,
};
use crate::strategy::StrategyMode;

/// Engine configuration loaded from environment variables.
///
/// Use [`EngineConfig::from_env`] to read `HIREMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Primary strategy selection. Default: `auto`.
    pub strategy: StrategyMode,

    /// Candidates per scoring chunk. Default: `25`.
    pub chunk_size: usize,

    /// Chunks scored at once across all requests. Default: `4`.
    pub max_concurrent_chunks: usize,

    /// Per-chunk timeout in milliseconds. Default: `5000`.
    pub chunk_timeout_ms: u64,

    /// Results returned when the caller gives no limit. Default: `10`.
    pub default_limit: usize,

    /// Result cache TTL in seconds. Default: `300`.
    pub cache_ttl_secs: u64,

    /// Max cached rankings; `0` disables the cache. Default: `1000`.
    pub cache_capacity: u64,

    /// JSON snapshot of learned weight profiles.
    pub profiles_path: Option<PathBuf>,

    /// JSON snapshot of jobs, candidates and feedback read by the binary.
    pub snapshot_path: Option<PathBuf>,

    /// Share of the total given to pool diversity. Default: `0.05`, at most `0.10`.
    pub diversity_weight: f64,

    pub secondary_swing_ceiling: f64,
    pub seniority_swing_ceiling: f64,

    pub learning_rate: f64,
    pub learning_max_delta: f64,

    /// Seconds between periodic learning passes. Default: `600`.
    pub learning_interval_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyMode::Auto,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: DEFAULT_MAX_CONCURRENT_CHUNKS,
            chunk_timeout_ms: DEFAULT_CHUNK_TIMEOUT_MS,
            default_limit: DEFAULT_RESULT_LIMIT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            profiles_path: None,
            snapshot_path: None,
            diversity_weight: DEFAULT_DIVERSITY_WEIGHT,
            secondary_swing_ceiling: DEFAULT_SECONDARY_SWING_CEILING,
            seniority_swing_ceiling: DEFAULT_SENIORITY_SWING_CEILING,
            learning_rate: DEFAULT_LEARNING_RATE,
            learning_max_delta: DEFAULT_LEARNING_MAX_DELTA,
            learning_interval_secs: DEFAULT_LEARNING_INTERVAL_SECS,
        }
    }
}

impl EngineConfig {
    const ENV_STRATEGY: &'static str = "HIREMATCH_STRATEGY";
    const ENV_CHUNK_SIZE: &'static str = "HIREMATCH_CHUNK_SIZE";
    const ENV_MAX_CONCURRENT_CHUNKS: &'static str = "HIREMATCH_MAX_CONCURRENT_CHUNKS";
    const ENV_CHUNK_TIMEOUT_MS: &'static str = "HIREMATCH_CHUNK_TIMEOUT_MS";
    const ENV_DEFAULT_LIMIT: &'static str = "HIREMATCH_DEFAULT_LIMIT";
    const ENV_CACHE_TTL_SECS: &'static str = "HIREMATCH_CACHE_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "HIREMATCH_CACHE_CAPACITY";
    const ENV_PROFILES_PATH: &'static str = "HIREMATCH_PROFILES_PATH";
    const ENV_SNAPSHOT_PATH: &'static str = "HIREMATCH_SNAPSHOT_PATH";
    const ENV_DIVERSITY_WEIGHT: &'static str = "HIREMATCH_DIVERSITY_WEIGHT";
    const ENV_SECONDARY_SWING_CEILING: &'static str = "HIREMATCH_SECONDARY_SWING_CEILING";
    const ENV_SENIORITY_SWING_CEILING: &'static str = "HIREMATCH_SENIORITY_SWING_CEILING";
    const ENV_LEARNING_RATE: &'static str = "HIREMATCH_LEARNING_RATE";
    const ENV_LEARNING_MAX_DELTA: &'static str = "HIREMATCH_LEARNING_MAX_DELTA";
    const ENV_LEARNING_INTERVAL_SECS: &'static str = "HIREMATCH_LEARNING_INTERVAL_SECS";

    /// Loads configuration from environment variables (falling back to defaults), then
    /// validates it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            strategy: Self::parse_strategy_from_env(defaults.strategy)?,
            chunk_size: Self::parse_strict_from_env(Self::ENV_CHUNK_SIZE, defaults.chunk_size)?,
            max_concurrent_chunks: Self::parse_strict_from_env(
                Self::ENV_MAX_CONCURRENT_CHUNKS,
                defaults.max_concurrent_chunks,
            )?,
            chunk_timeout_ms: Self::parse_strict_from_env(
                Self::ENV_CHUNK_TIMEOUT_MS,
                defaults.chunk_timeout_ms,
            )?,
            default_limit: Self::parse_lenient_from_env(
                Self::ENV_DEFAULT_LIMIT,
                defaults.default_limit,
            ),
            cache_ttl_secs: Self::parse_lenient_from_env(
                Self::ENV_CACHE_TTL_SECS,
                defaults.cache_ttl_secs,
            ),
            cache_capacity: Self::parse_lenient_from_env(
                Self::ENV_CACHE_CAPACITY,
                defaults.cache_capacity,
            ),
            profiles_path: Self::parse_optional_path_from_env(Self::ENV_PROFILES_PATH),
            snapshot_path: Self::parse_optional_path_from_env(Self::ENV_SNAPSHOT_PATH),
            diversity_weight: Self::parse_float_from_env(
                Self::ENV_DIVERSITY_WEIGHT,
                defaults.diversity_weight,
            )?,
            secondary_swing_ceiling: Self::parse_lenient_from_env(
                Self::ENV_SECONDARY_SWING_CEILING,
                defaults.secondary_swing_ceiling,
            ),
            seniority_swing_ceiling: Self::parse_lenient_from_env(
                Self::ENV_SENIORITY_SWING_CEILING,
                defaults.seniority_swing_ceiling,
            ),
            learning_rate: Self::parse_float_from_env(
                Self::ENV_LEARNING_RATE,
                defaults.learning_rate,
            )?,
            learning_max_delta: Self::parse_float_from_env(
                Self::ENV_LEARNING_MAX_DELTA,
                defaults.learning_max_delta,
            )?,
            learning_interval_secs: Self::parse_lenient_from_env(
                Self::ENV_LEARNING_INTERVAL_SECS,
                defaults.learning_interval_secs,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants and input paths (does not touch the filesystem beyond `stat`).
    ///
    /// A configured profiles snapshot may be missing: the full pipeline then starts from
    /// default weights and writes the file on its first save. The records snapshot must exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(Self::out_of_range(Self::ENV_CHUNK_SIZE, 0, "must be > 0"));
        }
        if self.max_concurrent_chunks == 0 {
            return Err(Self::out_of_range(
                Self::ENV_MAX_CONCURRENT_CHUNKS,
                0,
                "must be > 0",
            ));
        }
        if self.chunk_timeout_ms == 0 {
            return Err(Self::out_of_range(Self::ENV_CHUNK_TIMEOUT_MS, 0, "must be > 0"));
        }
        if !(0.0..=MAX_DIVERSITY_WEIGHT).contains(&self.diversity_weight) {
            return Err(Self::out_of_range(
                Self::ENV_DIVERSITY_WEIGHT,
                self.diversity_weight,
                "must be within [0, 0.10]",
            ));
        }
        for (name, ceiling) in [
            (Self::ENV_SECONDARY_SWING_CEILING, self.secondary_swing_ceiling),
            (Self::ENV_SENIORITY_SWING_CEILING, self.seniority_swing_ceiling),
        ] {
            if !ceiling.is_finite() || ceiling < 0.0 {
                return Err(Self::out_of_range(name, ceiling, "must be a finite value >= 0"));
            }
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Self::out_of_range(
                Self::ENV_LEARNING_RATE,
                self.learning_rate,
                "must be within (0, 1]",
            ));
        }
        if !(self.learning_max_delta > 0.0 && self.learning_max_delta <= 1.0) {
            return Err(Self::out_of_range(
                Self::ENV_LEARNING_MAX_DELTA,
                self.learning_max_delta,
                "must be within (0, 1]",
            ));
        }
        if self.learning_interval_secs == 0 {
            return Err(Self::out_of_range(
                Self::ENV_LEARNING_INTERVAL_SECS,
                0,
                "must be > 0",
            ));
        }

        if let Some(ref path) = self.profiles_path
            && path.exists()
            && !path.is_file()
        {
            return Err(ConfigError::NotAFile { path: path.clone() });
        }

        if let Some(ref path) = self.snapshot_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            chunk_size: self.chunk_size,
            max_concurrent_chunks: self.max_concurrent_chunks,
            chunk_timeout: Duration::from_millis(self.chunk_timeout_ms),
        }
    }

    pub fn bias_config(&self) -> BiasConfig {
        BiasConfig {
            diversity_weight: self.diversity_weight,
            secondary_swing_ceiling: self.secondary_swing_ceiling,
            seniority_swing_ceiling: self.seniority_swing_ceiling,
        }
    }

    pub fn learning_config(&self) -> LearningConfig {
        LearningConfig {
            learning_rate: self.learning_rate,
            max_delta: self.learning_max_delta,
            interval: Duration::from_secs(self.learning_interval_secs),
        }
    }

    pub fn result_cache(&self) -> ResultCache {
        ResultCache::new(
            Duration::from_secs(self.cache_ttl_secs),
            self.cache_capacity,
        )
    }

    fn out_of_range(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> ConfigError {
        ConfigError::OutOfRange {
            name,
            value: value.to_string(),
            reason,
        }
    }

    fn parse_strategy_from_env(default: StrategyMode) -> Result<StrategyMode, ConfigError> {
        match env::var(Self::ENV_STRATEGY) {
            Ok(value) => value
                .parse()
                .map_err(|reason| ConfigError::InvalidStrategy { value, reason }),
            Err(_) => Ok(default),
        }
    }

    fn parse_strict_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::IntParseError {
                    name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_float_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::FloatParseError {
                    name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(name: &str) -> Option<PathBuf> {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_lenient_from_env<T: FromStr>(name: &str, default: T) -> T {
        env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
