use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ALL_VARS: [&str; 15] = [
    "HIREMATCH_STRATEGY",
    "HIREMATCH_CHUNK_SIZE",
    "HIREMATCH_MAX_CONCURRENT_CHUNKS",
    "HIREMATCH_CHUNK_TIMEOUT_MS",
    "HIREMATCH_DEFAULT_LIMIT",
    "HIREMATCH_CACHE_TTL_SECS",
    "HIREMATCH_CACHE_CAPACITY",
    "HIREMATCH_PROFILES_PATH",
    "HIREMATCH_SNAPSHOT_PATH",
    "HIREMATCH_DIVERSITY_WEIGHT",
    "HIREMATCH_SECONDARY_SWING_CEILING",
    "HIREMATCH_SENIORITY_SWING_CEILING",
    "HIREMATCH_LEARNING_RATE",
    "HIREMATCH_LEARNING_MAX_DELTA",
    "HIREMATCH_LEARNING_INTERVAL_SECS",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_hirematch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in ALL_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = EngineConfig::default();

    assert_eq!(config.strategy, StrategyMode::Auto);
    assert_eq!(config.chunk_size, 25);
    assert_eq!(config.max_concurrent_chunks, 4);
    assert_eq!(config.chunk_timeout_ms, 5_000);
    assert_eq!(config.default_limit, 10);
    assert_eq!(config.cache_ttl_secs, 300);
    assert_eq!(config.cache_capacity, 1_000);
    assert!(config.profiles_path.is_none());
    assert!(config.snapshot_path.is_none());
    assert_eq!(config.diversity_weight, 0.05);
    assert!(config.validate().is_ok());
}

#[test]
fn test_derived_configs() {
    let config = EngineConfig {
        chunk_size: 8,
        chunk_timeout_ms: 250,
        diversity_weight: 0.02,
        learning_interval_secs: 30,
        cache_capacity: 0,
        ..EngineConfig::default()
    };

    let batch = config.batch_config();
    assert_eq!(batch.chunk_size, 8);
    assert_eq!(batch.chunk_timeout, Duration::from_millis(250));
    assert_eq!(config.bias_config().diversity_weight, 0.02);
    assert_eq!(config.learning_config().interval, Duration::from_secs(30));
    assert!(!config.result_cache().is_enabled());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_hirematch_env();

    let config = EngineConfig::from_env().expect("should parse with defaults");
    assert_eq!(config, EngineConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_hirematch_env();

    let config = with_env_vars(
        &[
            ("HIREMATCH_STRATEGY", "Fallback"),
            ("HIREMATCH_CHUNK_SIZE", "50"),
            ("HIREMATCH_MAX_CONCURRENT_CHUNKS", " 2 "),
            ("HIREMATCH_DEFAULT_LIMIT", "25"),
            ("HIREMATCH_DIVERSITY_WEIGHT", "0.1"),
            ("HIREMATCH_LEARNING_RATE", "0.2"),
            ("HIREMATCH_PROFILES_PATH", "/nonexistent/profiles.json"),
        ],
        EngineConfig::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.strategy, StrategyMode::Fallback);
    assert_eq!(config.chunk_size, 50);
    assert_eq!(config.max_concurrent_chunks, 2);
    assert_eq!(config.default_limit, 25);
    assert_eq!(config.diversity_weight, 0.1);
    assert_eq!(config.learning_rate, 0.2);
    assert_eq!(
        config.profiles_path,
        Some(PathBuf::from("/nonexistent/profiles.json"))
    );
}

#[test]
#[serial]
fn test_invalid_strategy() {
    clear_hirematch_env();

    let result = with_env_vars(&[("HIREMATCH_STRATEGY", "fastest")], EngineConfig::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidStrategy { .. })));
}

#[test]
#[serial]
fn test_malformed_strict_knob_is_error() {
    clear_hirematch_env();

    let result = with_env_vars(&[("HIREMATCH_CHUNK_SIZE", "lots")], EngineConfig::from_env);
    assert!(matches!(
        result,
        Err(ConfigError::IntParseError {
            name: "HIREMATCH_CHUNK_SIZE",
            ..
        })
    ));

    let result = with_env_vars(
        &[("HIREMATCH_DIVERSITY_WEIGHT", "high")],
        EngineConfig::from_env,
    );
    assert!(matches!(result, Err(ConfigError::FloatParseError { .. })));
}

#[test]
#[serial]
fn test_zero_chunk_size_is_rejected() {
    clear_hirematch_env();

    let result = with_env_vars(&[("HIREMATCH_CHUNK_SIZE", "0")], EngineConfig::from_env);
    assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
}

#[test]
#[serial]
fn test_diversity_weight_above_ceiling_is_rejected() {
    clear_hirematch_env();

    let result = with_env_vars(
        &[("HIREMATCH_DIVERSITY_WEIGHT", "0.25")],
        EngineConfig::from_env,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("HIREMATCH_DIVERSITY_WEIGHT"));
}

#[test]
#[serial]
fn test_malformed_tuning_knob_falls_back() {
    clear_hirematch_env();

    let config = with_env_vars(
        &[
            ("HIREMATCH_CACHE_TTL_SECS", "soon"),
            ("HIREMATCH_DEFAULT_LIMIT", "-3"),
        ],
        EngineConfig::from_env,
    )
    .expect("tuning knobs are lenient");

    assert_eq!(config.cache_ttl_secs, 300);
    assert_eq!(config.default_limit, 10);
}

#[test]
fn test_validate_snapshot_path() {
    let dir = tempfile::tempdir().unwrap();

    let missing = EngineConfig {
        snapshot_path: Some(dir.path().join("records.json")),
        ..EngineConfig::default()
    };
    assert!(matches!(
        missing.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));

    let directory = EngineConfig {
        snapshot_path: Some(dir.path().to_path_buf()),
        ..EngineConfig::default()
    };
    assert!(matches!(
        directory.validate(),
        Err(ConfigError::NotAFile { .. })
    ));

    let file = dir.path().join("records.json");
    std::fs::write(&file, "{}").unwrap();
    let present = EngineConfig {
        snapshot_path: Some(file),
        ..EngineConfig::default()
    };
    assert!(present.validate().is_ok());
}

#[test]
fn test_validate_profiles_path_may_be_missing() {
    let dir = tempfile::tempdir().unwrap();

    let missing = EngineConfig {
        profiles_path: Some(dir.path().join("profiles.json")),
        ..EngineConfig::default()
    };
    assert!(missing.validate().is_ok());

    let directory = EngineConfig {
        profiles_path: Some(dir.path().to_path_buf()),
        ..EngineConfig::default()
    };
    assert!(matches!(
        directory.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_validate_learning_bounds() {
    let config = EngineConfig {
        learning_rate: 0.0,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());

    let config = EngineConfig {
        learning_max_delta: f64::NAN,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());

    let config = EngineConfig {
        secondary_swing_ceiling: -1.0,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());
}
