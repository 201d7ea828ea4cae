//! `hirematch` entrypoint: ranks candidates for jobs read from a JSON records snapshot.
//!
//! Usage: `hirematch [JOB_ID...]`. With no ids, every job in the snapshot is ranked. Output is
//! a JSON array of top-match responses on stdout; logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hirematch::config::EngineConfig;
use hirematch::constants::FALLBACK_ALGORITHM_VERSION;
use hirematch::service::MatchService;
use hirematch::store::{InMemoryStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env()?;

    let records = match &config.snapshot_path {
        Some(path) => InMemoryStore::load_snapshot(path)
            .with_context(|| format!("loading records from {}", path.display()))?,
        None => {
            tracing::warn!("No HIREMATCH_SNAPSHOT_PATH configured, starting with an empty store");
            InMemoryStore::new()
        }
    };
    let records: Arc<dyn RecordStore> = Arc::new(records);

    let service = MatchService::from_config(&config, Arc::clone(&records));
    tracing::info!(
        algorithm_version = service.algorithm_version(),
        reason = service.strategy_reason(),
        "hirematch starting"
    );

    let summary = service.learning().run_once().await?;
    tracing::info!(
        organizations = summary.organizations_checked,
        published = summary.profiles_published,
        failures = summary.failures,
        "Learning pass complete"
    );

    if let Some(path) = &config.profiles_path
        && summary.profiles_published > 0
        && service.algorithm_version() != FALLBACK_ALGORITHM_VERSION
    {
        let saved = service
            .preferences()
            .save_snapshot(path)
            .with_context(|| format!("saving profiles to {}", path.display()))?;
        tracing::info!(path = %path.display(), profiles = saved, "Saved learned profiles");
    }

    let job_ids = parse_job_ids(std::env::args().skip(1))?;
    let job_ids = if job_ids.is_empty() {
        records.list_jobs().await?.iter().map(|job| job.id).collect()
    } else {
        job_ids
    };

    let responses = service.batch_match(&job_ids, config.default_limit).await?;
    println!("{}", serde_json::to_string_pretty(&responses)?);

    Ok(())
}

fn parse_job_ids(args: impl Iterator<Item = String>) -> anyhow::Result<Vec<i64>> {
    args.map(|arg| {
        arg.parse::<i64>()
            .with_context(|| format!("invalid job id '{}'", arg))
    })
    .collect()
}
