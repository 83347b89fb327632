pub mod config;
pub mod core;
pub mod providers;
pub mod source;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::path::Path;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::providers::FixerSource;
use crate::source::Source;

/// Builds the configured sources. Only fixer.io is wired up today.
pub fn build_sources(config: &AppConfig) -> Vec<Source> {
    vec![Source::new(FixerSource::from_config(
        &config.fixer,
        &config.base,
        &config.reference,
    ))]
}

/// Runs every source in its own task and waits for all of them.
///
/// The first failing source aborts the run; output of sources that have not
/// finished yet is discarded.
pub async fn run_sources(sources: Vec<Source>) -> Result<()> {
    debug!("Starting {} source(s)", sources.len());

    let tasks = sources
        .into_iter()
        .map(|source| tokio::spawn(async move { source.print_rate().await }))
        .map(|handle| async move { handle.await.context("Source task failed")? });

    try_join_all(tasks).await?;
    Ok(())
}

pub async fn run(config: &AppConfig) -> Result<()> {
    info!("Fetching {} rates for {}", config.base, config.reference);
    run_sources(build_sources(config)).await
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Loads the configuration, runs every source and maps the outcome to a
/// process exit status. Failures are reported as a single line on stderr.
pub async fn run_cli<P: AsRef<Path>>(env_file: P, base: &str, reference: &str) -> u8 {
    let result = match AppConfig::load(env_file, base, reference) {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Application failed");
            eprintln!("Error: {e:#}");
            EXIT_FAILURE
        }
    }
}
