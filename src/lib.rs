pub mod cli;
pub mod config;
pub mod core;
pub mod providers;
pub mod serve;

use crate::config::AppConfig;
use crate::core::cache::Cache;
use crate::providers::{FallbackProvider, LocalFileProvider, RemoteDatasetProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Remote-first provider with local-file fallback, as every surface uses it.
pub type AppProvider = FallbackProvider<RemoteDatasetProvider, LocalFileProvider>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Dashboard,
    Market,
    Tariffs,
    Taxes,
    Indicators,
}

pub fn build_provider(config: &AppConfig) -> AppProvider {
    let remote = RemoteDatasetProvider::new(config.service_url());
    let local = LocalFileProvider::new(config.data_dir());
    FallbackProvider::new(remote, local, Arc::new(Cache::new()))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Policy dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_provider(&config);

    match command {
        AppCommand::Dashboard => cli::dashboard::run(&provider, &config).await,
        AppCommand::Market => cli::market::run(&provider, &config).await,
        AppCommand::Tariffs => cli::tariffs::run(&provider).await,
        AppCommand::Taxes => cli::taxes::run(&provider).await,
        AppCommand::Indicators => cli::indicators::run(&provider).await,
    }
}
