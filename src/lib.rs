pub mod api;
pub mod cli;
pub mod history;
pub mod models;
pub mod settings;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use api::{ApiClient, ApiConfig, NewsClient, VerificationClient};
use history::{HistoryPersistence, HistoryStore};
use models::VerificationRecord;
use settings::PreferencesStore;
use storage::KeyValueStorage;
use validation::validate_input;

/// Everything a front-end needs, constructed once at start-up.
pub struct AppState {
    pub history: HistoryStore,
    pub verifier: VerificationClient,
    pub news: NewsClient,
    pub api: ApiClient,
    pub preferences: PreferencesStore,
}

impl AppState {
    /// Builds the clients and rehydrates history from `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: ApiConfig) -> Result<Self> {
        let api = ApiClient::new(config).context("failed to set up API client")?;

        let mut history = HistoryStore::new(HistoryPersistence::new(storage.clone()));
        history.initialize();

        Ok(Self {
            history,
            verifier: VerificationClient::new(api.clone()),
            news: NewsClient::new(api.clone()),
            api,
            preferences: PreferencesStore::new(storage),
        })
    }

    /// Validates `input`, verifies it and records the outcome in history.
    pub async fn verify_and_record(
        &mut self,
        input: &str,
        language: &str,
    ) -> Result<VerificationRecord> {
        let claim = validate_input(input)?;
        let result = self.verifier.verify_with_language(claim, language).await?;
        let record = VerificationRecord::new(claim, result);
        self.history.add(record.clone());
        Ok(record)
    }
}

pub async fn run() -> Result<()> {
    // RUST_LOG overrides the default level.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = cli::Cli::parse();
    let storage = args.open_storage();
    let mut state = AppState::new(storage, args.api_config())?;
    info!("HealthCheck ready with {} stored verification(s)", state.history.len());

    cli::execute(args.command, &mut state).await
}
