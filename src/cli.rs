use std::{env, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use crate::{
    api::{ApiConfig, DEFAULT_LANGUAGE},
    history::HistoryStore,
    models::{NewsArticle, NewsSource, Verdict, VerificationRecord},
    settings::Theme,
    storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, SqliteStorage},
    validation::{is_supported_language, looks_like_url},
    AppState,
};

const DEFAULT_DATA_DIR: &str = ".healthcheck";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Json,
    Sqlite,
}

#[derive(Parser, Debug)]
#[command(version, about = "Verify health claims and keep a local history", long_about = None)]
pub struct Cli {
    /// Base URL of the verification backend (overrides HEALTHCHECK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for local history (overrides HEALTHCHECK_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = StorageKind::Json)]
    pub storage: StorageKind,

    /// Skip the simulated delay on offline answers
    #[arg(long, global = true)]
    pub no_latency: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a claim or article URL and store the result
    Verify {
        input: String,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Inspect or edit past verifications
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Show trusted health news
    News {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "all")]
        source: NewsSource,
    },
    /// Check whether the backend is reachable
    Health,
    /// Translate text through the backend
    Translate {
        text: String,
        #[arg(long, default_value = "en")]
        to: String,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        from: String,
    },
    /// Fetch the readable text of an article
    Extract { url: String },
    /// Show or change the preferred theme
    Theme { theme: Option<Theme> },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        verdict: Option<Verdict>,
    },
    Show { id: String },
    Remove { id: String },
    Clear,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| env::var_os("HEALTHCHECK_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Opens the configured storage medium. When it cannot be opened, history
    /// is kept in memory for this session only.
    pub fn open_storage(&self) -> Arc<dyn KeyValueStorage> {
        match self.try_open_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn!("{err:#}; history will not be saved this session");
                Arc::new(MemoryStorage::new())
            }
        }
    }

    fn try_open_storage(&self) -> Result<Arc<dyn KeyValueStorage>> {
        let dir = self.data_dir();
        let storage: Arc<dyn KeyValueStorage> = match self.storage {
            StorageKind::Json => {
                let path = dir.join("storage.json");
                let storage = JsonFileStorage::open(&path).with_context(|| {
                    format!("failed to open storage file {}", path.display())
                })?;
                info!("Using storage file {}", storage.path().display());
                Arc::new(storage)
            }
            StorageKind::Sqlite => {
                let path = dir.join("healthcheck.sqlite3");
                Arc::new(SqliteStorage::open(&path).with_context(|| {
                    format!("failed to open storage database {}", path.display())
                })?)
            }
        };
        Ok(storage)
    }

    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if self.no_latency {
            config = config.without_latency();
        }
        config
    }
}

pub async fn execute(command: Command, state: &mut AppState) -> Result<()> {
    match command {
        Command::Verify { input, language } => {
            if !is_supported_language(&language) {
                bail!("unsupported language code '{language}'");
            }
            let record = state.verify_and_record(&input, &language).await?;
            print_record(&record);
        }
        Command::History { action } => run_history(action, state)?,
        Command::News { limit, source } => {
            let articles = state.news.fetch_news_from(source, limit).await;
            if articles.is_empty() {
                println!("No news available.");
            }
            for article in &articles {
                print_article(article);
            }
        }
        Command::Health => match state.api.health().await {
            Ok(status) => println!(
                "Backend {} (version {})",
                status.status,
                status.version.as_deref().unwrap_or("unknown")
            ),
            Err(err) if err.is_connectivity() => println!("Backend offline: {err}"),
            Err(err) => return Err(err.into()),
        },
        Command::Translate { text, to, from } => {
            let translation = state.api.translate(&text, &to, &from).await?;
            println!("{}", translation.translated_text);
        }
        Command::Extract { url } => {
            if !looks_like_url(&url) {
                bail!("'{url}' is not an http(s) URL");
            }
            let article = state.api.extract(&url).await?;
            println!("{}", article.text);
        }
        Command::Theme { theme } => {
            if let Some(theme) = theme {
                state.preferences.set_theme(theme);
            }
            println!("{}", state.preferences.theme());
        }
    }
    Ok(())
}

fn run_history(action: HistoryCommand, state: &mut AppState) -> Result<()> {
    match action {
        HistoryCommand::List { search, verdict } => {
            for line in history_listing(&state.history, search.as_deref(), verdict) {
                println!("{line}");
            }
        }
        HistoryCommand::Show { id } => match state.history.get(&id) {
            Some(record) => print_record(record),
            None => bail!("no verification with id '{id}'"),
        },
        HistoryCommand::Remove { id } => {
            state.history.remove(&id);
            println!("Removed {id}");
        }
        HistoryCommand::Clear => {
            state.history.clear();
            println!("History cleared");
        }
    }
    Ok(())
}

fn history_listing(
    history: &HistoryStore,
    search: Option<&str>,
    verdict: Option<Verdict>,
) -> Vec<String> {
    let records: Vec<&VerificationRecord> = match search {
        Some(query) => history.search(query).collect(),
        None => history.iter().collect(),
    };
    let lines: Vec<String> = records
        .into_iter()
        .filter(|record| verdict.map_or(true, |v| record.result().verdict == v))
        .map(|record| {
            format!(
                "{}  {}  {:<12} {:>5.1}%  {}",
                record.id(),
                record.timestamp().format("%Y-%m-%d %H:%M"),
                record.result().verdict,
                record.result().confidence,
                record.input()
            )
        })
        .collect();

    if !lines.is_empty() {
        lines
    } else if history.is_empty() {
        vec!["No verifications yet.".to_string()]
    } else {
        vec!["No matching verifications.".to_string()]
    }
}

fn print_record(record: &VerificationRecord) {
    let result = record.result();
    println!("Claim:      {}", record.input());
    println!("Verdict:    {} ({:.0}% confidence)", result.verdict, result.confidence);
    if let Some(model) = &result.model {
        println!("Model:      {model}");
    }
    if let Some(time) = &result.processing_time {
        println!("Took:       {time}");
    }
    println!("\n{}\n", result.explanation);
    for citation in &result.citations {
        println!("  - {} ({}) {}", citation.title, citation.source, citation.url);
    }
    println!("\nSaved as {}", record.id());
}

fn print_article(article: &NewsArticle) {
    println!("[{}] {}", article.source, article.title);
    println!("    {}", article.summary);
    println!("    {}  {}", article.published_at, article.url);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Utc;

    use super::*;
    use crate::{history::HistoryPersistence, models::VerificationResult};

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["healthcheck"].iter().chain(args))
    }

    fn record(id: &str, input: &str, verdict: Verdict) -> VerificationRecord {
        let result = VerificationResult {
            verdict,
            confidence: 80.0,
            explanation: "...".to_string(),
            citations: Vec::new(),
            language: None,
            model: None,
            processing_time: None,
            timestamp: None,
        };
        VerificationRecord::with_id(id, input, result, Utc::now())
    }

    fn usable_state(storage: Arc<dyn KeyValueStorage>) -> AppState {
        let config = ApiConfig::new("http://127.0.0.1:9").without_latency();
        let mut state = AppState::new(storage.clone(), config).unwrap();
        state.history.add(record("1", "claim A", Verdict::True));
        assert_eq!(state.history.len(), 1);
        assert_eq!(HistoryPersistence::new(storage).load().len(), 1);
        state
    }

    #[test]
    fn junk_sqlite_file_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let junk = "this is not a database\n".repeat(400);
        fs::write(dir.path().join("healthcheck.sqlite3"), &junk).unwrap();
        let data_dir = dir.path().to_str().unwrap();

        let args = cli(&["--storage", "sqlite", "--data-dir", data_dir, "history", "list"]);
        usable_state(args.open_storage());

        let untouched = fs::read_to_string(dir.path().join("healthcheck.sqlite3")).unwrap();
        assert_eq!(untouched, junk);
    }

    #[test]
    fn data_dir_that_cannot_be_created_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a regular file").unwrap();
        let data_dir = blocker.join("data");
        let data_dir = data_dir.to_str().unwrap();

        for kind in ["json", "sqlite"] {
            let args = cli(&["--storage", kind, "--data-dir", data_dir, "history", "list"]);
            usable_state(args.open_storage());
        }
        assert!(blocker.is_file());
    }

    #[test]
    fn json_storage_lives_in_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");

        let args = cli(&["--data-dir", data_dir.to_str().unwrap(), "health"]);
        usable_state(args.open_storage());

        let saved = fs::read_to_string(data_dir.join("storage.json")).unwrap();
        assert!(saved.contains("claim A"));
    }

    #[test]
    fn listing_tells_empty_history_from_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli(&["--data-dir", dir.path().to_str().unwrap(), "history", "list"]);
        let mut state = AppState::new(
            args.open_storage(),
            ApiConfig::new("http://127.0.0.1:9").without_latency(),
        )
        .unwrap();

        assert_eq!(history_listing(&state.history, None, None), vec!["No verifications yet."]);

        state.history.add(record("1", "Garlic cures colds", Verdict::True));
        state.history.add(record("2", "Lemon water detox", Verdict::NeedsReview));

        let all = history_listing(&state.history, None, None);
        assert_eq!(all.len(), 2);
        assert!(all[0].starts_with("2  "));

        let garlic = history_listing(&state.history, Some("GARLIC"), None);
        assert_eq!(garlic.len(), 1);
        assert!(garlic[0].contains("Garlic cures colds"));

        assert_eq!(
            history_listing(&state.history, Some("garlic"), Some(Verdict::Misleading)),
            vec!["No matching verifications."]
        );
        assert_eq!(
            history_listing(&state.history, Some("vaccines"), None),
            vec!["No matching verifications."]
        );
    }
}
