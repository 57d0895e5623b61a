//! String-keyed persistent storage media.
//!
//! Every backend stores plain strings under plain keys, the way a browser's
//! local storage does. Typed data is layered on top by its owner (see
//! [`crate::history::HistoryPersistence`] and [`crate::settings::PreferencesStore`]).

use std::path::PathBuf;

use thiserror::Error;

mod file;
mod memory;
mod migrations;
mod sqlite;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite storage failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("sqlite schema error: {0}")]
    Schema(String),
    #[error("payload is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any previous value. A failed write leaves the old value in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
