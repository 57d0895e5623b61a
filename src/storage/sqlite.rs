use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{migrations::run_migrations, KeyValueStorage, StorageError};

/// Key/value pairs in a single SQLite table.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStorage {
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let conn = Connection::open(&db_path)?;
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        let storage = Self::init(conn, Some(db_path))?;
        if let Some(path) = storage.path() {
            info!("SQLite storage initialized at {}", path.display());
        }
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(mut conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StorageError> {
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn execute<F, T>(&self, task: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        task(&guard).map_err(StorageError::from)
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.execute(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let updated_at = Utc::now().to_rfc3339();
        self.execute(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.execute(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
    }
}
