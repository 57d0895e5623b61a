use std::sync::Arc;

use log::warn;

use crate::{
    models::VerificationRecord,
    storage::{KeyValueStorage, StorageError},
};

pub const HISTORY_STORAGE_KEY: &str = "healthcheck-verifications";

/// Reads and writes the whole verification history under one storage key.
///
/// Storage is a best-effort cache: `load` and `save` log failures and carry on.
/// `try_load` / `try_save` expose the underlying error for callers that care.
#[derive(Clone)]
pub struct HistoryPersistence {
    storage: Arc<dyn KeyValueStorage>,
}

impl HistoryPersistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn try_load(&self) -> Result<Vec<VerificationRecord>, StorageError> {
        match self.storage.get(HISTORY_STORAGE_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn load(&self) -> Vec<VerificationRecord> {
        self.try_load().unwrap_or_else(|err| {
            warn!("Failed to load verification history, starting empty: {err}");
            Vec::new()
        })
    }

    pub fn try_save(&self, records: &[VerificationRecord]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(records)?;
        self.storage.set(HISTORY_STORAGE_KEY, &payload)
    }

    pub fn save(&self, records: &[VerificationRecord]) {
        if let Err(err) = self.try_save(records) {
            warn!(
                "Failed to persist {} verification record(s): {err}",
                records.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        models::{Citation, Verdict, VerificationResult},
        storage::MemoryStorage,
    };

    fn record(id: &str) -> VerificationRecord {
        VerificationRecord::with_id(
            id,
            format!("claim {id}"),
            VerificationResult {
                verdict: Verdict::Misleading,
                confidence: 81.5,
                explanation: "contradicts guidance".into(),
                citations: vec![Citation {
                    title: "Guidance".into(),
                    source: "WHO".into(),
                    url: "https://www.who.int".into(),
                    published_at: Some("2024-02-01".into()),
                    summary: None,
                }],
                language: Some("English".into()),
                model: None,
                processing_time: Some("1.2s".into()),
                timestamp: None,
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = HistoryPersistence::new(storage);
        let records = vec![record("2"), record("1")];

        persistence.save(&records);
        assert_eq!(persistence.load(), records);
    }

    #[test]
    fn missing_key_loads_empty() {
        let persistence = HistoryPersistence::new(Arc::new(MemoryStorage::new()));
        assert!(persistence.try_load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_STORAGE_KEY, "[{\"id\": 7}").unwrap();
        let persistence = HistoryPersistence::new(storage);

        assert!(matches!(
            persistence.try_load(),
            Err(StorageError::Serialization(_))
        ));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn wrong_schema_loads_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_STORAGE_KEY, "{\"records\": []}").unwrap();
        let persistence = HistoryPersistence::new(storage);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn unavailable_storage_never_fails_load() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = HistoryPersistence::new(storage.clone());
        persistence.save(&[record("1")]);

        storage.set_available(false);
        for _ in 0..3 {
            assert!(persistence.load().is_empty());
        }
    }

    #[test]
    fn failed_save_leaves_prior_state() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = HistoryPersistence::new(storage.clone());
        persistence.save(&[record("1")]);

        storage.set_available(false);
        persistence.save(&[record("2"), record("1")]);
        storage.set_available(true);

        let loaded = persistence.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "1");
    }
}
