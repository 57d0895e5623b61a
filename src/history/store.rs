use log::info;

use crate::models::{Verdict, VerificationRecord};

use super::HistoryPersistence;

/// In-memory verification history, newest first.
///
/// The store is the only writer of both its collection and the persisted copy:
/// every mutation is followed by a full-collection save.
pub struct HistoryStore {
    records: Vec<VerificationRecord>,
    persistence: HistoryPersistence,
}

impl HistoryStore {
    /// Creates an empty store. Call [`HistoryStore::initialize`] once to rehydrate.
    pub fn new(persistence: HistoryPersistence) -> Self {
        Self {
            records: Vec::new(),
            persistence,
        }
    }

    /// Loads persisted history. A non-empty load replaces the collection wholesale.
    pub fn initialize(&mut self) {
        let loaded = self.persistence.load();
        if !loaded.is_empty() {
            info!("Rehydrated {} verification record(s)", loaded.len());
            self.records = loaded;
        }
        self.persist();
    }

    /// Prepends `record`. Ids are not checked for uniqueness.
    pub fn add(&mut self, record: VerificationRecord) {
        self.records.insert(0, record);
        self.persist();
    }

    pub fn remove(&mut self, id: &str) {
        if let Some(index) = self.records.iter().position(|record| record.id() == id) {
            self.records.remove(index);
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    pub fn get(&self, id: &str) -> Option<&VerificationRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn records(&self) -> &[VerificationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerificationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose input contains `query`, ignoring case.
    pub fn search<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = &'a VerificationRecord> + 'a {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(move |record| record.input().to_lowercase().contains(&needle))
    }

    pub fn with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &VerificationRecord> {
        self.records
            .iter()
            .filter(move |record| record.result().verdict == verdict)
    }

    fn persist(&self) {
        self.persistence.save(&self.records);
    }
}
