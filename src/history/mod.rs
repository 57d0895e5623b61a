pub mod persistence;
pub mod store;

pub use persistence::{HistoryPersistence, HISTORY_STORAGE_KEY};
pub use store::HistoryStore;
