use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use log::warn;

use super::{KeyValueStorage, StorageError};

/// All keys kept in one pretty-printed JSON object on disk.
pub struct JsonFileStorage {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStorage {
    /// Opens the file at `path`, creating its directory if needed.
    /// An unreadable or corrupt file opens as empty and is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let data = if path.exists() {
            match read_map(&path) {
                Ok(map) => map,
                Err(err) => {
                    warn!("Ignoring unreadable storage file {}: {err}", path.display());
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(data)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized).map_err(|err| StorageError::io(&staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| StorageError::io(&self.path, err))
    }

    fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let contents = fs::read_to_string(path).map_err(|err| StorageError::io(path, err))?;
    Ok(serde_json::from_str(&contents)?)
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("theme", "dark").unwrap();
        storage.set("other", "1").unwrap();
        storage.remove("other").unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.get("theme").unwrap(), None);

        storage.set("theme", "light").unwrap();
        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("key", "before").unwrap();

        // A directory where the staging file should go makes the write fail.
        fs::create_dir(path.with_extension("json.tmp")).unwrap();
        assert!(storage.set("key", "after").is_err());
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("before"));
    }
}
