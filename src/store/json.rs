//! JSON file store
//!
//! The whole key space lives in one JSON document. It is read once when the
//! store is opened and rewritten after every `set` or `remove`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError, StoredValue};

/// Durable store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, StoredValue>>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values: BTreeMap<String, StoredValue> = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened store {:?} with {} keys", path, values.len());
        Ok(Self {
            path,
            values: RefCell::new(values),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current map to disk, replacing the file atomically
    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }

        let contents = serde_json::to_string_pretty(&*self.values.borrow())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|source| io_error(&tmp, source))?;
        fs::rename(&tmp, &self.path).map_err(|source| io_error(&self.path, source))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.values.borrow_mut().remove(key);
        if removed.is_some() {
            self.flush()
        } else {
            Ok(())
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("store.json")).unwrap();
        assert_eq!(store.get_int("statsTotalQuizzes").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn writes_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_int_list("completedLessons", vec![1, 4]).unwrap();
        store.set_string("streakLastDate", "2024-03-09".into()).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let completed = reopened.get_int_list("completedLessons").unwrap();
        assert_eq!(completed, Some(vec![1, 4]));
        let last_date = reopened.get_string("streakLastDate").unwrap();
        assert_eq!(last_date.as_deref(), Some("2024-03-09"));
    }

    #[test]
    fn remove_erases_key_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_int("streakCurrent", 2).unwrap();
        store.remove("streakCurrent").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("streakCurrent"));
        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(!reopened.contains("streakCurrent").unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
