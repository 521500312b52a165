//! Persistent key-value storage
//!
//! Trackers read their state from a [`KeyValueStore`] once when they are
//! constructed and write back after every mutation. Any durable string-keyed
//! store satisfies the contract; [`JsonFileStore`] is the one the app uses and
//! [`MemoryStore`] is the in-memory fake used by tests.

pub mod json;
pub mod memory;

use std::path::PathBuf;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Shared handle to the store owned by the composition root.
///
/// Trackers are confined to a single owner thread, so `Rc` is enough.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O failed for {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be encoded or decoded
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A key holds a value of a different kind than requested
    #[error("Key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        /// Offending key
        key: String,
        /// Kind the caller asked for
        expected: &'static str,
        /// Kind actually stored
        found: &'static str,
    },

    /// A stored date string could not be parsed
    #[error("Key '{key}' holds an invalid date: {value}")]
    InvalidDate {
        /// Offending key
        key: String,
        /// Raw stored string
        value: String,
    },
}

/// A single stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredValue {
    Int(i64),
    IntList(Vec<i64>),
    StringList(Vec<String>),
    String(String),
}

impl StoredValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "an integer",
            Self::IntList(_) => "an integer list",
            Self::StringList(_) => "a string list",
            Self::String(_) => "a string",
        }
    }
}

/// String-keyed durable store.
///
/// Missing keys read back as `Ok(None)`, never as an error. Implementations
/// use interior mutability; callers hold a shared [`SharedStore`] handle.
pub trait KeyValueStore {
    /// Fetch the raw value under `key`
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError>;

    /// Erase `key` entirely
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Whether `key` currently holds a value
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoredValue::Int(v)) => Ok(Some(v)),
            Some(other) => Err(mismatch(key, "an integer", &other)),
        }
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(key, StoredValue::Int(value))
    }

    fn get_int_list(&self, key: &str) -> Result<Option<Vec<i64>>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoredValue::IntList(v)) => Ok(Some(v)),
            Some(other) => Err(mismatch(key, "an integer list", &other)),
        }
    }

    fn set_int_list(&self, key: &str, value: Vec<i64>) -> Result<(), StoreError> {
        self.set(key, StoredValue::IntList(value))
    }

    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoredValue::StringList(v)) => Ok(Some(v)),
            Some(other) => Err(mismatch(key, "a string list", &other)),
        }
    }

    fn set_string_list(&self, key: &str, value: Vec<String>) -> Result<(), StoreError> {
        self.set(key, StoredValue::StringList(value))
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoredValue::String(v)) => Ok(Some(v)),
            Some(other) => Err(mismatch(key, "a string", &other)),
        }
    }

    fn set_string(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.set(key, StoredValue::String(value))
    }
}

fn mismatch(key: &str, expected: &'static str, found: &StoredValue) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Read an integer counter, treating missing or out-of-range values as zero
pub(crate) fn read_counter<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StoreError>
where
    T: TryFrom<i64> + Default,
{
    let raw = store.get_int(key)?.unwrap_or(0);
    Ok(T::try_from(raw).unwrap_or_else(|_| {
        tracing::warn!("Ignoring out-of-range value {} stored under '{}'", raw, key);
        T::default()
    }))
}
