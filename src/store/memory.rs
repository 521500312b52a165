//! In-memory store

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StoreError, StoredValue};

/// Volatile store backed by a shared map.
///
/// Clones share the same map, so a tracker rebuilt over a clone observes
/// everything written through the original (a simulated process restart).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, StoredValue>>>,
}

impl MemoryStore {
    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
