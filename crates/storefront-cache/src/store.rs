//! Storage backends.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::CacheError;

/// A key-value store of JSON values.
///
/// Missing keys are not an error: `get` returns `Ok(None)`. There is no
/// transactionality; the last write to a key wins.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-memory store, scoped to the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// A store that fails every operation.
///
/// Stands in for an environment with no persistence backend (for example
/// server-side rendering, where there is no browser storage).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl Storage for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, CacheError> {
        Err(CacheError::Unavailable)
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), CacheError> {
        Err(CacheError::Unavailable)
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Err(CacheError::Unavailable)
    }
}

pub(crate) fn poisoned<T>(_: std::sync::PoisonError<T>) -> CacheError {
    CacheError::StoreError("store lock poisoned".to_string())
}
