//! Key-value persistence seam.
//!
//! The engine persists session state (cart, per-user favorites, current
//! user) through this trait, mirroring the browser local-storage contract
//! it was designed against: string keys, string values, best-effort writes.
//! Business logic never touches storage directly; services call it as a
//! post-mutation hook and degrade to empty state when reads fail.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Errors surfaced by a [`KeyValueStore`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// A read failed.
    #[error("storage read failed: {0}")]
    Read(String),
    /// A write failed.
    #[error("storage write failed: {0}")]
    Write(String),
}

/// A string key-value store.
///
/// Implementations take `&self`; interior mutability is an implementation
/// detail, matching the shape of the browser `localStorage` API.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the removal cannot be applied.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`] used by tests and single-process embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces() {
        let store = MemoryStore::new();
        store.set("user", "a").unwrap();
        store.set("user", "b").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.set("user", "a").unwrap();
        store.remove("user").unwrap();
        assert!(store.get("user").unwrap().is_none());
    }

    #[test]
    fn test_with_entries() {
        let store =
            MemoryStore::with_entries([("favorites_1".to_owned(), "[\"2\"]".to_owned())]);
        assert_eq!(
            store.get("favorites_1").unwrap().as_deref(),
            Some("[\"2\"]")
        );
    }
}
