//! InMemoryBlobStore - HashMap-backed blob store for testing and embedding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::BlobStore;
use crate::error::StoreError;

/// In-memory blob store backed by a HashMap.
///
/// Clone-friendly (cloning shares the same underlying storage), so one
/// instance can be handed to the record store and every feature service.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            storage: Arc::new(RwLock::new(map)),
        }
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("blob read"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("blob write"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("blob write"))?;
        Ok(storage.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("blob read"))?;
        let mut keys: Vec<String> = storage.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let store = InMemoryBlobStore::new();
        store.set("noc-notes", "[]".into()).unwrap();
        assert_eq!(store.get("noc-notes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn set_overwrites() {
        let store = InMemoryBlobStore::new();
        store.set("k", "one".into()).unwrap();
        store.set("k", "two".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = InMemoryBlobStore::with_entries([("k", "v")]);
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn keys_are_sorted() {
        let store = InMemoryBlobStore::with_entries([("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(store.keys().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryBlobStore::new();
        let clone = store.clone();
        store.set("k", "v".into()).unwrap();
        assert_eq!(clone.get("k").unwrap().as_deref(), Some("v"));
    }
}
