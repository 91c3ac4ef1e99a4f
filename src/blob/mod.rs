//! Blob stores - the string-keyed substrate every collection is persisted in.
//!
//! A blob store maps namespaced keys to opaque UTF-8 strings. It knows
//! nothing about records or JSON; the [`RecordStore`](crate::RecordStore)
//! layers typed collections on top of it.
//!
//! ## Example
//!
//! ```ignore
//! use noc_toolkit::{BlobStore, InMemoryBlobStore};
//!
//! let blobs = InMemoryBlobStore::new();
//! blobs.set("noc-notes", "[]".to_string())?;
//! assert_eq!(blobs.get("noc-notes")?.as_deref(), Some("[]"));
//! ```

mod file;
mod in_memory;

use std::sync::Arc;

use crate::error::StoreError;

pub use file::FileBlobStore;
pub use in_memory::InMemoryBlobStore;

/// Synchronous key-value storage of string blobs.
///
/// Each `set` replaces the previous value as a whole; callers never observe
/// a partially written value.
pub trait BlobStore: Send + Sync {
    /// Read the raw value stored under `key`. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<B: BlobStore + ?Sized> BlobStore for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}
