//! CollectionRepository - Typed accessor for whole-collection CRUD.

use std::marker::PhantomData;

use super::{Collection, Record, RecordStore};
use crate::blob::BlobStore;
use crate::error::StoreError;

/// Typed repository wrapper for one record kind.
///
/// Every mutation loads the collection, applies the change and rewrites the
/// whole collection.
pub struct CollectionRepository<'a, B, R> {
    store: &'a RecordStore<B>,
    _marker: PhantomData<R>,
}

impl<'a, B: BlobStore, R: Record> CollectionRepository<'a, B, R> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Load the collection (empty on any read or parse failure).
    pub fn load(&self) -> Collection<R> {
        Collection::from_records(self.store.load::<R>())
    }

    /// Replace the stored collection.
    pub fn save(&self, collection: &Collection<R>) -> Result<(), StoreError> {
        self.store.save(collection.as_slice())
    }

    /// Get a record by id.
    pub fn get(&self, id: &str) -> Option<R> {
        self.load().get(id).cloned()
    }

    /// Append a record. Returns the stored record (with its assigned id).
    pub fn insert(&self, record: R) -> Result<R, StoreError> {
        let mut collection = self.load();
        let stored = collection.push(record).clone();
        self.save(&collection)?;
        Ok(stored)
    }

    /// Insert a record at the front. Returns the stored record.
    pub fn prepend(&self, record: R) -> Result<R, StoreError> {
        let mut collection = self.load();
        let stored = collection.prepend(record).clone();
        self.save(&collection)?;
        Ok(stored)
    }

    /// Delete a record by id. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut collection = self.load();
        if collection.remove(id).is_none() {
            return Ok(false);
        }
        self.save(&collection)?;
        Ok(true)
    }

    /// Remove the collection's key entirely.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(R::KEY)
    }
}
