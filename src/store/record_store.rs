use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{CollectionRepository, Record};
use crate::blob::BlobStore;
use crate::error::StoreError;
#[cfg(feature = "emitter")]
use crate::events::StoreEvents;

/// Typed, fail-soft persistence of whole collections over a [`BlobStore`].
///
/// Reads never fail: a missing, malformed or non-array value loads as an
/// empty collection. Writes serialize the full collection and replace the
/// stored value in a single `set`.
pub struct RecordStore<B> {
    blobs: B,
    #[cfg(feature = "emitter")]
    events: Option<StoreEvents>,
}

impl<B: BlobStore> RecordStore<B> {
    pub fn new(blobs: B) -> Self {
        Self {
            blobs,
            #[cfg(feature = "emitter")]
            events: None,
        }
    }

    /// Attach change notifications (see [`crate::events`]).
    #[cfg(feature = "emitter")]
    pub fn with_events(mut self, events: StoreEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// The underlying blob store.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Load the collection for record kind `R`.
    pub fn load<R: Record>(&self) -> Vec<R> {
        self.load_key(R::KEY)
    }

    /// Load a JSON array stored under `key`.
    ///
    /// Elements that do not match `T` are skipped one by one; anything that
    /// is not a JSON array at all yields an empty vec.
    pub fn load_key<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.blobs.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("reading {} failed, using empty collection: {}", key, err);
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!(
                    "{} does not hold a JSON array ({}), using empty collection",
                    key,
                    value_kind(&other)
                );
                return Vec::new();
            }
            Err(err) => {
                warn!("{} is not valid JSON, using empty collection: {}", key, err);
                return Vec::new();
            }
        };

        let total = items.len();
        let records: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping invalid entry {} in {}: {}", index, key, err);
                    None
                }
            })
            .collect();
        debug!("loaded {}/{} entries from {}", records.len(), total, key);
        records
    }

    /// Replace the stored collection for record kind `R`.
    pub fn save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        self.save_key(R::KEY, records)
    }

    /// Serialize `records` as a JSON array and overwrite `key`.
    pub fn save_key<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.blobs.set(key, json)?;
        debug!("saved {} entries to {}", records.len(), key);
        self.notify(crate::events::COLLECTION_SAVED, key);
        Ok(())
    }

    /// Delete `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.blobs.remove(key)? {
            debug!("removed {}", key);
            self.notify(crate::events::KEY_REMOVED, key);
        }
        Ok(())
    }

    /// Typed accessor for one record kind.
    pub fn collection<R: Record>(&self) -> CollectionRepository<'_, B, R> {
        CollectionRepository::new(self)
    }

    #[cfg(feature = "emitter")]
    pub(crate) fn notify(&self, event: &str, payload: &str) {
        if let Some(events) = &self.events {
            events.notify(event, payload);
        }
    }

    #[cfg(not(feature = "emitter"))]
    pub(crate) fn notify(&self, _event: &str, _payload: &str) {}
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::InMemoryBlobStore;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        value: i32,
    }

    impl Record for Entry {
        const KEY: &'static str = "test-entries";
        fn id(&self) -> &str {
            &self.id
        }
        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn entry(id: &str, value: i32) -> Entry {
        Entry {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        let records = vec![entry("c", 3), entry("a", 1), entry("b", 2)];

        store.save(&records).unwrap();
        assert_eq!(store.load::<Entry>(), records);
    }

    #[test]
    fn load_missing_key_is_empty() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        assert!(store.load::<Entry>().is_empty());
    }

    #[test]
    fn load_not_json_is_empty() {
        let blobs = InMemoryBlobStore::with_entries([("test-entries", "not json")]);
        let store = RecordStore::new(blobs);
        assert!(store.load::<Entry>().is_empty());
    }

    #[test]
    fn load_non_array_is_empty() {
        let blobs = InMemoryBlobStore::with_entries([("test-entries", r#"{"id":"a","value":1}"#)]);
        let store = RecordStore::new(blobs);
        assert!(store.load::<Entry>().is_empty());
    }

    #[test]
    fn load_skips_invalid_elements() {
        let blobs = InMemoryBlobStore::with_entries([(
            "test-entries",
            r#"[{"id":"a","value":1},{"id":"b","value":"two"},{"id":"c","value":3}]"#,
        )]);
        let store = RecordStore::new(blobs);
        assert_eq!(store.load::<Entry>(), vec![entry("a", 1), entry("c", 3)]);
    }

    #[test]
    fn save_overwrites_whole_collection() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        store.save(&[entry("a", 1), entry("b", 2)]).unwrap();
        store.save(&[entry("z", 26)]).unwrap();
        assert_eq!(store.load::<Entry>(), vec![entry("z", 26)]);
    }

    #[test]
    fn remove_twice_matches_remove_once() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        store.save(&[entry("a", 1)]).unwrap();

        store.remove(Entry::KEY).unwrap();
        store.remove(Entry::KEY).unwrap();
        assert!(store.load::<Entry>().is_empty());
        assert!(store.blobs().get(Entry::KEY).unwrap().is_none());
    }

    #[test]
    fn load_key_reads_string_arrays() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        store
            .save_key("noc-favorites", &["show version".to_string()])
            .unwrap();
        let favorites: Vec<String> = store.load_key("noc-favorites");
        assert_eq!(favorites, vec!["show version"]);
    }
}
