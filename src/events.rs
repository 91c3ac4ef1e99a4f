//! Store change notifications.
//!
//! With the `emitter` feature, a [`RecordStore`](crate::RecordStore) can be
//! given a [`StoreEvents`] and will emit one event per persisted change. The
//! payload is the affected key (or the comma-separated keys for snapshot
//! import and clear-all). Listeners receive it as a `String`.
//!
//! ```ignore
//! let mut emitter = EventEmitter::new();
//! emitter.on(events::SNAPSHOT_IMPORTED, |keys: String| reload(&keys));
//! let store = RecordStore::new(blobs).with_events(StoreEvents::new(emitter));
//! ```

/// A collection was rewritten. Payload: the key.
pub const COLLECTION_SAVED: &str = "CollectionSaved";
/// A key was deleted. Payload: the key.
pub const KEY_REMOVED: &str = "KeyRemoved";
/// A snapshot was restored. Payload: the keys written.
pub const SNAPSHOT_IMPORTED: &str = "SnapshotImported";
/// Clear-all ran. Payload: the keys cleared.
pub const STORE_CLEARED: &str = "StoreCleared";

#[cfg(feature = "emitter")]
pub use emitter::StoreEvents;

#[cfg(feature = "emitter")]
mod emitter {
    use std::sync::Mutex;

    use event_emitter_rs::EventEmitter;
    use log::warn;

    /// Emits store change events to in-process listeners.
    ///
    /// Listeners run on the emitter's own threads; the store never waits
    /// for them.
    pub struct StoreEvents {
        emitter: Mutex<EventEmitter>,
    }

    impl StoreEvents {
        pub fn new(emitter: EventEmitter) -> Self {
            Self {
                emitter: Mutex::new(emitter),
            }
        }

        pub(crate) fn notify(&self, event: &str, payload: &str) {
            match self.emitter.lock() {
                Ok(mut emitter) => {
                    emitter.emit(event, payload.to_string());
                }
                Err(_) => warn!("store event emitter poisoned, dropping {}", event),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::mpsc;
        use std::time::Duration;

        use super::*;
        use crate::blob::InMemoryBlobStore;
        use crate::backup::Snapshot;
        use crate::events::{COLLECTION_SAVED, KEY_REMOVED, SNAPSHOT_IMPORTED, STORE_CLEARED};
        use crate::RecordStore;

        #[test]
        fn save_emits_collection_saved() {
            let mut emitter = EventEmitter::new();
            let (tx, rx) = mpsc::channel::<String>();
            emitter.on(COLLECTION_SAVED, move |key: String| {
                tx.send(key).unwrap();
            });

            let store =
                RecordStore::new(InMemoryBlobStore::new()).with_events(StoreEvents::new(emitter));
            store
                .save_key("noc-favorites", &["show clock".to_string()])
                .unwrap();

            let key = rx.recv_timeout(Duration::from_secs(1)).unwrap();
            assert_eq!(key, "noc-favorites");
        }

        #[test]
        fn removing_absent_key_emits_nothing() {
            let mut emitter = EventEmitter::new();
            let (tx, rx) = mpsc::channel::<String>();
            emitter.on(KEY_REMOVED, move |key: String| {
                tx.send(key).unwrap();
            });

            let store =
                RecordStore::new(InMemoryBlobStore::new()).with_events(StoreEvents::new(emitter));
            store.remove("noc-notes").unwrap();

            assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        }

        #[test]
        fn import_emits_written_keys() {
            let mut emitter = EventEmitter::new();
            let (tx, rx) = mpsc::channel::<String>();
            emitter.on(SNAPSHOT_IMPORTED, move |keys: String| {
                tx.send(keys).unwrap();
            });

            let store =
                RecordStore::new(InMemoryBlobStore::new()).with_events(StoreEvents::new(emitter));
            let snapshot = Snapshot::from_json(
                r#"{
                    "noc-favorites": "[\"show clock\"]",
                    "noc-circuits": "[]",
                    "noc-notes": null,
                    "exportDate": "2026-10-16T08:00:00.000Z",
                    "version": "1.0"
                }"#,
            )
            .unwrap();
            assert_eq!(store.import_snapshot(&snapshot).unwrap(), 2);

            let keys = rx.recv_timeout(Duration::from_secs(1)).unwrap();
            assert_eq!(keys, "noc-circuits,noc-favorites");
        }

        #[test]
        fn clear_all_emits_cleared_keys() {
            let mut emitter = EventEmitter::new();
            let (tx, rx) = mpsc::channel::<String>();
            emitter.on(STORE_CLEARED, move |keys: String| {
                tx.send(keys).unwrap();
            });

            let store =
                RecordStore::new(InMemoryBlobStore::new()).with_events(StoreEvents::new(emitter));
            store.clear_all(&["noc-notes", "noc-circuits"]).unwrap();

            let keys = rx.recv_timeout(Duration::from_secs(1)).unwrap();
            assert_eq!(keys, "noc-notes,noc-circuits");
        }
    }
}
