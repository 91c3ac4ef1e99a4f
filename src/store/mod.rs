//! Record store - typed collections persisted as JSON arrays in a blob store.
//!
//! Every record kind lives under one fixed, namespaced key. A collection is
//! always read and written as a whole: there are no partial updates.
//!
//! ## Example
//!
//! ```ignore
//! use noc_toolkit::{InMemoryBlobStore, Record, RecordStore};
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(key = "noc-circuits")]
//! struct Circuit {
//!     pub id: String,
//!     pub client: String,
//! }
//!
//! let store = RecordStore::new(InMemoryBlobStore::new());
//! store.collection::<Circuit>().insert(circuit)?;
//! let circuits = store.load::<Circuit>();
//! ```

mod collection;
mod record_store;
mod repository;
mod snapshot;

use serde::{de::DeserializeOwned, Serialize};

pub use collection::Collection;
pub use record_store::RecordStore;
pub use repository::CollectionRepository;

/// Namespaced blob keys used by the toolkit.
pub mod keys {
    pub const FAVORITES: &str = "noc-favorites";
    pub const CUSTOM_COMMANDS: &str = "noc-custom-commands";
    pub const CIRCUITS: &str = "noc-circuits";
    pub const NOTES: &str = "noc-notes";
    pub const TROUBLESHOOTS: &str = "noc-troubleshoots";

    /// Every key covered by backup, restore and clear-all, in export order.
    pub const ALL: [&str; 5] = [FAVORITES, CUSTOM_COMMANDS, CIRCUITS, NOTES, TROUBLESHOOTS];
}

/// Trait for types that can be stored in a collection.
///
/// Usually derived with `#[derive(Record)]`.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The namespaced blob key this record kind is stored under.
    const KEY: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;

    /// Replace the identifier. Used when a record is created without one.
    fn set_id(&mut self, id: String);
}

/// A fresh random record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
