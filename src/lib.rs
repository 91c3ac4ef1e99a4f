//! Reference-data core for network-operations work: typed record
//! collections persisted as JSON in a pluggable blob store, fuzzy search,
//! favorites, and backup/restore snapshots.

// lets the derive macros refer to `noc_toolkit::...` from inside this crate
extern crate self as noc_toolkit;

pub mod backup;
mod blob;
pub mod config;
mod error;
pub mod events;
mod favorites;
pub mod features;
pub mod search;
pub mod store;

pub use backup::{BackupManager, BackupStats, Snapshot, SNAPSHOT_VERSION};
pub use blob::{BlobStore, FileBlobStore, InMemoryBlobStore};
pub use config::{ConfigError, SearchConfig, ToolkitConfig};
pub use error::{FeatureError, SourceError, StoreError, ValidationError};
#[cfg(feature = "emitter")]
pub use events::StoreEvents;
pub use favorites::{Favorites, FavoritesSet};
pub use features::circuits::{Circuit, CircuitDraft, CircuitKind, CircuitRegistry, CircuitStatus};
pub use features::commands::{Command, CommandCatalog, Origin};
pub use features::notes::{Note, NoteBook};
pub use features::troubleshoot::{Severity, Step, TroubleshootGuide, TroubleshootItem};
pub use search::{SearchHit, SearchIndex, Searchable, DEFAULT_THRESHOLD};
pub use store::{keys, Collection, CollectionRepository, Record, RecordStore};

// derive macros share their trait's name, like serde's
pub use noc_toolkit_macros::{Record, Searchable};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;

/// Open the file-backed store named by `config`.
pub fn open(config: &ToolkitConfig) -> Result<RecordStore<FileBlobStore>, StoreError> {
    Ok(RecordStore::new(FileBlobStore::open(&config.data_path)?))
}
