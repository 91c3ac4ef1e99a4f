//! Backup and restore of every toolkit collection.
//!
//! A backup is a [`Snapshot`]: the raw JSON text of each namespaced key plus
//! an export timestamp and a version tag. Restoring writes the values back
//! verbatim, without checking them against any record schema; a bad value
//! simply loads as an empty collection later.

mod snapshot;
mod stats;

use chrono::NaiveDate;
use log::info;

use crate::blob::BlobStore;
use crate::error::StoreError;
use crate::store::{keys, RecordStore};

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub(crate) use snapshot::{is_truthy, restore_text};
pub use stats::BackupStats;

/// Suggested file name for a backup taken on `date`.
pub fn file_name(date: NaiveDate) -> String {
    format!("noc-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Backup operations over all toolkit keys.
pub struct BackupManager<'a, B> {
    store: &'a RecordStore<B>,
}

impl<'a, B: BlobStore> BackupManager<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { store }
    }

    /// Snapshot every toolkit key.
    pub fn export(&self) -> Snapshot {
        self.store.export_snapshot(&keys::ALL)
    }

    /// Restore a snapshot. Returns the number of keys written.
    pub fn import(&self, snapshot: &Snapshot) -> Result<usize, StoreError> {
        self.store.import_snapshot(snapshot)
    }

    /// Read a backup file and restore it.
    pub fn import_file(&self, path: impl AsRef<std::path::Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let snapshot = Snapshot::read_from(path)?;
        info!("restoring backup {}", path.display());
        self.import(&snapshot)
    }

    /// Delete every toolkit key. The caller must have confirmed this with
    /// the user; there is no undo.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.store.clear_all(&keys::ALL)
    }

    /// Entry counts of the current store.
    pub fn stats(&self) -> BackupStats {
        BackupStats::from_snapshot(&self.export())
    }
}
