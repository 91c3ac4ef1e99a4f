//! Snapshot export, import and clear-all on the record store.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};
use serde_json::Value;

use super::RecordStore;
use crate::backup::{is_truthy, restore_text, Snapshot, SNAPSHOT_VERSION};
use crate::blob::BlobStore;
use crate::error::StoreError;
use crate::events::{SNAPSHOT_IMPORTED, STORE_CLEARED};

impl<B: BlobStore> RecordStore<B> {
    /// Read `keys` without parsing them and package them with an export
    /// timestamp and the snapshot version. Absent keys export as `null`.
    pub fn export_snapshot(&self, keys: &[&str]) -> Snapshot {
        let entries: BTreeMap<String, Value> = keys
            .iter()
            .map(|key| {
                let value = match self.blobs().get(key) {
                    Ok(Some(raw)) => Value::String(raw),
                    Ok(None) => Value::Null,
                    Err(err) => {
                        warn!("exporting {} failed, writing null: {}", key, err);
                        Value::Null
                    }
                };
                (key.to_string(), value)
            })
            .collect();
        debug!("exported {} keys", entries.len());

        Snapshot {
            entries,
            export_date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            version: Some(SNAPSHOT_VERSION.to_string()),
        }
    }

    /// Write every truthy entry of `snapshot` back verbatim. No schema check
    /// is done; values that later fail to parse load as empty collections.
    ///
    /// Returns the number of keys written.
    pub fn import_snapshot(&self, snapshot: &Snapshot) -> Result<usize, StoreError> {
        let mut written = Vec::new();
        for (key, value) in &snapshot.entries {
            if !is_truthy(value) {
                debug!("skipping empty snapshot entry {}", key);
                continue;
            }
            self.blobs().set(key, restore_text(value))?;
            written.push(key.as_str());
        }
        info!(
            "imported {} keys from snapshot {}",
            written.len(),
            snapshot.export_date.as_deref().unwrap_or("(undated)")
        );
        self.notify(SNAPSHOT_IMPORTED, &written.join(","));
        Ok(written.len())
    }

    /// Remove every key in `keys`. Irreversible.
    pub fn clear_all(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.blobs().remove(key)?;
        }
        info!("cleared {} keys", keys.len());
        self.notify(STORE_CLEARED, &keys.join(","));
        Ok(())
    }
}
