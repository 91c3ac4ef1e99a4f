use serde::Serialize;
use serde_json::Value;

use super::Snapshot;
use crate::store::keys;

/// Number of entries held per collection, as shown before a backup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackupStats {
    pub favorites: usize,
    pub custom_commands: usize,
    pub circuits: usize,
    pub notes: usize,
    pub troubleshoots: usize,
}

impl BackupStats {
    /// Count the entries of each known collection. A key that is absent or
    /// does not hold a JSON array counts as zero.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let count = |key: &str| {
            snapshot
                .raw(key)
                .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
                .and_then(|value| value.as_array().map(Vec::len))
                .unwrap_or(0)
        };

        Self {
            favorites: count(keys::FAVORITES),
            custom_commands: count(keys::CUSTOM_COMMANDS),
            circuits: count(keys::CIRCUITS),
            notes: count(keys::NOTES),
            troubleshoots: count(keys::TROUBLESHOOTS),
        }
    }

    pub fn total(&self) -> usize {
        self.favorites + self.custom_commands + self.circuits + self.notes + self.troubleshoots
    }
}
