use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Version tag written into every exported snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// A full export of the store: raw values per key plus metadata.
///
/// Serialized flat, so a snapshot file looks like
///
/// ```text
/// {
///   "noc-notes": "[{\"id\":\"1\", ...}]",
///   "noc-circuits": null,
///   "exportDate": "2026-10-16T09:30:00.000Z",
///   "version": "1.0"
/// }
/// ```
///
/// Values are carried as opaque JSON text and never parsed on the way
/// through. `null` marks a key that was absent at export time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub entries: BTreeMap<String, Value>,
    #[serde(rename = "exportDate", default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Snapshot {
    /// The raw string stored for `key`, if the snapshot carries one.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Read a snapshot file. Fails on unreadable or non-object JSON.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// JavaScript-style truthiness of a snapshot value. Only truthy values are
/// restored on import.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The text written back to the blob store for a truthy value.
pub(crate) fn restore_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
