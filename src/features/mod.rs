//! Feature services: one record kind each, built on the record store.
//!
//! These hold no state of their own beyond what they load; every mutation
//! goes straight through to the store.

pub mod circuits;
pub mod commands;
pub mod notes;
pub mod troubleshoot;

use crate::error::ValidationError;

/// Reject blank required fields.
pub(crate) fn require(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { record, field });
    }
    Ok(())
}

/// Pretty JSON export file name, e.g. `circuits-2026-10-16.json`.
pub fn export_file_name(prefix: &str, date: chrono::NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}
