use std::collections::HashSet;

use super::{new_id, Record};

/// An ordered, id-unique sequence of records of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from stored records. A later record repeating an
    /// id (or one stored without an id) is kept under a derived id, so the
    /// next rewrite persists every record.
    pub fn from_records(records: Vec<R>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .enumerate()
            .map(|(position, mut record)| {
                if record.id().is_empty() || seen.contains(record.id()) {
                    let id = derived_id::<R>(record.id(), position, &seen);
                    log::warn!(
                        "reassigning id {:?} at position {} in {} to {}",
                        record.id(),
                        position,
                        R::KEY,
                        id
                    );
                    record.set_id(id);
                }
                seen.insert(record.id().to_string());
                record
            })
            .collect();
        Self { records }
    }

    /// Append a record, assigning an id if it has none (or a taken one).
    /// Returns the record as stored.
    pub fn push(&mut self, record: R) -> &R {
        let record = self.with_free_id(record);
        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }

    /// Insert a record at the front (newest-first collections).
    pub fn prepend(&mut self, record: R) -> &R {
        let record = self.with_free_id(record);
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Remove the record with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<R> {
        self.records
    }

    fn with_free_id(&self, mut record: R) -> R {
        if record.id().is_empty() || self.contains(record.id()) {
            record.set_id(new_id());
        }
        record
    }
}

/// Deterministic replacement id, so a reassigned record keeps it across reloads.
fn derived_id<R: Record>(id: &str, position: usize, taken: &HashSet<String>) -> String {
    let name = format!("{}\n{}\n{}", R::KEY, id, position);
    let derived = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string();
    if taken.contains(&derived) {
        new_id()
    } else {
        derived
    }
}

impl<R> IntoIterator for Collection<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
