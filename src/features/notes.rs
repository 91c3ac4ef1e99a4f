//! Technical notes per client, newest first.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::require;
use crate::blob::BlobStore;
use crate::error::{FeatureError, StoreError};
use crate::store::{new_id, RecordStore};
use crate::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(key = "noc-notes")]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(alias = "cliente")]
    pub client: String,
    #[serde(alias = "conteudo")]
    pub content: String,
    #[serde(alias = "dataRegistro")]
    pub registered_at: DateTime<Utc>,
}

impl Note {
    fn mentions(&self, needle: &str) -> bool {
        self.client.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

pub struct NoteBook<'a, B> {
    store: &'a RecordStore<B>,
}

impl<'a, B: BlobStore> NoteBook<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { store }
    }

    /// All notes, newest first.
    pub fn list(&self) -> Vec<Note> {
        self.store.collection::<Note>().load().into_vec()
    }

    /// Add a note at the top of the book. Client and content are required.
    pub fn add(&self, client: &str, content: &str) -> Result<Note, FeatureError> {
        require("note", "client", client)?;
        require("note", "content", content)?;

        let note = Note {
            id: new_id(),
            client: client.to_string(),
            content: content.to_string(),
            registered_at: Utc::now(),
        };
        let stored = self.store.collection::<Note>().prepend(note)?;
        info!("added note for {}", stored.client);
        Ok(stored)
    }

    pub fn delete(&self, id: &str) -> Result<bool, FeatureError> {
        Ok(self.store.collection::<Note>().delete(id)?)
    }

    /// Notes whose client or content contains `text`, case-insensitively.
    /// Blank text returns every note.
    pub fn filter(&self, text: &str) -> Vec<Note> {
        let needle = text.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|note| needle.is_empty() || note.mentions(&needle))
            .collect()
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::InMemoryBlobStore;

    #[test]
    fn newest_note_comes_first() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        let book = NoteBook::new(&store);

        book.add("Acme", "ticket 1: link flapping").unwrap();
        book.add("Globex", "ticket 2: BGP reset").unwrap();

        let clients: Vec<_> = book.list().into_iter().map(|n| n.client).collect();
        assert_eq!(clients, vec!["Globex", "Acme"]);
    }

    #[test]
    fn add_requires_client_and_content() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        let book = NoteBook::new(&store);
        assert!(book.add("", "text").is_err());
        assert!(book.add("Acme", "").is_err());
        assert!(book.list().is_empty());
    }

    #[test]
    fn filter_matches_client_or_content() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        let book = NoteBook::new(&store);
        book.add("Acme", "VLAN 200 missing on trunk").unwrap();
        book.add("Globex", "OSPF dead timer mismatch").unwrap();

        assert_eq!(book.filter("acme").len(), 1);
        assert_eq!(book.filter("ospf")[0].client, "Globex");
        assert_eq!(book.filter("  ").len(), 2);
        assert!(book.filter("mpls").is_empty());
    }

    #[test]
    fn delete_removes_only_that_note() {
        let store = RecordStore::new(InMemoryBlobStore::new());
        let book = NoteBook::new(&store);
        let first = book.add("Acme", "one").unwrap();
        book.add("Acme", "two").unwrap();

        assert!(book.delete(&first.id).unwrap());
        let remaining = book.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content, "two");
    }
}
