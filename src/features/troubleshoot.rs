//! Troubleshooting checklist: builtin procedures plus user-defined ones.

use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::require;
use crate::blob::BlobStore;
use crate::error::FeatureError;
use crate::search::{SearchIndex, DEFAULT_THRESHOLD};
use crate::store::{Collection, RecordStore};
use crate::{Record, Searchable};

const BUILTIN_GUIDE: &str = include_str!("guide.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "alta")]
    High,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "baixa")]
    Low,
}

/// One checklist step; `command` is absent for manual checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(alias = "comando", default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "esperado", default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl Step {
    pub fn manual(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn run(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            description: description.into(),
            expected: None,
        }
    }

    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record, Searchable)]
#[record(key = "noc-troubleshoots")]
#[serde(rename_all = "camelCase")]
pub struct TroubleshootItem {
    #[serde(default)]
    pub id: String,
    #[search]
    #[serde(alias = "titulo")]
    pub title: String,
    #[search]
    #[serde(alias = "categoria", default)]
    pub category: String,
    #[serde(alias = "severidade", default)]
    pub severity: Severity,
    #[search]
    #[serde(alias = "descricao", default)]
    pub description: String,
    #[serde(alias = "sintomas", default)]
    pub symptoms: Vec<String>,
    #[serde(alias = "passos", default)]
    pub steps: Vec<Step>,
    #[serde(alias = "equipamentos", default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// The shipped procedures. An unreadable embedded guide yields none.
pub fn builtin_items() -> Vec<TroubleshootItem> {
    match serde_json::from_str::<Vec<TroubleshootItem>>(BUILTIN_GUIDE) {
        Ok(items) => items
            .into_iter()
            .map(|mut item| {
                item.is_custom = false;
                item
            })
            .collect(),
        Err(err) => {
            warn!("embedded troubleshooting guide is invalid: {}", err);
            Vec::new()
        }
    }
}

pub struct TroubleshootGuide<'a, B> {
    store: &'a RecordStore<B>,
    builtin: Vec<TroubleshootItem>,
}

impl<'a, B: BlobStore> TroubleshootGuide<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self {
            store,
            builtin: builtin_items(),
        }
    }

    pub fn builtin(&self) -> &[TroubleshootItem] {
        &self.builtin
    }

    pub fn custom(&self) -> Vec<TroubleshootItem> {
        self.custom_collection().into_vec()
    }

    /// Builtin procedures followed by custom ones.
    pub fn all(&self) -> Vec<TroubleshootItem> {
        let mut all = self.builtin.clone();
        all.extend(self.custom());
        all
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.all()
            .into_iter()
            .filter_map(|item| seen.insert(item.category.clone()).then_some(item.category))
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<TroubleshootItem> {
        self.all()
            .into_iter()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        self.all()
            .iter()
            .fold(SeverityCounts::default(), |mut counts, item| {
                match item.severity {
                    Severity::High => counts.high += 1,
                    Severity::Medium => counts.medium += 1,
                    Severity::Low => counts.low += 1,
                }
                counts
            })
    }

    /// Fuzzy search over title, category and description.
    pub fn search(&self, text: &str) -> Vec<TroubleshootItem> {
        SearchIndex::build(self.all(), TroubleshootItem::FIELDS, DEFAULT_THRESHOLD)
            .query(text)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Store a user-defined procedure. The title is required.
    pub fn add_custom(&self, mut item: TroubleshootItem) -> Result<TroubleshootItem, FeatureError> {
        require("troubleshoot item", "title", &item.title)?;
        item.id.clear();
        item.is_custom = true;

        let mut collection = self.custom_collection();
        let stored = collection.push(item).clone();
        self.store.save(collection.as_slice())?;
        info!("added troubleshoot item {:?}", stored.title);
        Ok(stored)
    }

    /// Delete a custom procedure. Builtin procedures are read-only.
    pub fn remove_custom(&self, id: &str) -> Result<bool, FeatureError> {
        if self.builtin.iter().any(|item| item.id == id) {
            return Err(FeatureError::ReadOnly {
                key: TroubleshootItem::KEY,
                id: id.to_string(),
            });
        }
        Ok(self.store.collection::<TroubleshootItem>().delete(id)?)
    }

    fn custom_collection(&self) -> Collection<TroubleshootItem> {
        let items = self
            .store
            .load::<TroubleshootItem>()
            .into_iter()
            .map(|mut item| {
                item.is_custom = true;
                item
            })
            .collect();
        Collection::from_records(items)
    }
}
