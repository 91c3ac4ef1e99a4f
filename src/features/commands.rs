//! Command lookup: builtin commands from a static document merged with the
//! user's custom commands, searchable as one set.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require;
use crate::blob::BlobStore;
use crate::config::ToolkitConfig;
use crate::error::{FeatureError, SourceError};
use crate::favorites::Favorites;
use crate::search::{SearchIndex, DEFAULT_THRESHOLD};
use crate::store::{Collection, RecordStore};
use crate::{Record, Searchable};

/// Where a command came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Shipped in the static default-data document. Read-only.
    Builtin,
    /// Added by the user and stored under `noc-custom-commands`.
    #[default]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record, Searchable)]
#[record(key = "noc-custom-commands")]
pub struct Command {
    #[serde(default)]
    pub id: String,
    #[search]
    #[serde(alias = "comando")]
    pub command: String,
    #[search]
    #[serde(alias = "dispositivo", default)]
    pub device: String,
    #[search]
    #[serde(alias = "protocolo", default)]
    pub protocol: String,
    #[search]
    #[serde(alias = "tarefa", default)]
    pub task: String,
    #[search]
    #[serde(alias = "descricao", default)]
    pub description: String,
    #[serde(default)]
    pub origin: Origin,
}

impl Command {
    pub fn new(command: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            command: command.into(),
            device: device.into(),
            protocol: String::new(),
            task: String::new(),
            description: String::new(),
            origin: Origin::Custom,
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Id derived from the command's content, so it survives reordering of the
/// source document.
pub fn stable_id(device: &str, command: &str) -> String {
    let name = format!("{}\n{}", device.trim().to_lowercase(), command.trim());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

fn with_stable_id(mut command: Command) -> Command {
    if command.id.is_empty() {
        command.id = stable_id(&command.device, &command.command);
    }
    command
}

/// Builtin and custom commands, with search and favorites.
pub struct CommandCatalog<'a, B> {
    store: &'a RecordStore<B>,
    builtin: Vec<Command>,
    threshold: f64,
}

impl<'a, B: BlobStore> CommandCatalog<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self {
            store,
            builtin: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// A catalog using the configured search threshold, with the builtin
    /// commands loaded from `commands_path` when one is set.
    pub fn from_config(
        store: &'a RecordStore<B>,
        config: &ToolkitConfig,
    ) -> Result<Self, SourceError> {
        let mut catalog = Self::new(store).with_threshold(config.search.threshold);
        if let Some(path) = &config.commands_path {
            catalog.load_builtin_from_path(path)?;
        }
        Ok(catalog)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Load the builtin commands from a JSON array. On failure the builtin
    /// set is left empty and the error is returned for the caller to report.
    pub fn load_builtin_from_str(&mut self, json: &str) -> Result<usize, SourceError> {
        self.builtin.clear();
        let parsed: Vec<Command> =
            serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))?;

        let mut seen = HashSet::new();
        self.builtin = parsed
            .into_iter()
            .map(|mut command| {
                // builtin ids always come from content, whatever the document says
                command.id = stable_id(&command.device, &command.command);
                command.origin = Origin::Builtin;
                command
            })
            .filter(|command| {
                let fresh = seen.insert(command.id.clone());
                if !fresh {
                    warn!(
                        "duplicate builtin command {:?} for {:?}",
                        command.command, command.device
                    );
                }
                fresh
            })
            .collect();
        info!("loaded {} builtin commands", self.builtin.len());
        Ok(self.builtin.len())
    }

    /// Read and load the builtin commands document at `path`. No retry.
    pub fn load_builtin_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, SourceError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            self.builtin.clear();
            SourceError::Io(format!("{}: {}", path.display(), e))
        })?;
        self.load_builtin_from_str(&json)
    }

    pub fn builtin(&self) -> &[Command] {
        &self.builtin
    }

    /// The user's commands. Entries stored without an id get a stable one.
    pub fn custom(&self) -> Vec<Command> {
        self.custom_collection().into_vec()
    }

    /// Builtin commands followed by custom ones.
    pub fn all(&self) -> Vec<Command> {
        let mut all = self.builtin.clone();
        all.extend(self.custom());
        all
    }

    /// Store a new custom command. The command text is required.
    pub fn add_custom(&self, mut command: Command) -> Result<Command, FeatureError> {
        require("command", "command", &command.command)?;
        command.origin = Origin::Custom;
        command.id.clear();

        let mut collection = self.custom_collection();
        let stored = collection.push(command).clone();
        self.store.save(collection.as_slice())?;
        info!("added custom command {:?}", stored.command);
        Ok(stored)
    }

    /// Delete a custom command. Builtin commands are not affected.
    pub fn remove_custom(&self, id: &str) -> Result<bool, FeatureError> {
        let mut collection = self.custom_collection();
        if collection.remove(id).is_none() {
            return Ok(false);
        }
        self.store.save(collection.as_slice())?;
        Ok(true)
    }

    /// A fresh index over every command. Rebuild after any change.
    pub fn index(&self) -> SearchIndex<Command> {
        SearchIndex::build(self.all(), Command::FIELDS, self.threshold)
    }

    /// Ranked fuzzy search over all commands; blank text returns all.
    pub fn search(&self, text: &str) -> Vec<Command> {
        self.index().query(text).into_iter().cloned().collect()
    }

    /// Commands for one device vendor, case-insensitively.
    pub fn by_device(&self, device: &str) -> Vec<Command> {
        self.all()
            .into_iter()
            .filter(|c| c.device.eq_ignore_ascii_case(device))
            .collect()
    }

    /// Distinct device names in first-seen order.
    pub fn devices(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.all()
            .into_iter()
            .filter_map(|c| seen.insert(c.device.to_lowercase()).then_some(c.device))
            .collect()
    }

    pub fn favorites(&self) -> Favorites<'a, B> {
        Favorites::new(self.store)
    }

    /// Commands whose text is in the favorites set.
    pub fn favorite_commands(&self) -> Vec<Command> {
        let favorites = self.favorites().load();
        self.all()
            .into_iter()
            .filter(|c| favorites.contains(&c.command))
            .collect()
    }

    fn custom_collection(&self) -> Collection<Command> {
        let records = self
            .store
            .load::<Command>()
            .into_iter()
            .map(|mut command| {
                command.origin = Origin::Custom;
                with_stable_id(command)
            })
            .collect();
        Collection::from_records(records)
    }
}
