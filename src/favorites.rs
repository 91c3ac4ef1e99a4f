//! Favorite commands, keyed by command text.

use log::debug;

use crate::blob::BlobStore;
use crate::error::StoreError;
use crate::store::{keys, RecordStore};

/// Set of favorite command texts that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    commands: Vec<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, dropping repeated entries.
    pub fn from_list(list: Vec<String>) -> Self {
        let mut set = Self::new();
        for command in list {
            if !set.contains(&command) {
                set.commands.push(command);
            }
        }
        set
    }

    /// Flip membership of `command`. Returns true if it is now a favorite.
    pub fn toggle(&mut self, command: &str) -> bool {
        match self.commands.iter().position(|c| c == command) {
            Some(index) => {
                self.commands.remove(index);
                false
            }
            None => {
                self.commands.push(command.to_string());
                true
            }
        }
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.commands
    }
}

/// Favorites persisted under [`keys::FAVORITES`] as a JSON array of strings.
pub struct Favorites<'a, B> {
    store: &'a RecordStore<B>,
}

impl<'a, B: BlobStore> Favorites<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> FavoritesSet {
        FavoritesSet::from_list(self.store.load_key(keys::FAVORITES))
    }

    /// Toggle `command` and persist the whole set. Returns the new membership.
    pub fn toggle(&self, command: &str) -> Result<bool, StoreError> {
        let mut set = self.load();
        let now_favorite = set.toggle(command);
        self.store.save_key(keys::FAVORITES, set.as_slice())?;
        debug!(
            "{} favorites: {}",
            if now_favorite { "added to" } else { "removed from" },
            command
        );
        Ok(now_favorite)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.load().contains(command)
    }
}
