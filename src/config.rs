//! Toolkit configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! is a valid configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// File backing the [`FileBlobStore`](crate::FileBlobStore).
    pub data_path: PathBuf,
    /// Static JSON document with the builtin commands, if any.
    pub commands_path: Option<PathBuf>,
    pub search: SearchConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("noc-data.json"),
            commands_path: None,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum admitted match score, 0.0 (exact) to 1.0 (anything).
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ToolkitConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a JSON file. Relative paths inside the file are resolved
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_json(&contents)?;

        if let Some(base) = path.parent() {
            config.data_path = resolve(base, &config.data_path);
            config.commands_path = config.commands_path.map(|p| resolve(base, &p));
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(message) => write!(f, "config I/O error: {}", message),
            ConfigError::Parse(message) => write!(f, "config parse error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}
