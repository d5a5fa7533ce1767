//! Configuration file.
//!
//! Read from `config.toml` in the platform config directory, or from the
//! path given with `--config`. A missing file means defaults; a file that
//! does not parse is reported and ignored.
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.local/share/toon"
//! key = "webtoon_user_state"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use toon_persistence::{STATE_KEY, default_config_dir, default_data_dir};

const CONFIG_FILENAME: &str = "config.toml";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
}

/// Where and under which key the reader state is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for the state file. Platform data directory when unset.
    pub data_dir: Option<PathBuf>,
    /// Key (file stem) the record is stored under.
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: STATE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Default location of the configuration file.
    pub fn config_path() -> Option<PathBuf> {
        default_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Load settings from `explicit`, or from the default location.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine config path, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve the data directory: command line, then config file, then platform default.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.storage.data_dir.clone())
            .or_else(default_data_dir)
            .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))
    }
}
