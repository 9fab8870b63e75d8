//! Runtime configuration read from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Paths left unset resolve into the platform data directory.

use crate::errors::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "chronicles.log";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `quests.txt` and `items.txt`.
    pub data_dir: Option<PathBuf>,
    /// Directory holding `<name>_save.txt` files.
    pub save_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "chronicles")
}

/// Platform location of `config.toml`, if a home directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn base_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl GameConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads an explicitly named file, or the platform default when it exists.
    /// An explicit path that cannot be read is an error; a missing default is not.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Command line flags win over the file.
    pub fn apply_overrides(&mut self, data_dir: Option<PathBuf>, save_dir: Option<PathBuf>) {
        if data_dir.is_some() {
            self.paths.data_dir = data_dir;
        }
        if save_dir.is_some() {
            self.paths.save_dir = save_dir;
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(|| base_data_dir().join("data"))
    }

    pub fn save_dir(&self) -> PathBuf {
        self.paths
            .save_dir
            .clone()
            .unwrap_or_else(|| base_data_dir().join("saves"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| base_data_dir().join(LOG_FILE_NAME))
    }

    /// Configured level, falling back to `info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
