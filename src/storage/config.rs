//! Configuration handling for the console
//!
//! Configuration is read from the first of:
//! 1. an explicit path (`--config`)
//! 2. `hbnb.toml` in the current directory
//! 3. `~/.config/hbnb/config.toml` (platform equivalent)
//!
//! Missing files fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "hbnb.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown before each interactive read
    pub prompt: String,

    /// JSONL file holding persisted instances
    pub storage_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "(hbnb) ".to_string(),
            storage_file: PathBuf::from("file.jsonl"),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::load_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_file(&local);
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => Self::load_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "hbnb", "hbnb").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }
}
