//! Configuration handling
//!
//! User configuration is stored in `~/.config/stack-cli/config.toml`
//! (platform equivalent via `directories`). The document itself is found
//! by walking up from the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default document file name
pub const DEFAULT_FILE_NAME: &str = ".stack";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("No {0} file found in this directory or any parent. Run 'stack init' first.")]
    DocumentNotFound(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Name of the document file to look for
    pub file_name: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Combined configuration (global settings + discovered document)
#[derive(Debug, Clone)]
pub struct Config {
    pub global: GlobalConfig,
    pub document: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let document = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_document(&dir, &global.file_name));

        Ok(Self { global, document })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "stack", "stack-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        match Self::global_config_dir() {
            Some(dir) => Self::load_global_from(&dir.join("config.toml")),
            None => Ok(GlobalConfig::default()),
        }
    }

    /// Loads global configuration from a specific file
    ///
    /// A missing file yields the defaults.
    pub fn load_global_from(path: &Path) -> Result<GlobalConfig> {
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read global config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds the nearest document named `file_name` at or above `start`
    pub fn find_document(start: &Path, file_name: &str) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(file_name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the discovered document path, or an error if there is none
    pub fn require_document(&self) -> Result<&Path> {
        self.document
            .as_deref()
            .ok_or_else(|| ConfigError::DocumentNotFound(self.global.file_name.clone()).into())
    }
}
