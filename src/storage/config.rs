//! Configuration handling
//!
//! Configuration is read from `config.toml` in the platform config
//! directory (e.g. `~/.config/todo-cli/config.toml`), or from an explicit
//! path. Command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::json_file::DEFAULT_TASKS_FILE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// How completion flags are drawn in tables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlyphStyle {
    /// ✅ / ❌
    #[default]
    Emoji,
    /// yes / no
    Plain,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Task file location (default: `tasks.json` in the working directory)
    pub tasks_file: Option<PathBuf>,

    /// Completion glyph style
    pub glyphs: GlyphStyle,

    /// Clear the terminal before rendering the list or a task
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: None,
            glyphs: GlyphStyle::Emoji,
            clear_screen: true,
        }
    }
}

impl Config {
    /// Loads configuration from `explicit` if given, otherwise from the
    /// global config file. A missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::global_config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todo", "todo-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the effective task file path
    pub fn tasks_path(&self) -> PathBuf {
        self.tasks_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE))
    }
}
