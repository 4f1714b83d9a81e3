//! Configuration module for the moji CLI.
//!
//! This module handles loading, saving, and managing configuration
//! settings for the moji application.

use dirs::{config_dir, data_local_dir, home_dir, state_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MojiError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "moji.toml";

/// Directory name used under the config and state directories.
pub const APP_DIR_NAME: &str = "moji";

/// GitHub "latest release" endpoint of the CLDR JSON distribution.
pub const DEFAULT_FEED_URL: &str =
    "https://api.github.com/repos/unicode-org/cldr-json/releases/latest";

/// Raw-content root the annotation files are served from, by tag.
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com/unicode-org/cldr-json";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Reference table location and provisioning.
    #[serde(default)]
    pub table: TableConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Reference table configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableConfig {
    /// Explicit table path. When unset the table lives in the state
    /// directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// CLDR locale of the annotations.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Release feed queried for the latest tag.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Base URL the annotation file is downloaded from.
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Scanner configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanSettings {
    /// Character that opens and closes a short code.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_raw_base_url() -> String {
    DEFAULT_RAW_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_delimiter() -> char {
    moji_scan::DEFAULT_DELIMITER as char
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: None,
            locale: default_locale(),
            feed_url: default_feed_url(),
            raw_base_url: default_raw_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl TableConfig {
    /// Where the reference table is read from.
    ///
    /// The explicit path wins; otherwise
    /// `<state dir>/moji/annotations-<locale>.json`.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        state_dir()
            .or_else(data_local_dir)
            .map(|dir| {
                dir.join(APP_DIR_NAME)
                    .join(format!("annotations-{}.json", self.locale))
            })
            .ok_or_else(|| {
                MojiError::Config(
                    "no state directory available; set table.path or --table".to_string(),
                )
            })
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. User's home directory
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MojiError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MojiError::Config(format!("Failed to parse configuration: {}", e)))?;

        Ok(config)
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
