//! User configuration
//!
//! Read from `~/.config/kanamate/config.toml` by default. Every field is
//! optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modes::ReviewMode;
use crate::progress::algorithm::DEFAULT_BATCH_LIMIT;

const APP_DIR: &str = "kanamate";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where progress is stored (default: platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// File name of the progress blob inside the data dir
    pub progress_file: String,
    /// Kana per review session
    pub batch_limit: usize,
    /// Mode a new process starts in
    pub initial_mode: ReviewMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            progress_file: "progress.json".to_string(),
            batch_limit: DEFAULT_BATCH_LIMIT,
            initial_mode: ReviewMode::Priority,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Parse a config file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        if config.batch_limit == 0 {
            log::warn!("batch_limit of 0 ignored, using {}", DEFAULT_BATCH_LIMIT);
            config.batch_limit = DEFAULT_BATCH_LIMIT;
        }
        Ok(config)
    }

    /// Like [`load`](Self::load) but falls back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }

    /// Full path of the progress blob
    pub fn progress_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.progress_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.batch_limit, 20);
        assert_eq!(config.progress_file, "progress.json");
        assert_eq!(config.initial_mode, ReviewMode::Priority);
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("batch_limit = 10\ninitial_mode = \"sequential\"\n").unwrap();
        assert_eq!(config.batch_limit, 10);
        assert_eq!(config.initial_mode, ReviewMode::Sequential);
        assert_eq!(config.progress_file, "progress.json");
    }

    #[test]
    fn test_zero_batch_limit_falls_back() {
        let config = Config::parse("batch_limit = 0").unwrap();
        assert_eq!(config.batch_limit, DEFAULT_BATCH_LIMIT);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("batch_limit = \"lots\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "initial_mode = 5").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_progress_path_uses_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(
            config.progress_path().unwrap(),
            temp_dir.path().join("progress.json")
        );
    }
}
