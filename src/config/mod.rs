//! Configuration management for varitable.
//!
//! Settings are stored as TOML in the platform config directory. Table
//! contents are never persisted; only preferences live here.

mod settings;

pub use settings::Settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("could not create configuration directory: {0}")]
    CreateDirError(String),

    /// The configuration file could not be read.
    #[error("could not read configuration file: {0}")]
    ReadError(String),

    /// The configuration file could not be written.
    #[error("could not write configuration file: {0}")]
    WriteError(String),

    /// The configuration file contents are not valid TOML.
    #[error("could not parse configuration file: {0}")]
    ParseError(String),

    /// The configuration could not be serialized.
    #[error("could not serialize configuration: {0}")]
    SerializeError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default path.
    ///
    /// A missing file yields the default configuration; a malformed one is
    /// an error so a typo does not silently reset preferences.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save the configuration to the default path, creating the directory
    /// if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError(e.to_string()))?;
        }
        self.save_to(&path)
    }

    /// Save the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    /// The path of the configuration file.
    pub fn config_file_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("varitable").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.settings.theme, "dark");
        assert!(config.settings.vim_mode);
        assert!(config.settings.image_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.theme = "light".to_string();
        config.settings.vim_mode = false;
        config.settings.image_dir = Some(PathBuf::from("/tmp/images"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = not valid toml {").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ntheme = \"light\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.theme, "light");
        assert!(config.settings.vim_mode);
    }

    #[test]
    fn test_config_file_path_structure() {
        let path = Config::config_file_path().unwrap();
        assert!(path.ends_with("varitable/config.toml"));
    }
}
