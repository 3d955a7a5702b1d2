//! Configuration persistence utilities
//!
//! Loads and saves the dial's scale settings to a TOML file in the platform
//! config directory. The selected value itself is never persisted.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Get the base configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "bearing-dial", "dial").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a named settings group
pub fn config_path(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", name)))
}

/// Load a settings group
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save a settings group
pub fn save_config<T: Serialize>(name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_config_path() {
        let path = config_path("bearing_dial");
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("bearing_dial.toml"));
    }
}
