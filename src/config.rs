//! Configuration management for rotolog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogLevel;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Live log file; rotated files are written next to it
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Number of rotated files to keep besides the live one (default: 5, 0 disables rotation)
    #[serde(default = "default_rotation_count")]
    pub rotation_count: u32,

    /// Threshold level: "off", "fatal", "error", "warning", "info" (default) or "debug"
    #[serde(default = "default_level")]
    pub level: LogLevel,
}

fn default_log_file() -> PathBuf {
    logs_dir().join("rotolog.log")
}

fn default_rotation_count() -> u32 {
    5
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            rotation_count: default_rotation_count(),
            level: default_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.rotolog)
/// Falls back to ./.rotolog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".rotolog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".rotolog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rotation_count, 5);
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.log_file.ends_with("logs/rotolog.log"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            log_file: PathBuf::from("/var/log/app.log"),
            rotation_count: 3,
            level: LogLevel::Warning,
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("level = \"warning\""));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let parsed: Config = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Warning);
        assert_eq!(parsed.rotation_count, 5);
        assert_eq!(parsed.log_file, Config::default().log_file);
    }

    #[test]
    fn test_config_level_aliases_match_parsing() {
        for name in ["none", "off", "warn", "warning"] {
            let parsed: Config = toml::from_str(&format!("level = \"{}\"", name)).unwrap();
            assert_eq!(parsed.level, name.parse::<LogLevel>().unwrap());
        }
    }

    #[test]
    fn test_config_rejects_unknown_level() {
        assert!(toml::from_str::<Config>("level = \"verbose\"").is_err());
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let config = Config {
            log_file: temp_dir.path().join("logs/app.log"),
            rotation_count: 0,
            level: LogLevel::Debug,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_invalid_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "rotation_count = \"many\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".rotolog"));
    }
}
