use crate::rows::reducer::RemovePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_KEYS: &[&str] = &["seed_file", "remove_policy"];

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<String>,
    #[serde(default)]
    pub remove_policy: RemovePolicy,
}

impl Config {
    /// Loads the user config, falling back to defaults when none exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "seed_file" => {
                self.seed_file = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "remove_policy" => {
                self.remove_policy = value
                    .parse::<RemovePolicy>()
                    .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "seed_file" => Ok(self.seed_file.clone().unwrap_or_default()),
            "remove_policy" => Ok(self.remove_policy.to_string()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}

pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("rowstack").join("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Unknown configuration key '{0}'. Supported keys: seed_file, remove_policy")]
    UnknownKey(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.remove_policy, RemovePolicy::Strict);
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("seed_file", "/tmp/rows.toml").unwrap();
        config.set("remove_policy", "best-effort").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.seed_file.as_deref(), Some("/tmp/rows.toml"));
        assert_eq!(loaded.remove_policy, RemovePolicy::BestEffort);
    }

    #[test]
    fn test_parse_policy_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "remove_policy = \"best-effort\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.remove_policy, RemovePolicy::BestEffort);
        assert_eq!(config.get("seed_file").unwrap(), "");
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "remove_policy = \"sometimes\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_value() {
        let mut config = Config::default();
        assert!(matches!(config.set("colour", "red"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            config.set("remove_policy", "lenient"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(config.get("colour"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_empty_seed_file_clears_it() {
        let mut config = Config::default();
        config.set("seed_file", "rows.toml").unwrap();
        config.set("seed_file", "").unwrap();
        assert!(config.seed_file.is_none());
    }
}
