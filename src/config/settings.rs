use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub tool: ToolConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolConfig {
    /// Full path to the TFVC client. When unset, `tf` is resolved from PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BehaviorConfig {
    pub log_commands: bool,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("tfvc"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Err(ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Config file not found",
            )));
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;

        // Validate config
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        // Validate before saving
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)?;

        fs::write(&path, contents)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            tool: ToolConfig { location: None },
            behavior: BehaviorConfig { log_commands: true },
        }
    }

    /// The configured tool location, or `tf` from PATH
    pub fn tool_location(&self) -> PathBuf {
        self.tool
            .location
            .clone()
            .unwrap_or_else(|| PathBuf::from("tf"))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(location) = &self.tool.location {
            if location.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "tool.location must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert!(config.tool.location.is_none());
        assert_eq!(config.tool_location(), PathBuf::from("tf"));
        assert!(config.behavior.log_commands);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_location() {
        let mut config = Config::default_config();
        config.tool.location = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_location_wins() {
        let mut config = Config::default_config();
        config.tool.location = Some(PathBuf::from("/opt/tee-clc/tf"));
        assert_eq!(config.tool_location(), PathBuf::from("/opt/tee-clc/tf"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = Config::default_config();
        config.tool.location = Some(PathBuf::from("/opt/tee-clc/tf"));

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.tool.location, parsed.tool.location);
        assert_eq!(config.behavior.log_commands, parsed.behavior.log_commands);
    }

    #[test]
    fn test_deserialize_without_location() {
        let parsed: Config = toml::from_str(
            "[tool]\n\
             \n\
             [behavior]\n\
             log_commands = false\n",
        )
        .unwrap();
        assert!(parsed.tool.location.is_none());
        assert!(!parsed.behavior.log_commands);
    }
}
