use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clients::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
use crate::errors::ConfigurationError;
use crate::request::Level;

/// Keys accepted by [`Config::get_value`] and [`Config::set_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "bark.key",
    "bark.server_url",
    "bark.timeout_secs",
    "defaults.group",
    "defaults.sound",
    "defaults.level",
    "defaults.icon",
    "logging.log_level",
    "logging.log_path",
];

/// Persisted configuration, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bark: BarkConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarkConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Values applied to a notification when the caller leaves them unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub group: Option<String>,
    pub sound: Option<String>,
    pub level: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub log_path: Option<String>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BarkConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_path: None,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Config {
    /// Read a value by dotted key; unset optional values read as an empty string
    pub fn get_value(&self, key: &str) -> Result<String, ConfigurationError> {
        let value = match key {
            "bark.key" => self.bark.key.clone(),
            "bark.server_url" => self.bark.server_url.clone(),
            "bark.timeout_secs" => self.bark.timeout_secs.to_string(),
            "defaults.group" => self.defaults.group.clone().unwrap_or_default(),
            "defaults.sound" => self.defaults.sound.clone().unwrap_or_default(),
            "defaults.level" => self.defaults.level.clone().unwrap_or_default(),
            "defaults.icon" => self.defaults.icon.clone().unwrap_or_default(),
            "logging.log_level" => self.logging.log_level.clone(),
            "logging.log_path" => self.logging.log_path.clone().unwrap_or_default(),
            _ => {
                return Err(ConfigurationError::UnknownKey {
                    key: key.to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Set a value by dotted key. An empty value clears optional settings.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidValue {
            key: key.to_string(),
            reason,
        };

        match key {
            "bark.key" => self.bark.key = value.to_string(),
            "bark.server_url" => {
                self.bark.server_url = if value.is_empty() {
                    default_server_url()
                } else {
                    value.to_string()
                }
            }
            "bark.timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|e| invalid(format!("expected whole seconds: {e}")))?;
                if secs == 0 {
                    return Err(invalid("timeout must be at least 1 second".to_string()));
                }
                self.bark.timeout_secs = secs;
            }
            "defaults.group" => self.defaults.group = optional(value),
            "defaults.sound" => self.defaults.sound = optional(value),
            "defaults.level" => {
                if !value.is_empty() {
                    value
                        .parse::<Level>()
                        .map_err(|e| invalid(e.to_string()))?;
                }
                self.defaults.level = optional(value);
            }
            "defaults.icon" => self.defaults.icon = optional(value),
            "logging.log_level" => {
                if value.parse::<tracing::Level>().is_err() {
                    return Err(invalid(
                        "expected one of: trace, debug, info, warn, error".to_string(),
                    ));
                }
                self.logging.log_level = value.to_string();
            }
            "logging.log_path" => self.logging.log_path = optional(value),
            _ => {
                return Err(ConfigurationError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Configuration manager for the bark CLI
///
/// Loads and saves the TOML configuration file. The default location is
/// `<config dir>/bark/config.toml` (e.g. `~/.config/bark/config.toml` on Linux);
/// an explicit path overrides it.
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Load configuration from `config_path` (or the default location).
    ///
    /// A missing file yields the default configuration in memory; nothing is
    /// written until [`save`](Self::save) or [`init`](Self::init) is called.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigurationError> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        let config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            Config::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Write a default configuration file.
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn init(config_path: Option<PathBuf>, force: bool) -> Result<Self, ConfigurationError> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if config_path.exists() && !force {
            return Err(ConfigurationError::ConfigFile {
                path: config_path,
                operation: "initialize (file exists, use --force to overwrite)".to_string(),
                source: None,
            });
        }

        let manager = Self {
            config_path,
            config: Config::default(),
        };
        manager.save()?;
        Ok(manager)
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigurationError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigurationError::NoConfigDir)?;
        Ok(base_dirs.config_dir().join("bark").join("config.toml"))
    }

    fn read(path: &Path) -> Result<Config, ConfigurationError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigurationError::ConfigFile {
            path: path.to_path_buf(),
            operation: "read".to_string(),
            source: Some(Box::new(e)),
        })?;
        toml::from_str(&content).map_err(|e| ConfigurationError::ConfigFile {
            path: path.to_path_buf(),
            operation: "parse".to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Saves the current configuration to disk, creating parent directories
    pub fn save(&self) -> Result<(), ConfigurationError> {
        let file_error = |operation: &str, e: Box<dyn std::error::Error + Send + Sync>| {
            ConfigurationError::ConfigFile {
                path: self.config_path.clone(),
                operation: operation.to_string(),
                source: Some(e),
            }
        };

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| file_error("create config directory", Box::new(e)))?;
            }
        }

        let content =
            toml::to_string_pretty(&self.config).map_err(|e| file_error("serialize", Box::new(e)))?;
        fs::write(&self.config_path, content).map_err(|e| file_error("write", Box::new(e)))?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// After modifying the configuration, call [`save()`](Self::save) to persist changes.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
