use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Most children the service accepts in one append call.
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Integration token. `$VAR` and `~` are expanded on load.
    pub api_key: String,
    /// Page whose blocks are read and written back.
    pub page_id: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_batch_delay_ms() -> u64 {
    350
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn new(api_key: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            page_id: page_id.into(),
            notion_version: default_notion_version(),
            base_url: default_base_url(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables so the token can live in the environment
        config.api_key = Self::expand(&config.api_key).unwrap_or(config.api_key);

        Ok(Some(config))
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/notion-mathsync");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("api_key is empty".to_string()));
        }
        if self.api_key.starts_with('$') {
            return Err(ConfigError::Invalid(format!(
                "api_key {} was not expanded; is the variable set?",
                self.api_key
            )));
        }
        if self.page_id.trim().is_empty() {
            return Err(ConfigError::Invalid("page_id is empty".to_string()));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(ConfigError::Invalid(format!(
                "batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn expand(value: &str) -> Option<String> {
        shellexpand::full(value).ok().map(|v| v.into_owned())
    }
}
