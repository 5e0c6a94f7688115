//! Service configuration.
//!
//! Loaded from a YAML file:
//!
//! ```yaml
//! env: "dev"
//! storage_path: "storage/storage.db"
//! http_server:
//!   address: "localhost:8082"
//! ```
//!
//! The file path comes from `CONFIG_PATH`, falling back to the `--config`
//! flag. The `ENV` environment variable overrides `env`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides [`AppConfig::env`].
pub const ENV_VAR: &str = "ENV";

/// Environment variable naming the config file. Takes precedence over the
/// command-line flag.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Picks the config file path: a non-empty `CONFIG_PATH` value first, then the flag.
pub fn resolve_config_path(env_value: Option<OsString>, flag: Option<PathBuf>) -> Option<PathBuf> {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or(flag)
}

/// [`resolve_config_path`] against the process environment.
pub fn config_path_from_env(flag: Option<PathBuf>) -> Option<PathBuf> {
    resolve_config_path(std::env::var_os(CONFIG_PATH_VAR), flag)
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config path is missing")]
    MissingPath,

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("config file read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("config file parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config field \"{0}\" is required")]
    MissingField(&'static str),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpServerConfig {
    /// Address to bind to (default: "localhost:8082")
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_address() -> String {
    "localhost:8082".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Deployment name, e.g. "dev" or "production". Required.
    #[serde(default)]
    pub env: String,

    /// SQLite database file. Required.
    #[serde(default)]
    pub storage_path: PathBuf,

    #[serde(default)]
    pub http_server: HttpServerConfig,
}

impl AppConfig {
    /// Loads, overrides from the process environment, and validates.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let path = path.ok_or(ConfigError::MissingPath)?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses YAML without validating.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(env) = lookup(ENV_VAR).filter(|v| !v.is_empty()) {
            self.env = env;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.env.is_empty() {
            return Err(ConfigError::MissingField("env"));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("storage_path"));
        }
        if self.http_server.address.is_empty() {
            return Err(ConfigError::MissingField("http_server.address"));
        }
        Ok(())
    }
}
