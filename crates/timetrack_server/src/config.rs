//! Server configuration loaded from TOML.
//!
//! # Invariants
//! - A missing config file yields defaults; an unreadable or malformed one is an error.
//! - `CLOCKIFY_API_KEY` in the environment overrides `[clockify].api_key`.
//! - Relative paths resolve against the directory holding the config file.

use serde::Deserialize;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use timetrack_core::sync::ClockifyConfig;

pub const CONFIG_PATH_ENV: &str = "TIMETRACK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "timetrack.toml";
pub const CLOCKIFY_API_KEY_ENV: &str = "CLOCKIFY_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config invalid: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] timetrack_core::DbError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub clockify: ClockifyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "timetrack.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// Directory for rolling log files; stderr only when unset.
    pub dir: Option<String>,
}

impl ServerConfig {
    /// Reads `path`, falling back to defaults when it does not exist.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match tokio::fs::read_to_string(path).await {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(config.with_api_key_override(std::env::var(CLOCKIFY_API_KEY_ENV).ok()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the Clockify key when `api_key` is set and non-blank.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.clockify.api_key = Some(key);
        }
        self
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http.host, self.http.port)
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("invalid http bind: {err}")))
    }

    pub fn database_path(&self, config_path: &Path) -> PathBuf {
        let raw = self.database.path.trim();
        if raw.is_empty() {
            return base_dir(config_path).join(DatabaseConfig::default().path);
        }
        resolve(config_path, raw)
    }

    /// Absolute log directory, since the logger rejects relative paths.
    pub fn log_dir(&self, config_path: &Path) -> Result<Option<PathBuf>, ConfigError> {
        let Some(raw) = self
            .logging
            .dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
        else {
            return Ok(None);
        };

        let resolved = resolve(config_path, raw);
        if resolved.is_absolute() {
            return Ok(Some(resolved));
        }
        Ok(Some(std::env::current_dir()?.join(resolved)))
    }
}

fn base_dir(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn resolve(config_path: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir(config_path).join(path)
    }
}
