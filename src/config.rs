//! Configuration management for aircheck_fetcher
//!
//! TOML configuration with zero-config defaults: every field has a default,
//! a missing config file is fine, and an explicit `--config` path must exist
//! and parse. The file lives under the platform config directory unless
//! overridden.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::ClientConfig;
use crate::constants::{api, http, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Schedule API endpoints
    pub api: ApiConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Endpoint overrides; defaults target the FM4 audio API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Broadcast schedule base URL
    pub base_url: String,
    /// Playback base URL the raw stream id is appended to
    pub loop_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            loop_base_url: api::LOOP_BASE_URL.to_string(),
        }
    }
}

/// TOML-friendly HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Maximum connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            tcp_nodelay: true,
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfigToml {
    /// Convert to the runtime client configuration
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_max_per_host: self.pool_max_per_host,
            ..ClientConfig::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// path is read when present, otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Default configuration file location under the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aircheck_fetcher").join("config.toml"))
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
