//! Bridge connection settings
//!
//! Settings live in a `.toml` or `.json` file (by default
//! `<config dir>/woodshop/bridge.toml`). The shared secret may also come from
//! the `WOODSHOP_BRIDGE_SECRET` environment variable, which wins over the file.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the shared secret.
pub const SECRET_ENV: &str = "WOODSHOP_BRIDGE_SECRET";

/// Smallest accepted receive buffer (bytes).
pub const MIN_BUFFER_SIZE: usize = 1024;

/// Where and how to reach the modeling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    /// Connect and read timeout in seconds
    pub timeout_secs: f64,
    /// Extra attempts after a dropped connection
    pub max_retries: u32,
    /// Receive chunk size in bytes
    pub buffer_size: usize,
    /// Sent as a `{"secret": ...}` line after connecting when non-empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_secret: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9876,
            timeout_secs: 15.0,
            max_retries: 2,
            buffer_size: 8192,
            auth_secret: String::new(),
        }
    }
}

impl BridgeConfig {
    /// `host:port` as passed to the socket layer.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }

    /// Default settings file location, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("woodshop").join("bridge.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Load `path` if given, else the default file if it exists, else the
    /// built-in defaults. The secret environment variable is applied last.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    tracing::debug!("Loading bridge config from {}", path.display());
                    Self::load_from_file(&path)?
                }
                None => Self::default(),
            },
        };
        Ok(config.with_secret_override(std::env::var(SECRET_ENV).ok()))
    }

    /// Replace the secret with `secret` when it is set and non-empty.
    pub fn with_secret_override(mut self, secret: Option<String>) -> Self {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.auth_secret = secret;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "host",
                reason: "must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "port",
                reason: "must be > 0".to_string(),
            });
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                key: "timeout_secs",
                reason: format!("must be > 0, got {}", self.timeout_secs),
            });
        }
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(ConfigError::InvalidSetting {
                key: "buffer_size",
                reason: format!("must be at least {} bytes", MIN_BUFFER_SIZE),
            });
        }
        Ok(())
    }
}
