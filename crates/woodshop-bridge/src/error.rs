//! Error types for the bridge crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the modeling application.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No connection could be opened.
    #[error("Could not connect to the modeling application at {addr}: {reason}")]
    Connection { addr: String, reason: String },

    /// The connection kept failing after every retry.
    #[error("Connection lost after {attempts} attempts: {reason}")]
    ConnectionLost { attempts: u32, reason: String },

    /// Nothing arrived before the read timeout.
    #[error("Timed out after {secs}s waiting for a response")]
    Timeout { secs: f64 },

    /// The application answered with a JSON-RPC error.
    #[error("Remote error: {0}")]
    Remote(String),

    /// The reply was not a complete JSON document.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Socket I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A request could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether the application could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            BridgeError::Connection { .. } | BridgeError::ConnectionLost { .. }
        )
    }
}

/// Errors loading, saving or validating [`crate::BridgeConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only `.json` and `.toml` files are understood.
    #[error("Config file must be .json or .toml: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to serialize TOML config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

/// Result type alias for transport operations.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
