//! Server configuration.
//!
//! Loadable from TOML; every field has a default, so an empty document is a
//! valid config:
//!
//! ```toml
//! bind = "0.0.0.0:8080"
//! path = "/rpc"
//! body_limit = 2097152
//! read_timeout_ms = 5000
//! write_timeout_ms = 10000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default command path.
pub const DEFAULT_PATH: &str = "/";

/// Default maximum size of a command body (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Default time allowed for reading a command body, in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 5_000;

/// Default time allowed for a whole exchange, in milliseconds.
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 10_000;

/// Where the server listens and which path carries commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Socket address for [`Server::start`](crate::Server::start).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The single command path. Always starts with `/` once normalized.
    #[serde(default = "default_path")]
    pub path: String,
    /// Maximum number of bytes read from a command body, JSON or multipart.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
    /// Reading and decoding the body must finish within this many
    /// milliseconds, or the request gets 422.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// The response must be ready within this many milliseconds, or the
    /// request gets 503.
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

fn default_write_timeout_ms() -> u64 {
    DEFAULT_WRITE_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            path: default_path(),
            body_limit: default_body_limit(),
            read_timeout_ms: default_read_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

impl Config {
    /// Create a config for `bind` and `path`. `path` gains a leading `/` if
    /// it lacks one.
    pub fn new(bind: impl Into<String>, path: impl AsRef<str>) -> Self {
        Self {
            bind: bind.into(),
            path: normalize_path(path.as_ref()),
            ..Self::default()
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn with_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout_ms = duration_ms(read);
        self.write_timeout_ms = duration_ms(write);
        self
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        Ok(config.normalized())
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Return the config with its path normalized.
    pub fn normalized(mut self) -> Self {
        self.path = normalize_path(&self.path);
        self
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Prefix `path` with `/` unless it already starts with one.
///
/// An empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
