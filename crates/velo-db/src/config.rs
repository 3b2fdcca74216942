//! # Database Configuration
//!
//! Pool settings, built in code or loaded from the environment.
//!
//! ## Environment Variables
//! - `VELO_DB_PATH`: SQLite file path (default: `./velo.db`)
//! - `VELO_DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `VELO_DB_CONNECT_TIMEOUT_SECS`: acquire timeout (default: 30)

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/velo.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// open for the life of the pool.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    pub const DEFAULT_PATH: &'static str = "./velo.db";

    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// A single connection that never idles out: the database lives exactly
    /// as long as that connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(":memory:")
    }

    /// Loads configuration from `VELO_DB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("VELO_DB_PATH").unwrap_or_else(|| Self::DEFAULT_PATH.to_string());
        if path.trim().is_empty() {
            return Err(ConfigError::InvalidValue("VELO_DB_PATH".to_string()));
        }

        let mut config = if path == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(path)
        };

        if let Some(raw) = lookup("VELO_DB_MAX_CONNECTIONS") {
            let max: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VELO_DB_MAX_CONNECTIONS".to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue("VELO_DB_MAX_CONNECTIONS".to_string()));
            }
            config.max_connections = max;
            config.min_connections = config.min_connections.min(max);
        }

        if let Some(raw) = lookup("VELO_DB_CONNECT_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("VELO_DB_CONNECT_TIMEOUT_SECS".to_string())
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
