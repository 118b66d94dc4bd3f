//! Marketplace configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                      | Default                          |
//! |-------------------------------|----------------------------------|
//! | `DATABASE_PATH`               | `./market_dev.db`                |
//! | `DB_MAX_CONNECTIONS`          | `5`                              |
//! | `DB_TRANSACTION_TIMEOUT_SECS` | `30`                             |
//! | `RUST_LOG`                    | `info,market=debug,sqlx=warn`    |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::pool::DbConfig;

pub const DEFAULT_LOG_FILTER: &str = "info,market=debug,sqlx=warn";

/// Runtime configuration for binaries embedding the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// SQLite file, or `:memory:`
    pub database_path: PathBuf,

    pub max_connections: u32,

    /// Upper bound for one product-creation transaction
    pub transaction_timeout: Duration,

    /// `tracing-subscriber` filter directives
    pub log_filter: String,
}

impl MarketConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, test maps).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = MarketConfig {
            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| "./market_dev.db".to_string())
                .into(),

            max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            transaction_timeout: lookup("DB_TRANSACTION_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue("DB_TRANSACTION_TIMEOUT_SECS".to_string()))?,

            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.transaction_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "DB_TRANSACTION_TIMEOUT_SECS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Pool configuration derived from these settings.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == ":memory:" {
            return DbConfig::in_memory().transaction_timeout(self.transaction_timeout);
        }

        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .transaction_timeout(self.transaction_timeout)
    }

    /// Installs the global `tracing` subscriber. Does nothing if one is
    /// already installed.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MarketConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.database_path, PathBuf::from("./market_dev.db"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.transaction_timeout, Duration::from_secs(30));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = MarketConfig::from_lookup(lookup(&[
            ("DATABASE_PATH", ":memory:"),
            ("DB_MAX_CONNECTIONS", "8"),
            ("DB_TRANSACTION_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        let db = config.db_config();
        assert!(db.is_in_memory());
        assert_eq!(db.transaction_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values() {
        let err = MarketConfig::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DB_MAX_CONNECTIONS");

        assert!(MarketConfig::from_lookup(lookup(&[("DB_TRANSACTION_TIMEOUT_SECS", "0")])).is_err());
    }
}
