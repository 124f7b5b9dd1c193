//! Configuration Module
//!
//! Handles loading and managing daemon configuration from environment variables.

use std::env;

use crate::error::{Result, TableError};
use crate::table::DEFAULT_MIN_LIMIT;

/// Daemon configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Requested table capacity
    pub limit: usize,
    /// Floor the requested capacity is raised to
    pub min_limit: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between statistics reports, 0 disables reporting
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CTABLE_LIMIT` - Table capacity (default: 1000)
    /// - `CTABLE_MIN_LIMIT` - Capacity floor (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Statistics report frequency in seconds (default: 60)
    ///
    /// Unparseable values fall back to their defaults. A limit or floor below
    /// one is rejected, since the table cannot be created with it.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            limit: parse_limit("CTABLE_LIMIT", defaults.limit)?,
            min_limit: parse_limit("CTABLE_MIN_LIMIT", defaults.min_limit)?,
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_interval: parse_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the table treats as contract violations.
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(TableError::InvalidConfig(
                "CTABLE_LIMIT must be at least 1".to_string(),
            ));
        }
        if self.min_limit < 1 {
            return Err(TableError::InvalidConfig(
                "CTABLE_MIN_LIMIT must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Capacity the table will actually use.
    pub fn effective_limit(&self) -> usize {
        self.limit.max(self.min_limit)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Reads a capacity variable, parsed signed so `-1` is caught rather than ignored.
fn parse_limit(name: &str, default: usize) -> Result<usize> {
    match parse_var::<i64>(name) {
        None => Ok(default),
        Some(value) if value < 1 => Err(TableError::InvalidConfig(format!(
            "{} must be at least 1, got {}",
            name, value
        ))),
        Some(value) => usize::try_from(value)
            .map_err(|_| TableError::InvalidConfig(format!("{} is out of range", name))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: 1000,
            min_limit: DEFAULT_MIN_LIMIT,
            server_port: 3000,
            stats_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.limit, 1000);
        assert_eq!(config.min_limit, 5);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stats_interval, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_limit() {
        let config = Config {
            limit: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_zero_min_limit() {
        let config = Config {
            min_limit: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn test_effective_limit_applies_floor() {
        let config = Config {
            limit: 2,
            ..Config::default()
        };
        assert_eq!(config.effective_limit(), 5);
    }

    // Env vars are process-wide, so every env case runs in this one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CTABLE_LIMIT");
        env::remove_var("CTABLE_MIN_LIMIT");
        env::remove_var("SERVER_PORT");
        env::remove_var("STATS_INTERVAL");
        assert_eq!(Config::from_env().unwrap(), Config::default());

        env::set_var("CTABLE_LIMIT", "42");
        env::set_var("STATS_INTERVAL", "not-a-number");
        let config = Config::from_env().unwrap();
        assert_eq!(config.limit, 42);
        assert_eq!(config.stats_interval, 60);

        env::set_var("CTABLE_LIMIT", "-1");
        assert!(matches!(
            Config::from_env(),
            Err(TableError::InvalidConfig(_))
        ));

        env::set_var("CTABLE_LIMIT", "0");
        assert!(matches!(
            Config::from_env(),
            Err(TableError::InvalidConfig(_))
        ));

        env::remove_var("CTABLE_LIMIT");
        env::remove_var("STATS_INTERVAL");
    }
}
