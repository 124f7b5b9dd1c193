//! Record Lifecycle
//!
//! The values the daemon keeps in its table: one serial-numbered record per
//! key, built on first lookup and released on eviction or refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::table::{CTable, Lifecycle};

// == Record ==
/// A materialized value for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Key the record was built for
    pub key: String,
    /// Construction order, unique for the lifetime of the factory
    pub serial: u64,
    /// When the record was built
    pub created_at: DateTime<Utc>,
}

// == Record Factory ==
/// [`Lifecycle`] that numbers records and counts their construction and release.
#[derive(Debug, Default)]
pub struct RecordFactory {
    next_serial: u64,
    constructed: u64,
    destroyed: u64,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records built so far.
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    /// Records released so far.
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }
}

impl Lifecycle for RecordFactory {
    type Value = Record;

    fn create(&mut self, key: &str) -> Record {
        self.next_serial += 1;
        self.constructed += 1;
        Record {
            key: key.to_string(),
            serial: self.next_serial,
            created_at: Utc::now(),
        }
    }

    fn destroy(&mut self, record: Record) {
        self.destroyed += 1;
        debug!(key = %record.key, serial = record.serial, "record released");
    }
}

// == Shared Table ==
/// Record table shared across request handlers and background tasks.
pub type SharedTable = Arc<RwLock<CTable<RecordFactory>>>;

/// Builds the shared record table sized from configuration.
pub fn shared_table(config: &Config) -> SharedTable {
    let table = CTable::with_min_limit(config.limit, config.min_limit, RecordFactory::new());
    Arc::new(RwLock::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_numbers_records() {
        let mut factory = RecordFactory::new();
        let first = factory.create("a");
        let second = factory.create("b");

        assert_eq!(first.key, "a");
        assert_eq!(first.serial, 1);
        assert_eq!(second.serial, 2);
        assert_eq!(factory.constructed(), 2);
    }

    #[test]
    fn test_factory_counts_releases() {
        let mut factory = RecordFactory::new();
        let record = factory.create("a");
        factory.destroy(record);
        assert_eq!(factory.destroyed(), 1);
    }

    #[test]
    fn test_table_eviction_releases_record() {
        let mut table = CTable::new(5, RecordFactory::new());
        for key in ["a", "b", "c", "d", "e", "f"] {
            table.locate(key);
        }
        assert_eq!(table.lifecycle().constructed(), 6);
        assert_eq!(table.lifecycle().destroyed(), 1);
        assert!(!table.contains("a"));
    }

    #[tokio::test]
    async fn test_shared_table_uses_config() {
        let config = Config {
            limit: 3,
            min_limit: 2,
            ..Config::default()
        };
        let table = shared_table(&config);
        assert_eq!(table.read().await.limit(), 3);
    }

    #[tokio::test]
    async fn test_shared_table_accepts_huge_valid_limit() {
        let config = Config {
            limit: usize::MAX / 2,
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let table = shared_table(&config);
        let mut table = table.write().await;
        assert_eq!(table.locate("relay").serial, 1);
        assert_eq!(table.limit(), usize::MAX / 2);
    }
}
