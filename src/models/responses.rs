//! Response DTOs for the table daemon API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::Record;
use crate::table::{TableEntry, TableStats};

/// Response body for `GET /locate/:key` and `POST /refresh/:key`
#[derive(Debug, Clone, Serialize)]
pub struct LocateResponse {
    /// The requested key
    pub key: String,
    /// Serial of the record now held for the key
    pub serial: u64,
    /// When that record was built
    pub created_at: DateTime<Utc>,
    /// Whether the record was already live before this request
    pub hit: bool,
}

impl LocateResponse {
    /// Creates a new LocateResponse from the record returned by the table
    pub fn new(record: &Record, hit: bool) -> Self {
        Self {
            key: record.key.clone(),
            serial: record.serial,
            created_at: record.created_at,
            hit,
        }
    }
}

/// One entry of a walk, most recently used first
#[derive(Debug, Clone, Serialize)]
pub struct WalkEntry {
    pub key: String,
    pub serial: u64,
    pub created_at: DateTime<Utc>,
    /// Hits since the record was built
    pub hits: u64,
}

impl From<&TableEntry<Record>> for WalkEntry {
    fn from(entry: &TableEntry<Record>) -> Self {
        Self {
            key: entry.key.clone(),
            serial: entry.value.serial,
            created_at: entry.value.created_at,
            hits: entry.hits,
        }
    }
}

/// Response body for `GET /walk`
#[derive(Debug, Clone, Serialize)]
pub struct WalkResponse {
    /// Entries from most to least recently used
    pub entries: Vec<WalkEntry>,
    /// Number of entries
    pub count: usize,
}

impl WalkResponse {
    pub fn new(entries: Vec<WalkEntry>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of lookups served by a live record
    pub hits: u64,
    /// Number of lookups that built a record
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of in-place rebuilds
    pub refreshes: u64,
    /// Current number of entries in the table
    pub total_entries: usize,
    /// Effective table capacity
    pub limit: usize,
    /// Records built since startup
    pub constructed: u64,
    /// Records released since startup
    pub destroyed: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from table statistics and factory counters
    pub fn new(stats: &TableStats, limit: usize, constructed: u64, destroyed: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            refreshes: stats.refreshes,
            total_entries: stats.total_entries,
            limit,
            constructed,
            destroyed,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, serial: u64) -> Record {
        Record {
            key: key.to_string(),
            serial,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_locate_response_serialize() {
        let resp = LocateResponse::new(&record("relay", 7), true);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"key\":\"relay\""));
        assert!(json.contains("\"serial\":7"));
        assert!(json.contains("\"hit\":true"));
    }

    #[test]
    fn test_walk_entry_from_table_entry() {
        let mut entry = TableEntry::new("relay".to_string(), record("relay", 3));
        entry.record_hit();

        let walk = WalkEntry::from(&entry);
        assert_eq!(walk.key, "relay");
        assert_eq!(walk.serial, 3);
        assert_eq!(walk.hits, 1);
    }

    #[test]
    fn test_walk_response_count() {
        let entries = vec![
            WalkEntry::from(&TableEntry::new("a".to_string(), record("a", 1))),
            WalkEntry::from(&TableEntry::new("b".to_string(), record("b", 2))),
        ];
        let resp = WalkResponse::new(entries);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = TableStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            refreshes: 1,
            total_entries: 100,
        };
        let resp = StatsResponse::new(&stats, 100, 20, 5);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.limit, 100);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(&TableStats::default(), 5, 0, 0);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
