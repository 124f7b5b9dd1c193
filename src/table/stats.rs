//! Table Statistics Module
//!
//! Tracks lookup hits, misses, evictions and refreshes.

use serde::Serialize;

// == Table Stats ==
/// Counters describing how a table has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Lookups served by a live entry
    pub hits: u64,
    /// Lookups that had to construct a value
    pub misses: u64,
    /// Entries removed to make room for a miss
    pub evictions: u64,
    /// Values rebuilt in place by refresh
    pub refreshes: u64,
    /// Current number of live entries
    pub total_entries: usize,
}

impl TableStats {
    // == Constructor ==
    /// Creates a new TableStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TableStats::new();
        assert_eq!(stats, TableStats::default());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(TableStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = TableStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_eviction_and_refresh() {
        let mut stats = TableStats::new();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_refresh();
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.refreshes, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = TableStats::new();
        stats.set_total_entries(3);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_entries\":3"));
        assert!(json.contains("\"refreshes\":0"));
    }
}
