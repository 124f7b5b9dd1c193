//! Table Entry Module
//!
//! Defines the slot stored for each live key.

use std::time::{SystemTime, UNIX_EPOCH};

// == Table Entry ==
/// A single live slot: the owned key, its constructed value and metadata.
#[derive(Debug, Clone)]
pub struct TableEntry<V> {
    /// Owned copy of the lookup key
    pub key: String,
    /// Value produced by the constructor
    pub value: V,
    /// Construction timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Hits served since construction
    pub hits: u64,
}

impl<V> TableEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry with zero hits.
    pub fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            created_at: current_timestamp_ms(),
            hits: 0,
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Age ==
    /// Milliseconds since the value was constructed.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
