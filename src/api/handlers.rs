//! API Handlers
//!
//! HTTP request handlers for each table daemon endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::models::{
    HealthResponse, KeyPath, LocateResponse, StatsResponse, WalkEntry, WalkResponse,
};
use crate::records::{shared_table, RecordFactory, SharedTable};
use crate::table::CTable;

/// Application state shared across all handlers.
///
/// Contains the record table wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe record table
    pub table: SharedTable,
}

impl AppState {
    /// Creates a new AppState around the given table.
    pub fn new(table: CTable<RecordFactory>) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            table: shared_table(config),
        }
    }
}

/// Handler for GET /locate/:key
///
/// Returns the record for a key, building it on a miss.
pub async fn locate_handler(
    State(state): State<AppState>,
    Path(path): Path<KeyPath>,
) -> Result<Json<LocateResponse>> {
    if let Some(error_msg) = path.validate() {
        return Err(TableError::InvalidKey(error_msg));
    }

    // Write lock: a lookup reorders recency even on a hit
    let mut table = state.table.write().await;
    let hit = table.contains(&path.key);
    let record = table.locate(&path.key);

    Ok(Json(LocateResponse::new(record, hit)))
}

/// Handler for POST /refresh/:key
///
/// Releases the current record for a key and builds a fresh one.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Path(path): Path<KeyPath>,
) -> Result<Json<LocateResponse>> {
    if let Some(error_msg) = path.validate() {
        return Err(TableError::InvalidKey(error_msg));
    }

    let mut table = state.table.write().await;
    let hit = table.contains(&path.key);
    let record = table.refresh(&path.key);

    Ok(Json(LocateResponse::new(record, hit)))
}

/// Handler for GET /walk
///
/// Lists live entries from most to least recently used.
pub async fn walk_handler(State(state): State<AppState>) -> Json<WalkResponse> {
    let table = state.table.read().await;
    let entries = table.entries().map(WalkEntry::from).collect();

    Json(WalkResponse::new(entries))
}

/// Handler for GET /stats
///
/// Returns current table statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let table = state.table.read().await;
    let factory = table.lifecycle();

    Json(StatsResponse::new(
        &table.stats(),
        table.limit(),
        factory.constructed(),
        factory.destroyed(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(CTable::new(5, RecordFactory::new()))
    }

    fn key(key: &str) -> Path<KeyPath> {
        Path(KeyPath {
            key: key.to_string(),
        })
    }

    #[tokio::test]
    async fn test_locate_miss_then_hit() {
        let state = test_state();

        let first = locate_handler(State(state.clone()), key("relay")).await.unwrap();
        assert!(!first.hit);
        assert_eq!(first.serial, 1);

        let second = locate_handler(State(state.clone()), key("relay")).await.unwrap();
        assert!(second.hit);
        assert_eq!(second.serial, 1);
    }

    #[tokio::test]
    async fn test_locate_invalid_key() {
        let state = test_state();
        let result = locate_handler(State(state), key("")).await;
        assert!(matches!(result, Err(TableError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_refresh_builds_new_record() {
        let state = test_state();
        locate_handler(State(state.clone()), key("relay")).await.unwrap();

        let refreshed = refresh_handler(State(state.clone()), key("relay")).await.unwrap();
        assert!(refreshed.hit);
        assert_eq!(refreshed.serial, 2);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.destroyed, 1);
    }

    #[tokio::test]
    async fn test_walk_handler_orders_mru_first() {
        let state = test_state();
        for k in ["a", "b", "c"] {
            locate_handler(State(state.clone()), key(k)).await.unwrap();
        }
        locate_handler(State(state.clone()), key("a")).await.unwrap();

        let walk = walk_handler(State(state)).await;
        let keys: Vec<&str> = walk.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "b"]);
        assert_eq!(walk.count, 3);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.limit, 5);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
