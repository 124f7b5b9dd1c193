//! Statistics Reporter Task
//!
//! Background task that periodically logs table statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::table::{CTable, Lifecycle};

/// Spawns a background task that logs table statistics at a fixed interval.
///
/// The task sleeps for the interval, takes a read lock long enough to copy
/// the counters, and logs them. Quiet intervals (no lookups since the last
/// report) are logged at debug level only.
///
/// # Arguments
/// * `table` - shared reference to the table
/// * `interval_secs` - seconds between reports, at least one
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_stats_reporter<L>(table: Arc<RwLock<CTable<L>>>, interval_secs: u64) -> JoinHandle<()>
where
    L: Lifecycle + Send + Sync + 'static,
    L::Value: Send + Sync,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting table statistics reporter with interval of {} seconds",
            interval.as_secs()
        );

        let mut last_lookups = 0u64;
        loop {
            tokio::time::sleep(interval).await;

            let (stats, limit) = {
                let guard = table.read().await;
                (guard.stats(), guard.limit())
            };

            let lookups = stats.hits + stats.misses;
            if lookups != last_lookups {
                info!(
                    entries = stats.total_entries,
                    limit,
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    refreshes = stats.refreshes,
                    hit_rate = stats.hit_rate(),
                    "table statistics"
                );
            } else {
                debug!(entries = stats.total_entries, "table statistics: no lookups since last report");
            }
            last_lookups = lookups;
        }
    })
}
