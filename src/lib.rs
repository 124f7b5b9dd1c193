//! ctable - A bounded most-recently-used cache manager
//!
//! Values are built on first lookup by a caller-supplied constructor, evicted
//! least recently used first once the table is full, and always handed back
//! to a caller-supplied destructor. The `ctabled` binary embeds one table
//! behind an HTTP introspection API.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod table;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use table::{CTable, FnLifecycle, Lifecycle};
pub use tasks::spawn_stats_reporter;
