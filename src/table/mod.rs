//! Table Module
//!
//! Bounded most-recently-used table with lazy construction and guaranteed
//! destruction of values.

mod ctable;
mod entry;
mod lifecycle;
mod ring;
mod stats;


// Re-export public types
pub use ctable::CTable;
pub use entry::TableEntry;
pub use lifecycle::{FnLifecycle, Lifecycle};
pub use stats::TableStats;

// == Public Constants ==
/// Smallest capacity a table is created with; smaller requests are raised.
pub const DEFAULT_MIN_LIMIT: usize = 5;

/// Maximum allowed key length in bytes for keys accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
