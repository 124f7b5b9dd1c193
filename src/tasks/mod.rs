//! Background Tasks Module
//!
//! Contains background tasks that run periodically during daemon operation.
//!
//! # Tasks
//! - Statistics reporter: logs table counters at a configured interval

mod reporter;

pub use reporter::spawn_stats_reporter;
