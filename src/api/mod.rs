//! API Module
//!
//! HTTP handlers and routing for the table daemon.
//!
//! # Endpoints
//! - `GET /locate/:key` - Look up a key, building its record on a miss
//! - `POST /refresh/:key` - Rebuild the record for a key
//! - `GET /walk` - List entries from most to least recently used
//! - `GET /stats` - Get table statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
