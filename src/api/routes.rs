//! API Routes
//!
//! Configures the Axum router with all table daemon endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, locate_handler, refresh_handler, stats_handler, walk_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /locate/:key` - Look up a key, building its record on a miss
/// - `POST /refresh/:key` - Rebuild the record for a key
/// - `GET /walk` - List entries from most to least recently used
/// - `GET /stats` - Get table statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/locate/:key", get(locate_handler))
        .route("/refresh/:key", post(refresh_handler))
        .route("/walk", get(walk_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
