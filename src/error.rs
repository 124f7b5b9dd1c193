//! Error types for the table daemon
//!
//! Provides unified error handling using thiserror. Contract violations in
//! the table itself (a zero limit, an index/ring disagreement) panic instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Table Error Enum ==
/// Recoverable errors surfaced by the daemon.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Key rejected before it reached the table
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Configuration value that would violate the table contract
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for TableError {
    fn into_response(self) -> Response {
        let status = match &self {
            TableError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            TableError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the daemon.
pub type Result<T> = std::result::Result<T, TableError>;
