//! Request and Response models for the table daemon API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::KeyPath;
pub use responses::{
    ErrorResponse, HealthResponse, LocateResponse, StatsResponse, WalkEntry, WalkResponse,
};
