//! Request DTOs for the table daemon API
//!
//! Defines the path parameters accepted by the key-addressed endpoints.

use serde::Deserialize;

use crate::table::MAX_KEY_LENGTH;

/// Path parameters for `GET /locate/:key` and `POST /refresh/:key`
#[derive(Debug, Clone, Deserialize)]
pub struct KeyPath {
    /// The table key
    pub key: String,
}

impl KeyPath {
    /// Validates the key
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
