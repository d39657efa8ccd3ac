//! Shared Error Types
//!
//! This module defines error types that are raised by transport-agnostic
//! code: payload validation and JSON (de)serialization of board and card
//! documents.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Missing or malformed required fields
//!
//! # Usage
//!
//! ```rust
//! use kanban_board::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "title is required");
//! ```
use thiserror::Error;

/// Errors that can occur outside of the HTTP layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Require a non-blank string field, returning it trimmed
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, SharedError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}
