/**
 * Backend Error Types
 *
 * Request-level errors. All are terminal for the triggering request; none
 * are retried internally.
 *
 * # Error Categories
 *
 * - `NotFound` - referenced board, column, card, comment or user absent
 * - `Validation` - missing or malformed required field
 * - `InvalidReorder` - id list is not an exact permutation of the siblings
 * - `IndexOutOfRange` - target index outside the range of the operation
 * - `NonEmptyColumn` - column deletion blocked by existing cards
 * - `Authorization` - caller is not allowed to act on the board
 * - `Unauthenticated` - missing or invalid credentials
 * - `Conflict` - uniqueness violation (e.g. username taken)
 * - `Store` / `Internal` - infrastructure failures
 */

use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::StoreError;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    #[error("{message}")]
    Validation {
        /// Offending field, when one can be named
        field: Option<String>,
        message: String,
    },

    #[error("{message}")]
    InvalidReorder { message: String },

    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("column {id} has {count} cards and cannot be deleted")]
    NonEmptyColumn { id: Uuid, count: usize },

    #[error("{message}")]
    Authorization { message: String },

    #[error("{message}")]
    Unauthenticated { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Storage error: {0}")]
    Store(StoreError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidReorder { .. } => StatusCode::BAD_REQUEST,
            Self::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
            Self::NonEmptyColumn { .. } => StatusCode::CONFLICT,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Discriminant reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFoundError",
            Self::Validation { .. } => "ValidationError",
            Self::InvalidReorder { .. } => "InvalidReorderError",
            Self::IndexOutOfRange { .. } => "IndexOutOfRangeError",
            Self::NonEmptyColumn { .. } => "NonEmptyColumnError",
            Self::Authorization { .. } => "AuthorizationError",
            Self::Unauthenticated { .. } => "AuthenticationError",
            Self::Conflict { .. } => "ConflictError",
            Self::Store(_) => "StoreError",
            Self::Internal { .. } => "InternalError",
        }
    }

    /// Human-readable message; infrastructure details stay in the logs
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
