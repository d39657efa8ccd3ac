/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus conversions from the lower-level
 * error types (sequencer, store, shared, token) so service code can use
 * `?` throughout.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::backend::store::StoreError;
use crate::shared::{SequenceError, SharedError};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Store(_) | Self::Internal { .. } => {
                tracing::error!("Request failed: {}", self);
            }
            _ => {
                tracing::debug!("Request rejected ({}): {}", self.kind(), self);
            }
        }

        let body = serde_json::json!({
            "error": self.message(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<SequenceError> for BackendError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::InvalidReorder { .. } => Self::InvalidReorder {
                message: err.to_string(),
            },
            SequenceError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            SequenceError::UnknownEntity { id } => Self::not_found("card", id),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { what } => Self::conflict(format!("{} already exists", what)),
            other => Self::Store(other),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation {
                field: Some(field),
                message,
            },
            SharedError::SerializationError { message } => Self::internal(message),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::warn!("Token rejected: {:?}", err);
        Self::unauthenticated("invalid token")
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("password hashing failed: {}", err))
    }
}
