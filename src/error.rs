//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::deque::DequeError;
use crate::domain::AccountIdError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: message can not be blank",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State           | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An account id in the request is malformed.
    #[error("invalid account id: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    /// Neither an explicit sender nor a caller identity was supplied.
    #[error("no sender given and no caller identity in request")]
    MissingCaller,

    /// Pop attempted on an empty collection.
    #[error("collection {0} is empty")]
    EmptyCollection(String),

    /// Collection state in the backing store is inconsistent.
    #[error("collection state conflict: {0}")]
    CollectionConflict(String),

    /// Backing store failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidAccountId(_) => 1002,
            Self::MissingCaller => 1003,
            Self::EmptyCollection(_) => 2001,
            Self::CollectionConflict(_) => 2002,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidAccountId(_) | Self::MissingCaller => {
                StatusCode::BAD_REQUEST
            }
            Self::EmptyCollection(_) => StatusCode::NOT_FOUND,
            Self::CollectionConflict(_) => StatusCode::CONFLICT,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DequeError> for GatewayError {
    fn from(err: DequeError) -> Self {
        match err {
            DequeError::EmptyCollection { collection } => Self::EmptyCollection(collection),
            DequeError::Storage(store) => Self::PersistenceError(store.to_string()),
            DequeError::CorruptMetadata { .. }
            | DequeError::MissingElement { .. }
            | DequeError::IndexOverflow { .. } => Self::CollectionConflict(err.to_string()),
            DequeError::InvalidCollectionKey(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
