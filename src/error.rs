//! Typed API errors and their JSON wire format.
//!
//! Every error leaves the service as a two-field JSON object:
//!
//! ```json
//! {"type":"Unauthorized","message":"Unauthorized"}
//! ```
//!
//! The HTTP status always matches the canonical status of the error type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Symbolic error kind carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "InvalidJSON")]
    InvalidJson,
    InvalidRequest,
    Unauthorized,
    TaskGuidAlreadyExists,
    TaskNotFound,
    UnknownError,
}

impl ErrorType {
    /// Canonical HTTP status for this error kind.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorType::InvalidJson | ErrorType::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorType::TaskGuidAlreadyExists => StatusCode::CONFLICT,
            ErrorType::TaskNotFound => StatusCode::NOT_FOUND,
            ErrorType::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error_type:?}: {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
}

impl ApiError {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    /// Authentication failure with the standard reason phrase for 401.
    pub fn unauthorized() -> Self {
        let status = ErrorType::Unauthorized.status();
        Self::new(
            ErrorType::Unauthorized,
            status.canonical_reason().unwrap_or("Unauthorized"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.error_type.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
