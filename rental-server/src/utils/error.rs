//! Unified error handling
//!
//! [`AppError`] is the HTTP-facing error type. Every boundary error
//! serializes as `{ "error": "<message>" }`; the parking-zone failure
//! additionally carries the nearest-zone hint so clients can guide the user
//! toward a valid return location.
//!
//! # Status mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | Validation / PhotoRequired / NotInParkingZone | 400 |
//! | Unauthorized / InvalidToken | 401 |
//! | NotFound | 404 |
//! | Conflict / InvalidState | 409 |
//! | Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::geo::NearestZone;
use tracing::error;

/// Error body at the HTTP boundary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    /// Guidance for `NotInParkingZone`: where the caller should go
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_zone: Option<NearestZone>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Auth errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{message}")]
    NotInParkingZone {
        message: String,
        nearest: Option<NearestZone>,
    },

    // ========== System errors (5xx) ==========
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified message for failed admin logins, to prevent username
    /// enumeration.
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid username or password".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: "Authentication required".to_string(),
                    nearest_zone: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: "Invalid or expired token".to_string(),
                    nearest_zone: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg,
                    nearest_zone: None,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: msg,
                    nearest_zone: None,
                },
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    nearest_zone: None,
                },
            ),
            AppError::NotInParkingZone { message, nearest } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    nearest_zone: nearest,
                },
            ),
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".to_string(),
                        nearest_zone: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type AppResult<T> = Result<T, AppError>;
