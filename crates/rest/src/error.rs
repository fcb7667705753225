//! Error types for the REST API.
//!
//! Every failure leaving a handler is a [`RestError`], rendered as a small
//! JSON body:
//!
//! ```json
//! { "http status code": 404, "http status description": "Not Found", "message": "..." }
//! ```
//!
//! # Error Mapping
//!
//! | Source | HTTP Status |
//! |--------|-------------|
//! | missing database, collection or document | 404 |
//! | invalid query parameters | 400 |
//! | missing or wrong credentials | 401 |
//! | access denied to an authenticated caller | 403 |
//! | [`HalError`] (bad stored data or configuration) | 500 |
//! | [`StoreError`] | 500 |

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use resthal_hal::HalError;
use std::fmt;
use tracing::error;

use crate::store::StoreError;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Database, collection or document not found (HTTP 404).
    NotFound {
        /// Path of the missing resource.
        resource: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Authentication required or failed (HTTP 401).
    Unauthorized {
        /// Value for `WWW-Authenticate`, if the caller should be challenged.
        challenge: Option<String>,
    },

    /// Access denied (HTTP 403).
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Creates a [`RestError::NotFound`] for a resource path.
    pub fn not_found(resource: impl Into<String>) -> Self {
        RestError::NotFound {
            resource: resource.into(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource } => write!(f, "Resource not found: {}", resource),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::Unauthorized { .. } => write!(f, "Authentication required"),
            RestError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            RestError::NotFound { resource } => format!("{} does not exist", resource),
            RestError::BadRequest { message }
            | RestError::Forbidden { message }
            | RestError::InternalError { message } => message.clone(),
            RestError::Unauthorized { .. } => "authentication required".to_string(),
        };

        if status.is_server_error() {
            error!(error = %message, "Request failed");
        }

        let mut response = (status, Json(error_body(status, &message))).into_response();

        if let RestError::Unauthorized {
            challenge: Some(challenge),
        } = &self
        {
            if let Ok(value) = HeaderValue::from_str(challenge) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

/// Creates the JSON body for an error response.
pub fn error_body(status: StatusCode, message: &str) -> serde_json::Value {
    serde_json::json!({
        "http status code": status.as_u16(),
        "http status description": status.canonical_reason().unwrap_or("Unknown"),
        "message": message,
    })
}

impl From<HalError> for RestError {
    fn from(err: HalError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
