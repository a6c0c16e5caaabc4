use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Server-side error types returned by the scoring API handlers.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Resource not found error.
    NotFound(String),
    /// Bad request error (malformed identifiers, duplicates).
    BadRequest(String),
    /// Payload failed schema validation.
    Validation(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// The body is `{"detail": "<message>"}`, the shape the portal client reads
    /// back out of failed responses.
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Validation(msg) => {
                tracing::debug!("Validation failed: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Failures of a single request made by [`crate::api_client::ApiClient`].
#[derive(Debug)]
pub enum ApiError {
    /// The endpoint could not be joined onto the base origin.
    InvalidUrl(String),
    /// Connection, TLS or timeout failure before a response arrived.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body when present, otherwise the raw body.
        detail: String,
    },
    /// The response body was not the JSON shape the caller expected.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ApiError::Transport(e) => write!(f, "Request failed: {}", e),
            ApiError::Status { status, detail } => {
                write!(f, "Server returned {}: {}", status, detail)
            }
            ApiError::Decode(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

/// Errors surfaced by the page controllers to the UI layer.
#[derive(Debug)]
pub enum PortalError {
    /// The remote call failed.
    Api(ApiError),
    /// The page needs a registered user but the session has none.
    NotRegistered,
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalError::Api(e) => write!(f, "{}", e),
            PortalError::NotRegistered => {
                write!(f, "No user registered in this session; run `register` first")
            }
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortalError::Api(e) => Some(e),
            PortalError::NotRegistered => None,
        }
    }
}

impl From<ApiError> for PortalError {
    fn from(err: ApiError) -> Self {
        PortalError::Api(err)
    }
}
