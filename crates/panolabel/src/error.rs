//! Error types for the panolabel client
//!
//! A single error hierarchy covers status errors reported by the backend, transport
//! failures, payload (de)serialization, and client-side preconditions. Errors produced
//! by a [`RequestExecutor`](crate::http::RequestExecutor) travel through the resource
//! bindings untouched.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a panolabel error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the panolabel client.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend rejected the request (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict error (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request body failed server-side validation (422).
    #[error("Unprocessable entity: {message}")]
    UnprocessableEntity {
        /// Error message
        message: String,
        /// Field-level validation errors if provided
        errors: Option<Vec<ValidationError>>,
    },

    /// Internal server error (500+).
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Failed to interpret an API response.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A field the backend requires was not supplied.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Field-level validation error reported with a 422 response.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted location of the offending field (e.g. `body.name`)
    pub field: String,
    /// Validation error message
    pub message: String,
    /// Error type if provided
    pub code: Option<String>,
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    ///
    /// The backend reports errors as `{"detail": "..."}`, or for request validation
    /// failures as `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`. Bodies
    /// that match neither shape are carried verbatim.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let (message, errors) = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(ApiErrorResponse {
                detail: ErrorDetail::Message(message),
            }) => (message, None),
            Ok(ApiErrorResponse {
                detail: ErrorDetail::Validation(items),
            }) => {
                let errors: Vec<ValidationError> = items
                    .into_iter()
                    .map(|item| ValidationError {
                        field: item
                            .loc
                            .iter()
                            .map(|segment| match segment {
                                serde_json::Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join("."),
                        message: item.msg,
                        code: item.error_type,
                    })
                    .collect();
                let message = errors
                    .first()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .unwrap_or_else(|| "Validation error".to_string());
                (message, Some(errors))
            }
            Err(_) => (body.to_string(), None),
        };

        match status {
            400 => Error::BadRequest(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            422 => Error::UnprocessableEntity { message, errors },
            s if s >= 500 => Error::InternalServerError(message),
            _ => Error::ApiError {
                status,
                message,
                request_id: headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            },
        }
    }

    /// HTTP status this error was created from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::NotFound(_) => Some(404),
            Error::Conflict(_) => Some(409),
            Error::UnprocessableEntity { .. } => Some(422),
            Error::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}

// Helper structures for parsing API error responses

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    detail: ErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Validation(Vec<ApiValidationError>),
}

#[derive(Debug, serde::Deserialize)]
struct ApiValidationError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}
