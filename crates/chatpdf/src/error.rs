//! Error types for the chat pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for chatpdf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chat pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An uploaded file could not be read as a PDF
    #[error("Failed to parse file '{filename}': {message}")]
    DocumentParse { filename: String, message: String },

    /// The language-model service could not be reached
    #[error("LLM service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The language-model service did not answer in time
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    /// The language-model service replied without an answer
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    /// Session not found
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Bad client input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a document parse error
    pub fn document_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::DocumentParse { filename, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "parse_error",
                format!("Failed to parse '{}': {}", filename, message),
            ),
            Error::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "llm_unavailable", msg.clone())
            }
            Error::Timeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                "llm_timeout",
                format!("LLM request timed out after {}s", secs),
            ),
            Error::MalformedResponse(msg) => {
                (StatusCode::BAD_GATEWAY, "llm_malformed_response", msg.clone())
            }
            Error::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Session not found: {}", id),
            ),
            Error::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
