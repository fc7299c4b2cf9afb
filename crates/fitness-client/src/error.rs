//! Client errors
//!
//! Error types for client operations, with mapping from HTTP status codes and
//! the API's `{ "error": { "code", "message", "details" } }` body.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not reach the server
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timed out
    #[error("request timeout")]
    Timeout,

    /// 400 - validation, captcha, business rule
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 401 - no token sent, or no token held locally
    #[error("authentication required: {0}")]
    Unauthenticated(String),

    /// 403 - token rejected
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 404
    #[error("not found: {0}")]
    NotFound(String),

    /// 409
    #[error("conflict: {0}")]
    Conflict(String),

    /// 5xx
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Rejected locally before any request
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Local storage error
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

impl ClientError {
    /// Build an error from a non-success response
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let (message, details) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.message, envelope.error.details),
            Err(_) => (
                status.canonical_reason().unwrap_or("unknown").to_string(),
                None,
            ),
        };

        match status.as_u16() {
            400 => Self::BadRequest { message, details },
            401 => Self::Unauthenticated(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            code @ 500..=599 => Self::Server {
                status: code,
                message,
            },
            code => Self::UnexpectedStatus {
                status: code,
                message,
            },
        }
    }

    /// HTTP status this error came from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthenticated(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the session should be dropped
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated(_) | Self::Forbidden(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
