//! Client error types

use http::StatusCode;
use shared::error::{ErrorCategory, ErrorCode};
use std::fmt;
use thiserror::Error;

use crate::storage::StorageError;

/// A locally detected problem with one form field
///
/// Raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            code: ErrorCode::ValidationFailed,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Authentication required (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend refused the request on a business rule
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Backend failed (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Durable storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Operation not possible in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ClientError {
    /// Map a non-success status and its (already extracted) message
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let text = message.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(text),
            StatusCode::NOT_FOUND => Self::NotFound(text),
            s if s.is_server_error() => Self::Server {
                status: s.as_u16(),
                message: text,
            },
            s => Self::Rejected {
                status: s.as_u16(),
                message: text,
            },
        }
    }

    /// Whether this error must end the local session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Numeric code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(v) => v.code,
            Self::Unauthorized => ErrorCode::SessionExpired,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Rejected { status, .. } => StatusCode::from_u16(*status)
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::BusinessRule),
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Server { .. } => ErrorCode::InternalError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Storage(StorageError::Corrupted(_)) => ErrorCode::StorageCorrupted,
            Self::Storage(_) => ErrorCode::StorageError,
            Self::InvalidState(_) => ErrorCode::InvalidWizardState,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Text suitable for showing to the person at the desk
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(v) => v.message.clone(),
            Self::Unauthorized => "Session expired. Please sign in again.".to_string(),
            Self::Forbidden(_) => "You do not have permission to perform this action.".to_string(),
            Self::NotFound(_) => "The requested resource was not found.".to_string(),
            Self::Rejected { status: 429, .. } => {
                "Too many requests. Please try again later.".to_string()
            }
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { .. } => "Invalid data.".to_string(),
            Self::Network(_) | Self::Http(_) => {
                "Cannot reach the server. Check your connection.".to_string()
            }
            Self::Server { .. } => "Internal server error. Please try again later.".to_string(),
            Self::InvalidResponse(_) | Self::Serialization(_) => {
                "Unexpected response from the server.".to_string()
            }
            Self::Storage(_) => "Local storage is unavailable.".to_string(),
            Self::InvalidState(message) => message.clone(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
