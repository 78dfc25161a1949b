//! Client error types

use thiserror::Error;
use waitline_core::Role;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend rejected the credential attached for a role (401)
    #[error("Unauthorized{}: {message}", role_suffix(.role))]
    Unauthorized {
        role: Option<Role>,
        message: String,
    },

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

fn role_suffix(role: &Option<Role>) -> String {
    role.as_ref().map(|r| format!(" ({r})")).unwrap_or_default()
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String, role: Option<Role>) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized { role, message },
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Request(e) => e.status(),
            Self::Unauthorized { .. } => Some(reqwest::StatusCode::UNAUTHORIZED),
            Self::BadRequest(_) => Some(reqwest::StatusCode::BAD_REQUEST),
            Self::Forbidden(_) => Some(reqwest::StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(reqwest::StatusCode::NOT_FOUND),
            Self::ServerError { status, .. } => reqwest::StatusCode::from_u16(*status).ok(),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the backend rejected the attached credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
