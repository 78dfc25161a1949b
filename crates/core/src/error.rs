//! Error types shared by the credential store, token inspector and guard

use thiserror::Error;

/// Standard result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Credential expired at {exp} (now {now})")]
    ExpiredCredential { exp: i64, now: i64 },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Field `{field}` is not declared for role {role}")]
    UndeclaredField { role: String, field: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed credential error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCredential(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
