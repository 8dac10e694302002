//! Error envelopes shared by all SDK components.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Uniform infrastructure-failure record.
///
/// Produced exactly once per failing operation by [`crate::exception`]. The
/// ticket correlates the record returned to the caller with the log entry
/// emitted when it was created.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{exception} (ticket {ticket})")]
pub struct TechnicalError {
    /// Display text of the underlying failure.
    pub exception: String,
    /// Unix timestamp (seconds) at which the failure was captured.
    #[serde(rename = "occurred_time")]
    pub occurred: i64,
    /// Freshly generated correlation identifier.
    pub ticket: String,
}

/// Caller input or domain-rule rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct BusinessError {
    pub code: String,
    pub message: String,
}

impl BusinessError {
    /// Creates a business error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error type for SDK bootstrap paths (configuration, connections, logging).
#[derive(Error, Debug)]
pub enum OmniError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Environment file error
    #[error("Environment error: {0}")]
    Environment(String),

    /// Logging bootstrap error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Database / document store error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OmniError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Environment(_) => "ENVIRONMENT_ERROR",
            Self::Logging(_) => "LOGGING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Converts this error into a logged [`TechnicalError`].
    #[must_use]
    pub fn into_technical(self, message: &str) -> TechnicalError {
        crate::exception(message, &self)
    }
}

impl From<serde_json::Error> for OmniError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for OmniError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
