/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server. These
 * errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * - Handler errors: bad requests, missing headers, not-found lookups
 * - Database errors: wrapped `sqlx` failures from the CRUD layer
 * - Provider errors: failures talking to the hosted auth provider
 * - Serialization errors: JSON encode/decode failures
 */
use crate::shared::SharedError;
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request, missing resource)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database error from the CRUD layer
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// The database is not configured on this deployment
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Error from the hosted auth provider
    #[error("Auth provider error: {message}")]
    ProviderError {
        /// Status the provider responded with, when it responded at all
        status: Option<StatusCode>,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from the shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a provider error without an upstream status
    pub fn provider(message: impl Into<String>) -> Self {
        Self::ProviderError {
            status: None,
            message: message.into(),
        }
    }

    /// Create a provider error carrying the upstream status
    pub fn provider_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::ProviderError {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderError { status, .. } => {
                status.unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseError(err) => err.to_string(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::ProviderError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}
