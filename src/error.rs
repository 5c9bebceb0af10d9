//! Error types for JobDash
//!
//! This module defines the error types shared by the data service and the
//! dashboard client, providing enough detail for logs and for the inline
//! error messages shown next to each resource.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ApiError;
use crate::resource::ResourceKind;

/// Main error type for JobDash operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Backing store unreachable or the query faulted
    #[error("Storage unavailable for {resource}: {message}")]
    StorageUnavailable {
        resource: ResourceKind,
        message: String,
    },

    /// `MONGODB_URI` is not defined
    #[error("MONGODB_URI is not defined. Please check your environment.")]
    MissingConnectionString,

    /// Could not connect to or bind an address
    #[error("Connection error to '{target}': {message}")]
    ConnectionError { target: String, message: String },

    /// Non-success HTTP status received by the client
    #[error("HTTP error! Status: {status} - {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Transport failure before a response was received
    #[error("{0}")]
    Network(String),

    /// Response body was not the expected JSON
    #[error("Invalid JSON response: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashError {
    /// Create a storage error for a resource kind
    pub fn storage(resource: ResourceKind, message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            resource,
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConnectionError {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error, falling back to a generic reason
    pub fn http_status(status: u16, reason: Option<&str>) -> Self {
        Self::HttpStatus {
            status,
            reason: reason
                .filter(|r| !r.is_empty())
                .unwrap_or("Unknown Error")
                .to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }
}

/// Result type alias for JobDash operations
pub type Result<T> = std::result::Result<T, DashError>;

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DashError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            DashError::http_status(status.as_u16(), status.canonical_reason())
        } else {
            DashError::Network(err.to_string())
        }
    }
}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DashError::StorageUnavailable { resource, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch {} from database.", resource.collection()),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(ApiError { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_reason_fallback() {
        let err = DashError::http_status(500, Some("Internal Server Error"));
        assert_eq!(
            err.to_string(),
            "HTTP error! Status: 500 - Internal Server Error"
        );

        let err = DashError::http_status(599, None);
        assert_eq!(err.to_string(), "HTTP error! Status: 599 - Unknown Error");

        let err = DashError::http_status(418, Some(""));
        assert_eq!(err.to_string(), "HTTP error! Status: 418 - Unknown Error");
    }

    #[test]
    fn test_storage_error_response_hides_cause() {
        let response = DashError::storage(ResourceKind::Pipelines, "socket closed").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_decode_from_serde() {
        let err: DashError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, DashError::Decode(_)));
    }
}
