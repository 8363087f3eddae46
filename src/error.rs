//! Error types for the Command Relay
//!
//! Provides a single error type covering caller errors, lookups that miss,
//! storage faults, and startup configuration problems.

use axum::http::StatusCode;
use thiserror::Error;

/// Unified error type for the relay
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Caller Errors
    // =========================================================================
    /// A required request field was absent or empty
    #[error("{0}")]
    MissingParameter(&'static str),

    /// Request fields were present but unusable
    #[error("{0}")]
    InvalidParameters(&'static str),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("client not found")]
    ClientNotFound { key: String },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) | Error::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            Error::ClientNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Storage(_)
            | Error::Internal(_)
            | Error::Configuration(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller caused this error
    pub fn is_caller_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = Error::MissingParameter("no client key");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "no client key");

        let err = Error::ClientNotFound { key: "ABC".into() };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "client not found");

        let err = Error::Storage(rusqlite::Error::InvalidQuery);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_caller_errors() {
        assert!(Error::InvalidParameters("invalid params").is_caller_error());
        assert!(Error::ClientNotFound { key: "k".into() }.is_caller_error());
        assert!(!Error::Internal("boom".into()).is_caller_error());
        assert!(!Error::Configuration("bad".into()).is_caller_error());
    }
}
