//! Error types for the Roam catalog core.
//!
//! This module provides the error hierarchy using `thiserror`.
//!
//! Every variant carries owned string context rather than a wrapped source
//! error so the enum derives `Clone`: a single coalesced request delivers its
//! outcome, success or failure, verbatim to every caller that joined it.

use thiserror::Error;

/// Result type alias using `RoamError`.
pub type Result<T> = std::result::Result<T, RoamError>;

/// Main error type for all Roam catalog operations.
#[derive(Clone, Debug, Error)]
pub enum RoamError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The catalog API answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, trimmed.
        message: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // PAYLOAD ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Response body could not be decoded into the expected payload.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The requested catalog entry does not exist.
    #[error("catalog entry not found: {0}")]
    NotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl RoamError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            RoamError::Http(_) | RoamError::Timeout(_) => true,
            RoamError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the caller sent a request the server rejected.
    pub fn is_client_error(&self) -> bool {
        match self {
            RoamError::Validation(_) | RoamError::NotFound(_) => true,
            RoamError::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoamError::Api {
            status: 503,
            message: "maintenance".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }

    #[test]
    fn test_error_classification() {
        assert!(RoamError::Http("connection reset".into()).is_recoverable());
        assert!(RoamError::Timeout("30s elapsed".into()).is_recoverable());
        assert!(RoamError::Api { status: 502, message: String::new() }.is_recoverable());
        assert!(!RoamError::Api { status: 404, message: String::new() }.is_recoverable());
        assert!(!RoamError::Decode("bad json".into()).is_recoverable());

        assert!(RoamError::NotFound("hk-5gb".into()).is_client_error());
        assert!(RoamError::Api { status: 422, message: String::new() }.is_client_error());
        assert!(!RoamError::Http("connection reset".into()).is_client_error());
    }

    #[test]
    fn test_errors_clone_for_fan_out() {
        let err = RoamError::Http("connection reset".into());
        let joined = err.clone();
        assert_eq!(err.to_string(), joined.to_string());
    }
}
