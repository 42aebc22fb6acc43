//! Transport Errors
//!
//! The single error kind that reaches the session controller. Every variant is
//! collapsed into the same generic user-facing message at the controller
//! boundary; the detail only ever goes to the diagnostic log.

use thiserror::Error;

/// Failure of one question/answer exchange
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint answered with a non-success status
    #[error("Server error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Endpoint answered successfully but reported an error field
    #[error("Server reported error: {0}")]
    Server(String),

    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl TransportError {
    /// Whether the endpoint was reached and answered
    #[must_use]
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Server(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_carries_body() {
        let err = TransportError::Status {
            status: 502,
            body: "upstream timed out".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (502): upstream timed out");
        assert!(err.is_server_side());
    }

    #[test]
    fn test_decode_error_is_not_server_side() {
        let err: TransportError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Malformed response body"));
        assert!(!err.is_server_side());
    }
}
