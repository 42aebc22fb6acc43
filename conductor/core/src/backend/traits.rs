//! Backend Traits
//!
//! The seam between the session controller and whatever answers questions.
//! The controller only ever sees [`QuestionBackend::ask`]; how the answer is
//! produced (HTTP, mock, test double) is the implementation's business.

use std::time::Duration;

use async_trait::async_trait;

use super::mock::DEFAULT_MOCK_LATENCY;
use super::reply::ReplyFields;
use crate::error::TransportError;

/// Something that answers one question at a time
///
/// Implementations make exactly one attempt per call. There is no retry.
#[async_trait]
pub trait QuestionBackend: Send + Sync {
    /// Get the backend name (e.g., "HTTP", "Mock")
    fn name(&self) -> &str;

    /// Send one question and wait for the reply
    ///
    /// Only the latest message is sent; the endpoint is assumed stateless.
    async fn ask(&self, message: &str) -> Result<String, TransportError>;
}

/// Transport adapter configuration
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Question endpoint (blank or absent forces mock mode)
    pub endpoint_url: Option<String>,
    /// Force canned responses regardless of the endpoint
    pub mock_mode: bool,
    /// Simulated latency for the mock backend
    pub mock_latency: Duration,
    /// Request timeout (None = HTTP client default)
    pub request_timeout: Option<Duration>,
    /// Reply field precedence for successful responses
    pub reply_fields: ReplyFields,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            mock_mode: false,
            mock_latency: DEFAULT_MOCK_LATENCY,
            request_timeout: None,
            reply_fields: ReplyFields::default(),
        }
    }
}

impl BackendConfig {
    /// Configuration pointing at a live endpoint
    pub fn http(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Default::default()
        }
    }

    /// Mock-mode configuration
    #[must_use]
    pub fn mock() -> Self {
        Self {
            mock_mode: true,
            ..Default::default()
        }
    }

    /// Set mock latency
    #[must_use]
    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }

    /// The endpoint to call, or None when mock mode applies
    #[must_use]
    pub fn live_endpoint(&self) -> Option<&str> {
        if self.mock_mode {
            return None;
        }
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_default_is_mock() {
        let config = BackendConfig::default();
        assert!(!config.mock_mode);
        assert!(config.live_endpoint().is_none());
        assert_eq!(config.mock_latency, Duration::from_millis(700));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_live_endpoint_is_trimmed() {
        let config = BackendConfig::http("  http://localhost:8000/api/ask ");
        assert_eq!(config.live_endpoint(), Some("http://localhost:8000/api/ask"));
    }

    #[test]
    fn test_mock_flag_hides_endpoint() {
        let mut config = BackendConfig::http("http://localhost:8000/api/ask");
        config.mock_mode = true;
        assert_eq!(config.live_endpoint(), None);
    }
}
