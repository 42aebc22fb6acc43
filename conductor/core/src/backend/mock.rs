//! Mock Backend
//!
//! Canned replies after a simulated delay. Used when mock mode is on or no
//! endpoint is configured. Never fails.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::QuestionBackend;
use crate::error::TransportError;

/// Reply returned for every question in mock mode
pub const CANNED_REPLY: &str = "Mock: I hear you. Try a 15-minute focused lesson. (Prov 3:5)";

/// Simulated round-trip latency
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(700);

/// Mock question backend
#[derive(Clone, Debug)]
pub struct MockBackend {
    reply: String,
    latency: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::with_latency(DEFAULT_MOCK_LATENCY)
    }
}

impl MockBackend {
    /// Mock backend with the canned reply and a custom latency
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            reply: CANNED_REPLY.to_string(),
            latency,
        }
    }

    /// Replace the canned reply
    #[must_use]
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    /// Configured latency
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl QuestionBackend for MockBackend {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn ask(&self, message: &str) -> Result<String, TransportError> {
        tracing::trace!(chars = message.chars().count(), "Mock backend asked");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_canned_reply() {
        let backend = MockBackend::with_latency(Duration::ZERO);
        let reply = backend.ask("anything").await.unwrap();
        assert_eq!(reply, CANNED_REPLY);
    }

    #[tokio::test]
    async fn test_mock_waits_latency() {
        let backend = MockBackend::with_latency(Duration::from_millis(30));
        let start = std::time::Instant::now();
        backend.ask("hello").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_default_latency() {
        assert_eq!(MockBackend::default().latency(), Duration::from_millis(700));
    }

    #[tokio::test]
    async fn test_custom_reply() {
        let backend = MockBackend::with_latency(Duration::ZERO).with_reply("pong");
        assert_eq!(backend.ask("ping").await.unwrap(), "pong");
    }
}
