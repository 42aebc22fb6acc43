//! HTTP Backend Implementation
//!
//! Question backend for a remote answering endpoint.
//!
//! # Endpoint Contract
//!
//! - Request: `POST <endpoint>` with JSON body `{"question": "<message>"}`
//! - Success: 2xx with a JSON object, reply read via [`ReplyFields`]
//! - Failure: any non-2xx status, carrying the raw body

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::reply::ReplyFields;
use super::traits::QuestionBackend;
use crate::error::TransportError;

/// Request body sent to the endpoint
#[derive(Debug, Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

/// HTTP question backend
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Endpoint URL
    endpoint: String,
    /// Reply field precedence
    reply_fields: ReplyFields,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend
    ///
    /// `timeout` of None leaves the client's default in place.
    pub fn new(
        endpoint: impl Into<String>,
        reply_fields: ReplyFields,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            reply_fields,
            http_client,
        })
    }

    /// Get the endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuestionBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn ask(&self, message: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&QuestionRequest { question: message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&body)?;

        self.reply_fields.extract(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_creation() {
        let backend = HttpBackend::new(
            "http://127.0.0.1:8000/api/ask",
            ReplyFields::default(),
            None,
        )
        .unwrap();
        assert_eq!(backend.endpoint(), "http://127.0.0.1:8000/api/ask");
        assert_eq!(backend.name(), "HTTP");
    }

    #[test]
    fn test_question_request_shape() {
        let body = serde_json::to_value(QuestionRequest { question: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({"question": "hi"}));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 on localhost: discard service, almost never listening
        let backend = HttpBackend::new(
            "http://127.0.0.1:9/api/ask",
            ReplyFields::default(),
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let err = backend.ask("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
