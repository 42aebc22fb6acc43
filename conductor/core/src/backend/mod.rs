//! Question Backends
//!
//! The transport adapter: exactly one request/response exchange per question,
//! either against a configured HTTP endpoint or against a canned mock.
//!
//! # Available Backends
//!
//! - **HTTP**: POSTs `{"question": ...}` to the configured endpoint
//! - **Mock**: waits a simulated latency and returns a fixed reply
//!
//! # Usage
//!
//! ```ignore
//! use gracewise_conductor::backend::{backend_from_config, BackendConfig};
//!
//! let backend = backend_from_config(&BackendConfig::mock())?;
//! let reply = backend.ask("How do I plan a school week?").await?;
//! ```

mod http;
mod mock;
mod reply;
mod traits;

use std::sync::Arc;

pub use http::HttpBackend;
pub use mock::{MockBackend, CANNED_REPLY, DEFAULT_MOCK_LATENCY};
pub use reply::{ReplyField, ReplyFields};
pub use traits::{BackendConfig, QuestionBackend};

use crate::error::TransportError;

/// Build the backend a configuration asks for
///
/// Mock mode, or a missing/blank endpoint, selects [`MockBackend`]; anything
/// else selects [`HttpBackend`].
pub fn backend_from_config(
    config: &BackendConfig,
) -> Result<Arc<dyn QuestionBackend>, TransportError> {
    match config.live_endpoint() {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "Using HTTP question backend");
            let backend = HttpBackend::new(
                endpoint,
                config.reply_fields.clone(),
                config.request_timeout,
            )?;
            Ok(Arc::new(backend))
        }
        None => {
            tracing::info!(
                latency_ms = config.mock_latency.as_millis() as u64,
                "Using mock question backend"
            );
            Ok(Arc::new(MockBackend::with_latency(config.mock_latency)))
        }
    }
}
