//! Integration Tests for TUI + Session
//!
//! These tests drive the full surface flow without a terminal: key-level
//! actions go through [`SessionClient`], directives come back and are applied
//! to [`DisplayState`], and the tests assert on what would be drawn.
//!
//! # Mock Backend
//!
//! A configurable backend that can:
//! - Fail requests on demand (error injection)
//! - Hold a reply until released (to observe the pending window)
//! - Count requests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;
use tokio::time::timeout;

use gracewise_conductor::{
    MessageRole, QuestionBackend, SessionConfig, SubmitOutcome, TransportError,
    GENERIC_ERROR_MESSAGE,
};
use gracewise_tui::display::DisplayRole;
use gracewise_tui::{DisplayState, SessionClient};

// ============================================================================
// Configurable Mock Backend
// ============================================================================

struct IntegrationMockBackend {
    /// Count of requests made
    request_count: AtomicUsize,
    /// If true, every request fails
    fail_all_requests: AtomicBool,
    /// If set, replies wait for this gate
    gate: Option<Notify>,
}

impl IntegrationMockBackend {
    fn new() -> Self {
        Self {
            request_count: AtomicUsize::new(0),
            fail_all_requests: AtomicBool::new(false),
            gate: None,
        }
    }

    fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new()
        }
    }

    fn release(&self) {
        if let Some(ref gate) = self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl QuestionBackend for IntegrationMockBackend {
    fn name(&self) -> &str {
        "IntegrationMock"
    }

    async fn ask(&self, message: &str) -> Result<String, TransportError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(ref gate) = self.gate {
            gate.notified().await;
        }

        if self.fail_all_requests.load(Ordering::SeqCst) {
            return Err(TransportError::Server("index not loaded".to_string()));
        }

        Ok(format!("Answer to: {message}"))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn client_with(backend: Arc<IntegrationMockBackend>) -> SessionClient {
    SessionClient::new(backend, SessionConfig::default())
}

/// Submit and wait for the exchange to finish
async fn submit_and_wait(client: &SessionClient, input: &str) -> SubmitOutcome {
    let handle = client.submit(input).expect("submit spawns a task");
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("exchange finished in time")
        .expect("exchange task did not panic")
        .expect("submit yields an outcome")
}

fn sync(client: &mut SessionClient, display: &mut DisplayState) {
    for directive in client.recv_all() {
        display.apply(directive);
    }
}

fn rendered(display: &DisplayState) -> Vec<(DisplayRole, String)> {
    display
        .messages
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_message_exchange_renders_both_bubbles() {
    let backend = Arc::new(IntegrationMockBackend::new());
    let mut client = client_with(backend.clone());
    let mut display = DisplayState::default();

    display.input = "  How long per lesson?  ".to_string();
    let input = display.submittable_input().unwrap().to_string();
    assert_eq!(submit_and_wait(&client, &input).await, SubmitOutcome::Resolved);
    sync(&mut client, &mut display);

    assert_eq!(
        rendered(&display),
        vec![
            (DisplayRole::User, "How long per lesson?".to_string()),
            (
                DisplayRole::Assistant,
                "Answer to: How long per lesson?".to_string()
            ),
        ]
    );
    assert_eq!(display.input, "");
    assert!(display.input_enabled);
    assert!(!display.is_pending());
    assert!(!display.welcome_visible);
    assert_eq!(
        display.summaries.iter().collect::<Vec<_>>(),
        vec!["How long per lesson?"]
    );
    assert_eq!(backend.request_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_exchange_shows_generic_error() {
    let backend = Arc::new(IntegrationMockBackend::new());
    backend.fail_all_requests.store(true, Ordering::SeqCst);
    let mut client = client_with(backend);
    let mut display = DisplayState::default();

    assert_eq!(submit_and_wait(&client, "hello").await, SubmitOutcome::Failed);
    sync(&mut client, &mut display);

    assert_eq!(
        rendered(&display),
        vec![
            (DisplayRole::User, "hello".to_string()),
            (DisplayRole::Error, GENERIC_ERROR_MESSAGE.to_string()),
        ]
    );
    assert!(display.input_enabled);

    // The log never saw the error bubble
    let entries = client.session().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].role, MessageRole::User);
}

#[tokio::test]
async fn test_input_disabled_while_pending() {
    let backend = Arc::new(IntegrationMockBackend::gated());
    let mut client = client_with(backend.clone());
    let mut display = DisplayState::default();

    let handle = client.submit("hello").unwrap();

    // Wait for the session to enter the pending state
    timeout(Duration::from_secs(5), async {
        while !client.is_pending() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("exchange started");
    sync(&mut client, &mut display);

    assert!(display.is_pending());
    assert!(!display.input_enabled);
    display.insert_char('x');
    assert_eq!(display.input, "");
    assert!(display.submittable_input().is_none());

    backend.release();
    handle.await.unwrap();
    sync(&mut client, &mut display);

    assert!(!display.is_pending());
    assert!(display.input_enabled);
}

#[tokio::test]
async fn test_new_conversation_clears_thread_keeps_history() {
    let backend = Arc::new(IntegrationMockBackend::new());
    let mut client = client_with(backend);
    let mut display = DisplayState::default();

    submit_and_wait(&client, "first topic").await;
    sync(&mut client, &mut display);
    display.toggle_sidebar();

    client.start_new();
    sync(&mut client, &mut display);

    assert!(display.messages.is_empty());
    assert!(display.welcome_visible);
    assert!(display.shows_welcome());
    assert!(!display.sidebar_open);
    assert_eq!(
        display.summaries.iter().collect::<Vec<_>>(),
        vec!["first topic"]
    );
    assert_eq!(client.session().log_len(), 0);
}

#[tokio::test]
async fn test_sidebar_keeps_ten_most_recent_conversations() {
    let backend = Arc::new(IntegrationMockBackend::new());
    let mut client = client_with(backend);
    let mut display = DisplayState::new(10);

    for i in 0..12 {
        submit_and_wait(&client, &format!("topic {i}")).await;
        client.start_new();
    }
    sync(&mut client, &mut display);

    let labels: Vec<&str> = display.summaries.iter().collect();
    assert_eq!(labels.len(), 10);
    assert_eq!(labels.first().copied(), Some("topic 11"));
    assert_eq!(labels.last().copied(), Some("topic 2"));
}

#[tokio::test]
async fn test_abandoned_reply_never_rendered() {
    let backend = Arc::new(IntegrationMockBackend::gated());
    let mut client = client_with(backend.clone());
    let mut display = DisplayState::default();

    let handle = client.submit("old question").unwrap();
    timeout(Duration::from_secs(5), async {
        while !client.is_pending() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("exchange started");

    client.start_new();
    backend.release();
    assert_eq!(handle.await.unwrap(), Some(SubmitOutcome::Stale));
    sync(&mut client, &mut display);

    assert!(display.messages.is_empty());
    assert!(!display.is_pending());
    assert!(display.input_enabled);
    assert!(display.summaries.is_empty());
}
