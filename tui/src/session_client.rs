//! Session Client
//!
//! Thin wrapper around a [`ChatSession`] for TUI integration.
//! This client embeds the session directly (no network between surface and
//! controller) and provides a convenient interface for sending events and
//! receiving directives.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any conversation logic.
//! The TUI's job is:
//! 1. Convert terminal events to `SurfaceEvent`s
//! 2. Send them to the session (exchanges run on their own task)
//! 3. Receive `UiDirective`s
//! 4. Render display state based on directives

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use gracewise_conductor::{
    backend_from_config, ChatConfig, ChatSession, QuestionBackend, SessionConfig, SubmitOutcome,
    SurfaceEvent, UiDirective,
};

/// Client for communicating with the embedded session
pub struct SessionClient {
    /// The embedded session
    session: Arc<ChatSession>,
    /// Receiver for directives from the session
    rx: mpsc::UnboundedReceiver<UiDirective>,
}

impl SessionClient {
    /// Create a client around the given backend
    pub fn new(backend: Arc<dyn QuestionBackend>, config: SessionConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Arc::new(ChatSession::new(backend, config, tx));
        Self { session, rx }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &ChatConfig) -> anyhow::Result<Self> {
        let backend = backend_from_config(&config.backend_config())?;
        Ok(Self::new(backend, config.session_config()))
    }

    /// Send a surface event to the session
    ///
    /// `Submit` runs on a spawned task so the event loop keeps drawing while
    /// the exchange is pending. `StartNew` is applied immediately.
    pub fn send_event(&self, event: SurfaceEvent) -> Option<JoinHandle<Option<SubmitOutcome>>> {
        match event {
            SurfaceEvent::StartNew => {
                self.session.start_new();
                None
            }
            submit @ SurfaceEvent::Submit { .. } => {
                let session = Arc::clone(&self.session);
                Some(tokio::spawn(async move {
                    let outcome = session.handle_event(submit).await;
                    tracing::debug!(outcome = ?outcome, "Exchange finished");
                    outcome
                }))
            }
        }
    }

    /// Submit the input field contents
    pub fn submit(&self, raw_input: impl Into<String>) -> Option<JoinHandle<Option<SubmitOutcome>>> {
        self.send_event(SurfaceEvent::submit(raw_input))
    }

    /// Start a fresh conversation
    pub fn start_new(&self) {
        self.send_event(SurfaceEvent::StartNew);
    }

    /// Receive all pending directives from the session (non-blocking)
    pub fn recv_all(&mut self) -> Vec<UiDirective> {
        let mut directives = Vec::new();
        while let Ok(directive) = self.rx.try_recv() {
            directives.push(directive);
        }
        directives
    }

    /// Name of the backend answering questions
    pub fn backend_name(&self) -> &str {
        self.session.backend_name()
    }

    /// Whether an exchange is in flight
    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// The embedded session
    pub fn session(&self) -> &Arc<ChatSession> {
        &self.session
    }
}
