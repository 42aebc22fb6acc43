//! Chat Session
//!
//! The conversation session controller. A [`ChatSession`] owns one
//! conversation log, runs one question/answer exchange at a time, and tells
//! its surface what to render through a [`UiDirective`] channel.
//!
//! # Exchange Lifecycle
//!
//! ```text
//! Idle --submit--> Pending --reply--> Resolved --> Idle
//!                          \--error--> Failed ----> Idle
//! ```
//!
//! A submit while `Pending` is rejected with [`SubmitOutcome::Busy`].
//! [`ChatSession::start_new`] bumps the conversation generation, so a reply
//! that arrives for an abandoned conversation is dropped as
//! [`SubmitOutcome::Stale`] without touching the log or the surface.
//!
//! Directives are emitted while the state lock is held, so the surface sees
//! them in exactly the order the state changed.
//!
//! A submit future dropped mid-exchange (timeout, `select!`, aborted task)
//! still returns the session to `Idle`: its exchange guard settles the
//! pending indicator and re-enables input on drop.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::backend::QuestionBackend;
use crate::conversation::{ConversationEntry, ConversationLog};
use crate::events::SurfaceEvent;
use crate::messages::{BubbleKind, MessageId, PendingId, SessionId, UiDirective};
use crate::sidebar::{summary_label, DEFAULT_LABEL_CHARS};

/// Shown to the user for every failed exchange
pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, there was an error connecting to the server. Please try again.";

/// Session behaviour settings
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Sidebar label length in characters before truncation
    pub summary_label_chars: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            summary_label_chars: DEFAULT_LABEL_CHARS,
        }
    }
}

/// Where the current exchange stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangePhase {
    /// Ready for a submit
    Idle,
    /// Waiting on the backend
    Pending,
}

/// Result of one [`ChatSession::submit`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened
    Ignored,
    /// Another exchange was pending; nothing happened
    Busy,
    /// Reply appended to the log and rendered
    Resolved,
    /// Error bubble rendered; log holds only the user entry
    Failed,
    /// Conversation was restarted mid-flight; reply discarded
    Stale,
}

/// Derived UI state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionUiState {
    /// An exchange is in flight
    pub pending: bool,
    /// Input field and send affordance accept input
    pub input_enabled: bool,
}

impl From<ExchangePhase> for SessionUiState {
    fn from(phase: ExchangePhase) -> Self {
        let pending = phase == ExchangePhase::Pending;
        Self {
            pending,
            input_enabled: !pending,
        }
    }
}

/// Mutable session state, guarded by one lock
#[derive(Debug)]
struct SessionState {
    log: ConversationLog,
    phase: ExchangePhase,
    /// Bumped by every `start_new`
    generation: u64,
    welcome_shown: bool,
    /// Set per conversation, cleared by its first successful reply
    first_exchange_pending: bool,
    last_summary: Option<String>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            log: ConversationLog::new(),
            phase: ExchangePhase::Idle,
            generation: 0,
            welcome_shown: true,
            first_exchange_pending: true,
            last_summary: None,
        }
    }
}

/// A conversation session
pub struct ChatSession<B: QuestionBackend + ?Sized = dyn QuestionBackend> {
    /// Unique session ID
    id: SessionId,
    /// Question backend
    backend: Arc<B>,
    /// Settings
    config: SessionConfig,
    /// Conversation and exchange state
    state: Mutex<SessionState>,
    /// Channel to the UI surface
    tx: mpsc::UnboundedSender<UiDirective>,
}

impl<B: QuestionBackend + ?Sized> ChatSession<B> {
    /// Create a session that renders through `tx`
    pub fn new(
        backend: Arc<B>,
        config: SessionConfig,
        tx: mpsc::UnboundedSender<UiDirective>,
    ) -> Self {
        let id = SessionId::new();
        tracing::info!(session = %id.0, backend = backend.name(), "Session created");
        Self {
            id,
            backend,
            config,
            state: Mutex::new(SessionState::new()),
            tx,
        }
    }

    /// Get the session ID
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Name of the backend answering questions
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Current exchange phase
    pub fn phase(&self) -> ExchangePhase {
        self.state.lock().phase
    }

    /// Whether an exchange is in flight
    pub fn is_pending(&self) -> bool {
        self.phase() == ExchangePhase::Pending
    }

    /// Derived UI state
    pub fn ui_state(&self) -> SessionUiState {
        self.phase().into()
    }

    /// Snapshot of the conversation log
    pub fn entries(&self) -> Vec<ConversationEntry> {
        self.state.lock().log.entries().to_vec()
    }

    /// Number of logged entries
    pub fn log_len(&self) -> usize {
        self.state.lock().log.len()
    }

    /// The most recently registered sidebar label
    pub fn last_summary(&self) -> Option<String> {
        self.state.lock().last_summary.clone()
    }

    /// Forward a surface event
    ///
    /// Returns the submit outcome for `Submit`, None for `StartNew`.
    pub async fn handle_event(&self, event: SurfaceEvent) -> Option<SubmitOutcome> {
        match event {
            SurfaceEvent::Submit { raw_input } => Some(self.submit(&raw_input).await),
            SurfaceEvent::StartNew => {
                self.start_new();
                None
            }
        }
    }

    /// Run one exchange for the user's input
    ///
    /// Never returns an error: failures become a generic error bubble and a
    /// diagnostic log line, and the session always ends `Idle`.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let content = raw_input.trim();
        if content.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let (generation, indicator) = {
            let mut state = self.state.lock();
            if state.phase == ExchangePhase::Pending {
                tracing::warn!(session = %self.id.0, "Submit rejected, exchange already pending");
                return SubmitOutcome::Busy;
            }

            if state.welcome_shown {
                state.welcome_shown = false;
                self.emit(UiDirective::HideWelcome);
            }

            state.log.push_user(content);
            self.emit(UiDirective::Message {
                id: MessageId::new(),
                kind: BubbleKind::User,
                content: content.to_string(),
            });

            self.emit(UiDirective::ClearInput);
            state.phase = ExchangePhase::Pending;
            self.emit(UiDirective::InputEnabled { enabled: false });

            let indicator = PendingId::new();
            self.emit(UiDirective::PendingShown {
                indicator: indicator.clone(),
            });

            (state.generation, indicator)
        };

        tracing::debug!(
            session = %self.id.0,
            generation = generation,
            chars = content.chars().count(),
            "Exchange started"
        );

        let exchange = PendingExchange {
            session: self,
            generation,
            indicator,
            settled: false,
        };
        let result = self.backend.ask(content).await;
        let indicator = exchange.complete();

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(
                session = %self.id.0,
                generation = generation,
                current = state.generation,
                "Discarding reply for abandoned conversation"
            );
            return SubmitOutcome::Stale;
        }

        self.emit(UiDirective::PendingRemoved { indicator });

        let outcome = match result {
            Ok(reply) => {
                state.log.push_assistant(reply.clone());
                self.emit(UiDirective::Message {
                    id: MessageId::new(),
                    kind: BubbleKind::Assistant,
                    content: reply,
                });

                if state.first_exchange_pending {
                    state.first_exchange_pending = false;
                    let label = state
                        .log
                        .first_user_message()
                        .map(|first| summary_label(first, self.config.summary_label_chars));
                    if let Some(label) = label {
                        state.last_summary = Some(label.clone());
                        self.emit(UiDirective::SummaryAdded { label });
                    }
                }

                SubmitOutcome::Resolved
            }
            Err(e) => {
                tracing::error!(
                    session = %self.id.0,
                    backend = self.backend.name(),
                    server_side = e.is_server_side(),
                    error = %e,
                    "Exchange failed"
                );
                self.emit(UiDirective::Message {
                    id: MessageId::new(),
                    kind: BubbleKind::Error,
                    content: GENERIC_ERROR_MESSAGE.to_string(),
                });
                SubmitOutcome::Failed
            }
        };

        state.phase = ExchangePhase::Idle;
        self.emit(UiDirective::InputEnabled { enabled: true });

        outcome
    }

    /// Throw the conversation away and show the empty state
    ///
    /// Safe to call repeatedly. An exchange still in flight is abandoned: its
    /// reply will be discarded and input is re-enabled immediately.
    pub fn start_new(&self) {
        let mut state = self.state.lock();
        let was_pending = state.phase == ExchangePhase::Pending;

        state.log.clear();
        state.generation += 1;
        state.phase = ExchangePhase::Idle;
        state.first_exchange_pending = true;
        state.welcome_shown = true;

        self.emit(UiDirective::ClearMessages);
        self.emit(UiDirective::ShowWelcome);
        self.emit(UiDirective::ClearInput);
        if was_pending {
            self.emit(UiDirective::InputEnabled { enabled: true });
        }
        self.emit(UiDirective::CloseSidebar);

        tracing::info!(
            session = %self.id.0,
            generation = state.generation,
            abandoned_exchange = was_pending,
            "Started new conversation"
        );
    }

    /// Settle an exchange whose submit future was dropped before the reply
    fn cancel_exchange(&self, generation: u64, indicator: PendingId) {
        let mut state = self.state.lock();
        if state.generation != generation || state.phase != ExchangePhase::Pending {
            return;
        }

        tracing::warn!(
            session = %self.id.0,
            generation = generation,
            "Exchange cancelled before a reply arrived"
        );
        self.emit(UiDirective::PendingRemoved { indicator });
        state.phase = ExchangePhase::Idle;
        self.emit(UiDirective::InputEnabled { enabled: true });
    }

    /// Send a directive to the UI surface
    fn emit(&self, directive: UiDirective) {
        tracing::trace!(directive = ?directive, "Directive");
        if let Err(e) = self.tx.send(directive) {
            tracing::warn!("Failed to send directive to surface: {}", e);
        }
    }
}

/// An exchange awaiting its reply
///
/// Dropping it before [`PendingExchange::complete`] cancels the exchange.
struct PendingExchange<'a, B: QuestionBackend + ?Sized> {
    session: &'a ChatSession<B>,
    generation: u64,
    indicator: PendingId,
    settled: bool,
}

impl<B: QuestionBackend + ?Sized> PendingExchange<'_, B> {
    /// The reply arrived; hand back the indicator to remove
    fn complete(mut self) -> PendingId {
        self.settled = true;
        self.indicator.clone()
    }
}

impl<B: QuestionBackend + ?Sized> Drop for PendingExchange<'_, B> {
    fn drop(&mut self) {
        if !self.settled {
            self.session
                .cancel_exchange(self.generation, self.indicator.clone());
        }
    }
}
