//! GraceWise Conductor - Headless Chat Session Core
//!
//! This crate owns everything about a GraceWise conversation that is not
//! drawing: the conversation log, the one-at-a-time question/answer
//! exchange, and the mapping of each exchange's outcome onto UI state. It can
//! drive a TUI, a web front-end, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      UI Surfaces                          │
//! │     ┌─────────┐     ┌─────────┐     ┌────────────────┐    │
//! │     │   TUI   │     │   Web   │     │    Headless    │    │
//! │     └────┬────┘     └────┬────┘     └───────┬────────┘    │
//! │          └───────────────┴──────────────────┘             │
//! │                          │                                │
//! │                 SurfaceEvent (up)                         │
//! │                 UiDirective (down)                        │
//! └──────────────────────────┼────────────────────────────────┘
//!                            │
//! ┌──────────────────────────┼────────────────────────────────┐
//! │                   GRACEWISE CONDUCTOR                     │
//! │   ┌──────────────────────┴──────────────────────────┐     │
//! │   │                  ChatSession                     │     │
//! │   │   ┌──────────────────┐   ┌───────────────────┐   │     │
//! │   │   │ ConversationLog  │   │  QuestionBackend  │   │     │
//! │   │   └──────────────────┘   │  (HTTP / Mock)    │   │     │
//! │   │                          └───────────────────┘   │     │
//! │   └──────────────────────────────────────────────────┘     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatSession`]: Owns the log and runs `submit` / `start_new`
//! - [`QuestionBackend`]: One question in, one reply (or [`TransportError`]) out
//! - [`UiDirective`]: What a surface should render, in order
//! - [`SummaryList`]: The sidebar's bounded list of past conversations
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use gracewise_conductor::{backend_from_config, load_config, ChatSession};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let backend = backend_from_config(&config.backend_config())?;
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!     let session = Arc::new(ChatSession::new(backend, config.session_config(), tx));
//!
//!     session.submit("How long should a first-grade lesson be?").await;
//!     while let Ok(directive) = rx.try_recv() {
//!         // Render directive
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod conversation;
pub mod error;
pub mod events;
pub mod messages;
pub mod session;
pub mod sidebar;

// Re-exports for convenience
pub use backend::{
    backend_from_config, BackendConfig, HttpBackend, MockBackend, QuestionBackend, ReplyField,
    ReplyFields, CANNED_REPLY,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ChatConfig, ChatToml, ConfigError,
    ConfigOverrides, ConfigSource,
};
pub use conversation::{ConversationEntry, ConversationLog};
pub use error::TransportError;
pub use events::SurfaceEvent;
pub use messages::{BubbleKind, MessageId, MessageRole, PendingId, SessionId, UiDirective};
pub use session::{
    ChatSession, ExchangePhase, SessionConfig, SessionUiState, SubmitOutcome,
    GENERIC_ERROR_MESSAGE,
};
pub use sidebar::{summary_label, SummaryList};
