//! Surface Directives
//!
//! Directives sent from a [`ChatSession`](crate::ChatSession) to the UI
//! surface that renders it. The surface holds no conversation logic: it
//! applies these in order and pins its scroll position to the bottom after
//! every directive that changes the rendered thread.
//!
//! # Design Philosophy
//!
//! The session is the only owner of conversation state. Surfaces are pure
//! renderers that display what they are told, which keeps a headless test
//! harness and a terminal surface interchangeable.

use serde::{Deserialize, Serialize};

/// Directives from a chat session to its UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiDirective {
    // ============================================
    // Thread
    // ============================================
    /// Append a message bubble
    Message {
        /// Unique bubble ID
        id: MessageId,
        /// What kind of bubble to draw
        kind: BubbleKind,
        /// Bubble text
        content: String,
    },

    /// Show the transient pending indicator
    PendingShown {
        /// Identifier used to remove it later
        indicator: PendingId,
    },

    /// Remove a pending indicator (no-op if already gone)
    PendingRemoved {
        /// Indicator to remove
        indicator: PendingId,
    },

    /// Remove every rendered bubble and indicator
    ClearMessages,

    // ============================================
    // Placeholder
    // ============================================
    /// Show the welcome / empty-state placeholder
    ShowWelcome,

    /// Hide the welcome placeholder
    HideWelcome,

    // ============================================
    // Input
    // ============================================
    /// Empty the input field
    ClearInput,

    /// Enable or disable the input field and send affordance
    InputEnabled {
        /// Whether input is accepted
        enabled: bool,
    },

    // ============================================
    // Sidebar
    // ============================================
    /// Register a conversation summary label
    SummaryAdded {
        /// Short label for the conversation
        label: String,
    },

    /// Close the sidebar if it is open
    CloseSidebar,
}

impl UiDirective {
    /// Whether this directive changes the rendered thread
    #[must_use]
    pub fn mutates_thread(&self) -> bool {
        matches!(
            self,
            Self::Message { .. }
                | Self::PendingShown { .. }
                | Self::PendingRemoved { .. }
                | Self::ClearMessages
        )
    }
}

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending indicator identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingId(pub String);

impl PendingId {
    /// Generate a new unique indicator ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("typing_{id}"))
    }
}

impl Default for PendingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    ///
    /// Uses an atomic counter combined with timestamp to ensure uniqueness
    /// even when multiple sessions are created in the same millisecond.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(format!("session_{timestamp}_{count}"))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who wrote a logged conversation entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input
    User,
    /// Endpoint reply
    Assistant,
}

/// How a bubble is drawn
///
/// Error bubbles are drawn on the assistant side but never reach the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleKind {
    /// User message
    User,
    /// Assistant reply
    Assistant,
    /// Generic failure notice
    Error,
}

impl From<MessageRole> for BubbleKind {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Self::User,
            MessageRole::Assistant => Self::Assistant,
        }
    }
}
