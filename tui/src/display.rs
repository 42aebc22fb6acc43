//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from [`UiDirective`]s and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the session tells it to.
//! Display state is the bridge between directives and rendering.
//!
//! - `DisplayMessage`: A rendered bubble
//! - `DisplayState`: Bubbles, pending indicator, input field, welcome
//!   placeholder and sidebar, all in one place

use std::time::Duration;

use gracewise_conductor::{BubbleKind, MessageId, PendingId, SummaryList, UiDirective};

/// How often the pending indicator advances one dot
const PENDING_FRAME: Duration = Duration::from_millis(400);

/// A rendered conversation bubble
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Unique message ID
    pub id: MessageId,
    /// What kind of bubble this is
    pub role: DisplayRole,
    /// The bubble text
    pub content: String,
}

impl DisplayMessage {
    /// Create a new display message
    pub fn new(id: MessageId, kind: BubbleKind, content: String) -> Self {
        Self {
            id,
            role: kind.into(),
            content,
        }
    }
}

/// Display role for bubbles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayRole {
    /// User input
    User,
    /// Assistant reply
    Assistant,
    /// Generic error notice
    Error,
}

impl From<BubbleKind> for DisplayRole {
    fn from(kind: BubbleKind) -> Self {
        match kind {
            BubbleKind::User => DisplayRole::User,
            BubbleKind::Assistant => DisplayRole::Assistant,
            BubbleKind::Error => DisplayRole::Error,
        }
    }
}

impl DisplayRole {
    /// Get the prefix for this role
    pub fn prefix(&self) -> &'static str {
        match self {
            DisplayRole::User => "You: ",
            DisplayRole::Assistant => "GraceWise: ",
            DisplayRole::Error => "! ",
        }
    }
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Conversation bubbles, oldest first
    pub messages: Vec<DisplayMessage>,
    /// Pending indicator currently shown (if any)
    pub pending: Option<PendingId>,
    /// Time the pending indicator has been visible
    pending_elapsed: Duration,
    /// Input field contents
    pub input: String,
    /// Input field and send affordance accept input
    pub input_enabled: bool,
    /// Welcome placeholder visible
    pub welcome_visible: bool,
    /// Sidebar open
    pub sidebar_open: bool,
    /// Past conversation labels, most recent first
    pub summaries: SummaryList,
    /// Scroll offset (lines from bottom, 0 = latest)
    pub scroll_offset: usize,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(SummaryList::default().capacity())
    }
}

impl DisplayState {
    /// Create a new display state keeping at most `sidebar_capacity` summaries
    pub fn new(sidebar_capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            pending: None,
            pending_elapsed: Duration::ZERO,
            input: String::new(),
            input_enabled: true,
            welcome_visible: true,
            sidebar_open: false,
            summaries: SummaryList::new(sidebar_capacity),
            scroll_offset: 0,
        }
    }

    /// Apply a directive to update display state
    pub fn apply(&mut self, directive: UiDirective) {
        let pin_to_bottom = directive.mutates_thread();

        match directive {
            // Thread
            UiDirective::Message { id, kind, content } => {
                self.messages.push(DisplayMessage::new(id, kind, content));
            }
            UiDirective::PendingShown { indicator } => {
                self.pending = Some(indicator);
                self.pending_elapsed = Duration::ZERO;
            }
            UiDirective::PendingRemoved { indicator } => {
                if self.pending.as_ref() == Some(&indicator) {
                    self.pending = None;
                }
            }
            UiDirective::ClearMessages => {
                self.messages.clear();
                self.pending = None;
            }

            // Placeholder
            UiDirective::ShowWelcome => self.welcome_visible = true,
            UiDirective::HideWelcome => self.welcome_visible = false,

            // Input
            UiDirective::ClearInput => self.input.clear(),
            UiDirective::InputEnabled { enabled } => self.input_enabled = enabled,

            // Sidebar
            UiDirective::SummaryAdded { label } => {
                self.summaries.push(label);
            }
            UiDirective::CloseSidebar => self.sidebar_open = false,
        }

        if pin_to_bottom {
            self.scroll_offset = 0;
        }
    }

    /// Update timers (call once per frame)
    pub fn update(&mut self, delta: Duration) {
        if self.pending.is_some() {
            self.pending_elapsed += delta;
        }
    }

    /// Whether the pending indicator is visible
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Animated dots for the pending indicator ("." to "...")
    pub fn pending_dots(&self) -> &'static str {
        let frame = self.pending_elapsed.as_millis() / PENDING_FRAME.as_millis();
        match frame % 3 {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }

    /// Whether the placeholder should be drawn instead of the thread
    pub fn shows_welcome(&self) -> bool {
        self.welcome_visible && self.messages.is_empty() && self.pending.is_none()
    }

    /// Open or close the sidebar
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    // ========================================================================
    // Input editing
    // ========================================================================

    /// Type a character (ignored while input is disabled)
    pub fn insert_char(&mut self, c: char) {
        if self.input_enabled {
            self.input.push(c);
        }
    }

    /// Insert a line break (ignored while input is disabled)
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the last character (ignored while input is disabled)
    pub fn backspace(&mut self) {
        if self.input_enabled {
            self.input.pop();
        }
    }

    /// Current input, if it may be submitted
    pub fn submittable_input(&self) -> Option<&str> {
        if self.input_enabled && !self.input.trim().is_empty() {
            Some(&self.input)
        } else {
            None
        }
    }

    // ========================================================================
    // Scrolling
    // ========================================================================

    /// Scroll towards older lines, never past `max_offset`
    pub fn scroll_up(&mut self, lines: usize, max_offset: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(max_offset);
    }

    /// Scroll towards the latest line
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}
