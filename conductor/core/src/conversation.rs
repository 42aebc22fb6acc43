//! Conversation Log
//!
//! The ordered record of one conversation. Entries are immutable once
//! appended and insertion order is chronological order. The log is only ever
//! appended to or cleared as a whole.
//!
//! The log and the rendered thread are allowed to disagree: a failed exchange
//! renders an error bubble that never becomes a log entry.

use serde::{Deserialize, Serialize};

use crate::messages::MessageRole;

/// One logged message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Who wrote it
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// When it was logged (Unix timestamp ms)
    #[serde(default)]
    pub timestamp: u64,
}

impl ConversationEntry {
    /// Create a new entry stamped with the current time
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_ms(),
        }
    }

    /// User entry
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Assistant entry
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Append-only conversation history
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    /// Append a user entry
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ConversationEntry::user(content));
    }

    /// Append an assistant entry
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ConversationEntry::assistant(content));
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first
    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first user message of the conversation
    #[must_use]
    pub fn first_user_message(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.role == MessageRole::User)
            .map(|e| e.content.as_str())
    }

    /// Whether roles alternate user/assistant starting with user
    ///
    /// Holds while every exchange succeeds; a failed exchange leaves two user
    /// entries back to back.
    #[must_use]
    pub fn alternates(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, e)| {
            let expected = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            e.role == expected
        })
    }
}

/// Get current timestamp in milliseconds
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_starts_empty() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.first_user_message().is_none());
        assert!(log.alternates());
    }

    #[test]
    fn test_push_and_order() {
        let mut log = ConversationLog::new();
        log.push_user("hello");
        log.push_assistant("hi there");
        log.push_user("second");

        let contents: Vec<&str> = log.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi there", "second"]);
        assert_eq!(log.first_user_message(), Some("hello"));
        assert_eq!(log.entries()[2].role, MessageRole::User);
        assert!(log.alternates());
    }

    #[test]
    fn test_failed_exchange_breaks_alternation() {
        let mut log = ConversationLog::new();
        log.push_user("first, failed");
        log.push_user("second");
        assert!(!log.alternates());
    }

    #[test]
    fn test_clear() {
        let mut log = ConversationLog::new();
        log.push_user("hello");
        log.clear();
        assert!(log.is_empty());
    }
}
