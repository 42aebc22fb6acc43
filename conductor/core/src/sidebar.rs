//! Conversation Summaries
//!
//! The sidebar's list of past conversations: one short label per
//! conversation, most recent first, bounded in size. Surfaces own a
//! [`SummaryList`] and feed it from `SummaryAdded` directives; the session
//! only produces labels via [`summary_label`].

use std::collections::VecDeque;

/// Default number of summaries kept
pub const DEFAULT_SUMMARY_CAPACITY: usize = 10;

/// Default label length in characters (before the ellipsis)
pub const DEFAULT_LABEL_CHARS: usize = 50;

/// Marker appended to truncated labels
pub const ELLIPSIS: &str = "...";

/// Build a sidebar label from a conversation's first message
///
/// Counts characters, not bytes, so multi-byte text is never split.
#[must_use]
pub fn summary_label(message: &str, max_chars: usize) -> String {
    let mut chars = message.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &message[..cut]),
        None => message.to_string(),
    }
}

/// Bounded most-recent-first list of summary labels
#[derive(Clone, Debug)]
pub struct SummaryList {
    labels: VecDeque<String>,
    capacity: usize,
}

impl Default for SummaryList {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_CAPACITY)
    }
}

impl SummaryList {
    /// Create a list holding at most `capacity` labels
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest label when over capacity
    ///
    /// Returns the evicted label, if any.
    pub fn push(&mut self, label: impl Into<String>) -> Option<String> {
        self.labels.push_front(label.into());
        if self.labels.len() > self.capacity {
            let evicted = self.labels.pop_back();
            if let Some(ref label) = evicted {
                tracing::debug!(label = %label, "Evicted oldest conversation summary");
            }
            evicted
        } else {
            None
        }
    }

    /// Labels, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Number of labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Maximum number of labels kept
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_untouched() {
        assert_eq!(summary_label("hello world", 50), "hello world");
    }

    #[test]
    fn test_exactly_fifty_chars_untouched() {
        let message = "a".repeat(50);
        assert_eq!(summary_label(&message, 50), message);
    }

    #[test]
    fn test_long_label_truncated_with_ellipsis() {
        let message = "How should I structure a four-day homeschool week for two kids?";
        let label = summary_label(message, 50);
        assert_eq!(label.chars().count(), 53);
        assert!(label.ends_with("..."));
        assert_eq!(&label[..50], &message[..50]);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let message = "é".repeat(60);
        let label = summary_label(&message, 50);
        assert_eq!(label, format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn test_most_recent_first() {
        let mut list = SummaryList::default();
        list.push("first");
        list.push("second");
        let labels: Vec<&str> = list.iter().collect();
        assert_eq!(labels, vec!["second", "first"]);
        assert_eq!(list.iter().next(), Some("second"));
    }

    #[test]
    fn test_oldest_evicted_past_capacity() {
        let mut list = SummaryList::default();
        for i in 0..10 {
            assert!(list.push(format!("conversation {i}")).is_none());
        }
        let evicted = list.push("conversation 10");
        assert_eq!(evicted.as_deref(), Some("conversation 0"));
        assert_eq!(list.len(), 10);
        assert_eq!(list.iter().next(), Some("conversation 10"));
        assert_eq!(list.iter().last(), Some("conversation 1"));
    }
}
