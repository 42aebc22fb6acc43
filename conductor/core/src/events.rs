//! Surface Events
//!
//! Events sent from a UI surface to its chat session. Surfaces do not
//! interpret user actions; they forward them and render whatever
//! [`UiDirective`](crate::UiDirective)s come back.

use serde::{Deserialize, Serialize};

/// Events from UI surface to session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// User submitted the input field
    Submit {
        /// Raw, untrimmed input text
        raw_input: String,
    },

    /// User asked for a fresh conversation
    StartNew,
}

impl SurfaceEvent {
    /// Submit event for the given raw input
    pub fn submit(raw_input: impl Into<String>) -> Self {
        Self::Submit {
            raw_input: raw_input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_keeps_raw_input() {
        let event = SurfaceEvent::submit("  padded  ");
        assert_eq!(
            event,
            SurfaceEvent::Submit {
                raw_input: "  padded  ".to_string()
            }
        );
    }
}
