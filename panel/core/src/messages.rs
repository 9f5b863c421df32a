//! Panel Messages
//!
//! Messages sent from the Panel engine to the UI surface. The surface is a
//! pure renderer: it applies these to its display state and never decides
//! anything on its own.
//!
//! # Ordering
//!
//! For one exchange the surface always observes:
//!
//! ```text
//! Message(User) -> InputCleared -> Busy(true) -> Busy(false)
//!   -> RevealStarted -> RevealProgress* -> RevealFinished
//! ```
//!
//! `ScrollToLatest` follows every reveal message.

use serde::{Deserialize, Serialize};

use crate::citations::CitationBlock;
use crate::markup::Markup;

/// Messages from Panel to UI Surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PanelMessage {
    // ============================================
    // Message Log
    // ============================================
    /// A complete entry was appended to the log
    Message {
        /// Unique entry ID
        id: MessageId,
        /// Who sent this entry
        role: MessageRole,
        /// Plain content
        content: String,
    },

    /// An assistant entry started revealing (content is empty)
    RevealStarted {
        /// Entry being revealed
        id: MessageId,
    },

    /// More plain text of the in-progress entry is visible
    RevealProgress {
        /// Entry being revealed
        id: MessageId,
        /// Full plain buffer revealed so far
        revealed: String,
    },

    /// Reveal completed; content is swapped for rendered markup
    RevealFinished {
        /// Entry that completed
        id: MessageId,
        /// Rendered reply
        markup: Markup,
        /// Reference block appended after the markup
        citations: Option<CitationBlock>,
    },

    /// Keep the newest entry visible
    ScrollToLatest,

    // ============================================
    // Input Directives
    // ============================================
    /// Clear the input control
    InputCleared,

    /// Busy state changed (submit affordance disabled while busy)
    Busy {
        /// Whether an exchange is in flight
        busy: bool,
    },

    // ============================================
    // Viewer / Layout Directives
    // ============================================
    /// Document viewer navigation target changed
    ViewerNavigate {
        /// New navigation target (`<base>#page=N&view=Fit`)
        target: String,
        /// Page shown
        page: i64,
    },

    /// Viewer pane width changed during a drag
    PaneWidth {
        /// New width
        width: i32,
    },

    /// Drag-resize gesture started or ended
    Resizing {
        /// Whether a drag is active
        active: bool,
    },

    /// Sidebar visibility changed
    Sidebar {
        /// Whether the sidebar is collapsed
        collapsed: bool,
        /// Label for the toggle control
        label: String,
    },
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

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a log entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// The visitor
    User,
    /// The backend chat service
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
        assert!(a.0.starts_with("msg_"));
    }

    #[test]
    fn test_message_serializes() {
        let msg = PanelMessage::ViewerNavigate {
            target: "/doc.pdf#page=2&view=Fit".to_string(),
            page: 2,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: PanelMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
