//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from PanelMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Panel tells it to.
//! Display state is the bridge between PanelMessages and rendering.
//!
//! - DisplayMessage: A conversation entry as shown
//! - DisplayViewer: The document viewer's target and page
//! - DisplayState: Everything the frame renderer reads

use panel_core::{CitationBlock, Markup, MessageId, MessageRole, PanelMessage};

/// What a conversation entry shows
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayBody {
    /// Finished plain text (user entries)
    Text(String),
    /// Plain text still being revealed
    Revealing(String),
    /// Final rendered reply
    Rendered {
        /// Rendered reply
        markup: Markup,
        /// Reference block, if pages were cited
        citations: Option<CitationBlock>,
    },
}

/// A conversation entry as shown
#[derive(Clone, Debug)]
pub struct DisplayMessage {
    /// Unique entry ID
    pub id: MessageId,
    /// Who sent this entry
    pub role: DisplayRole,
    /// Content
    pub body: DisplayBody,
}

impl DisplayMessage {
    /// Create a finished message
    pub fn new(id: MessageId, role: MessageRole, content: String) -> Self {
        Self {
            id,
            role: role.into(),
            body: DisplayBody::Text(content),
        }
    }

    /// Create an empty assistant message that will be revealed
    pub fn revealing(id: MessageId) -> Self {
        Self {
            id,
            role: DisplayRole::Assistant,
            body: DisplayBody::Revealing(String::new()),
        }
    }

    /// Whether the reveal is still running
    pub fn is_revealing(&self) -> bool {
        matches!(self.body, DisplayBody::Revealing(_))
    }
}

/// Display role for messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayRole {
    /// The visitor
    User,
    /// The chat service
    Assistant,
}

impl From<MessageRole> for DisplayRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => DisplayRole::User,
            MessageRole::Assistant => DisplayRole::Assistant,
        }
    }
}

impl DisplayRole {
    /// Header label for this role
    pub fn label(&self) -> &'static str {
        match self {
            DisplayRole::User => "You",
            DisplayRole::Assistant => "Assistant",
        }
    }
}

/// The document viewer as shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayViewer {
    /// Current navigation target
    pub target: String,
    /// Page shown, once a citation was followed
    pub page: Option<i64>,
}

/// Sidebar document card
#[derive(Clone, Debug, Default)]
pub struct DocumentCard {
    /// Document title
    pub title: Option<String>,
    /// Rating out of five
    pub rating: Option<f64>,
}

/// Complete display state for rendering
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Conversation entries
    pub messages: Vec<DisplayMessage>,
    /// Whether an exchange is in flight
    pub busy: bool,
    /// Document viewer, if present
    pub viewer: Option<DisplayViewer>,
    /// Viewer pane width in columns
    pub pane_width: u16,
    /// Whether a resize drag is active
    pub resizing: bool,
    /// Whether the sidebar is hidden
    pub sidebar_collapsed: bool,
    /// Sidebar toggle label
    pub sidebar_label: String,
    /// Sidebar document card
    pub document: DocumentCard,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            busy: false,
            viewer: None,
            pane_width: 0,
            resizing: false,
            sidebar_collapsed: false,
            sidebar_label: "Hide Sidebar".to_string(),
            document: DocumentCard::default(),
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a document viewer starting at `target`
    #[must_use]
    pub fn with_viewer(mut self, target: impl Into<String>, width: u16) -> Self {
        self.viewer = Some(DisplayViewer {
            target: target.into(),
            page: None,
        });
        self.pane_width = width;
        self
    }

    /// Set the document card
    #[must_use]
    pub fn with_document(mut self, title: Option<String>, rating: Option<f64>) -> Self {
        self.document = DocumentCard { title, rating };
        self
    }

    /// Apply a PanelMessage to update display state
    pub fn apply_message(&mut self, msg: PanelMessage) {
        match msg {
            // Conversation messages
            PanelMessage::Message { id, role, content } => {
                self.messages.push(DisplayMessage::new(id, role, content));
            }
            PanelMessage::RevealStarted { id } => {
                self.messages.push(DisplayMessage::revealing(id));
            }
            PanelMessage::RevealProgress { id, revealed } => {
                if let Some(msg) = self.find_revealing(&id) {
                    msg.body = DisplayBody::Revealing(revealed);
                }
            }
            PanelMessage::RevealFinished {
                id,
                markup,
                citations,
            } => {
                if let Some(msg) = self.find_revealing(&id) {
                    msg.body = DisplayBody::Rendered { markup, citations };
                }
            }

            // Input and scrolling are handled by the App
            PanelMessage::ScrollToLatest | PanelMessage::InputCleared => {}

            PanelMessage::Busy { busy } => {
                self.busy = busy;
            }

            // Viewer and layout
            PanelMessage::ViewerNavigate { target, page } => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.target = target;
                    viewer.page = Some(page);
                }
            }
            PanelMessage::PaneWidth { width } => {
                self.pane_width = u16::try_from(width.max(0)).unwrap_or(u16::MAX);
            }
            PanelMessage::Resizing { active } => {
                self.resizing = active;
            }
            PanelMessage::Sidebar { collapsed, label } => {
                self.sidebar_collapsed = collapsed;
                self.sidebar_label = label;
            }
        }
    }

    /// Whether any entry is still revealing
    pub fn is_revealing(&self) -> bool {
        self.messages.iter().any(DisplayMessage::is_revealing)
    }

    fn find_revealing(&mut self, id: &MessageId) -> Option<&mut DisplayMessage> {
        self.messages
            .iter_mut()
            .rev()
            .find(|m| &m.id == id && m.is_revealing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{annotate, render};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_message_new() {
        let id = MessageId::new();
        let msg = DisplayMessage::new(id.clone(), MessageRole::User, "Hello".to_string());
        assert_eq!(msg.id, id);
        assert_eq!(msg.role, DisplayRole::User);
        assert_eq!(msg.body, DisplayBody::Text("Hello".to_string()));
        assert!(!msg.is_revealing());
    }

    #[test]
    fn test_display_role_label() {
        assert_eq!(DisplayRole::User.label(), "You");
        assert_eq!(DisplayRole::Assistant.label(), "Assistant");
    }

    #[test]
    fn test_reveal_sequence() {
        let mut state = DisplayState::new();
        let id = MessageId::new();

        state.apply_message(PanelMessage::RevealStarted { id: id.clone() });
        assert!(state.is_revealing());

        state.apply_message(PanelMessage::RevealProgress {
            id: id.clone(),
            revealed: "**Ye".to_string(),
        });
        assert_eq!(
            state.messages[0].body,
            DisplayBody::Revealing("**Ye".to_string())
        );

        state.apply_message(PanelMessage::RevealFinished {
            id: id.clone(),
            markup: render("**Yes**"),
            citations: annotate(&[2]),
        });
        assert!(!state.is_revealing());
        match &state.messages[0].body {
            DisplayBody::Rendered { markup, citations } => {
                assert_eq!(markup.plain_text(), "Yes");
                assert_eq!(citations.as_ref().unwrap().affordances.len(), 1);
            }
            other => panic!("Expected rendered body, got {other:?}"),
        }

        // Late progress does not reopen a finished entry
        state.apply_message(PanelMessage::RevealProgress {
            id,
            revealed: "stale".to_string(),
        });
        assert!(!state.is_revealing());
    }

    #[test]
    fn test_busy_toggles() {
        let mut state = DisplayState::new();
        state.apply_message(PanelMessage::Busy { busy: true });
        assert!(state.busy);
        state.apply_message(PanelMessage::Busy { busy: false });
        assert!(!state.busy);
    }

    #[test]
    fn test_viewer_navigate() {
        let mut state = DisplayState::new().with_viewer("/doc.pdf", 30);
        state.apply_message(PanelMessage::ViewerNavigate {
            target: "/doc.pdf#page=7&view=Fit".to_string(),
            page: 7,
        });
        assert_eq!(
            state.viewer,
            Some(DisplayViewer {
                target: "/doc.pdf#page=7&view=Fit".to_string(),
                page: Some(7),
            })
        );
    }

    #[test]
    fn test_viewer_navigate_without_viewer_ignored() {
        let mut state = DisplayState::new();
        state.apply_message(PanelMessage::ViewerNavigate {
            target: "/doc.pdf#page=7&view=Fit".to_string(),
            page: 7,
        });
        assert!(state.viewer.is_none());
    }

    #[test]
    fn test_layout_messages() {
        let mut state = DisplayState::new().with_viewer("/doc.pdf", 30);
        state.apply_message(PanelMessage::Resizing { active: true });
        state.apply_message(PanelMessage::PaneWidth { width: 36 });
        assert!(state.resizing);
        assert_eq!(state.pane_width, 36);

        state.apply_message(PanelMessage::PaneWidth { width: -4 });
        assert_eq!(state.pane_width, 0);

        state.apply_message(PanelMessage::Sidebar {
            collapsed: true,
            label: "Show Sidebar".to_string(),
        });
        assert!(state.sidebar_collapsed);
        assert_eq!(state.sidebar_label, "Show Sidebar");
    }
}
