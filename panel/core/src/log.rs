//! Message Log
//!
//! The ordered, append-only record of an exchange history as it is shown.
//! Entries are never removed or reordered. The only mutation allowed after
//! append is on an assistant entry that is still revealing: its plain
//! buffer grows, then it is replaced by rendered content exactly once.

use crate::citations::CitationBlock;
use crate::markup::Markup;
use crate::messages::{MessageId, MessageRole};

/// What an entry currently displays
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryContent {
    /// Raw text (user entries, and assistant entries mid-reveal)
    Plain(String),
    /// Final rendered reply with its reference block
    Rendered {
        /// Rendered reply
        markup: Markup,
        /// References appended after the markup
        citations: Option<CitationBlock>,
    },
}

impl EntryContent {
    /// Displayed text with styling stripped (references excluded)
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Rendered { markup, .. } => markup.plain_text(),
        }
    }

    /// Reference block, if rendered with one
    pub fn citations(&self) -> Option<&CitationBlock> {
        match self {
            Self::Plain(_) => None,
            Self::Rendered { citations, .. } => citations.as_ref(),
        }
    }
}

/// One log entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    /// Entry ID
    pub id: MessageId,
    /// Author
    pub role: MessageRole,
    /// Displayed content
    pub content: EntryContent,
    in_progress: bool,
}

impl MessageEntry {
    /// Whether a reveal still owns this entry
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }
}

/// Append-only message log
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    entries: Vec<MessageEntry>,
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in append order
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry
    pub fn get(&self, id: &MessageId) -> Option<&MessageEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Newest entry
    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.last()
    }

    /// Append a finished user entry
    pub fn append_user(&mut self, text: impl Into<String>) -> MessageId {
        let id = MessageId::new();
        self.entries.push(MessageEntry {
            id: id.clone(),
            role: MessageRole::User,
            content: EntryContent::Plain(text.into()),
            in_progress: false,
        });
        id
    }

    /// Append an empty assistant entry that a reveal will fill
    pub fn begin_assistant(&mut self) -> MessageId {
        let id = MessageId::new();
        self.entries.push(MessageEntry {
            id: id.clone(),
            role: MessageRole::Assistant,
            content: EntryContent::Plain(String::new()),
            in_progress: true,
        });
        id
    }

    /// Replace the plain buffer of an in-progress entry
    ///
    /// Returns false if the entry is unknown or already rendered.
    pub fn update_progress(&mut self, id: &MessageId, revealed: &str) -> bool {
        match self.in_progress_mut(id) {
            Some(entry) => {
                entry.content = EntryContent::Plain(revealed.to_string());
                true
            }
            None => false,
        }
    }

    /// Swap an in-progress entry to its rendered content
    ///
    /// Returns false if the entry is unknown or already rendered.
    pub fn complete(
        &mut self,
        id: &MessageId,
        markup: Markup,
        citations: Option<CitationBlock>,
    ) -> bool {
        match self.in_progress_mut(id) {
            Some(entry) => {
                entry.content = EntryContent::Rendered { markup, citations };
                entry.in_progress = false;
                true
            }
            None => false,
        }
    }

    fn in_progress_mut(&mut self, id: &MessageId) -> Option<&mut MessageEntry> {
        self.entries
            .iter_mut()
            .rev()
            .find(|e| &e.id == id && e.in_progress)
    }
}
