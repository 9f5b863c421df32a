//! Transport Traits
//!
//! The `ChatTransport` trait lets the Panel talk to any chat backend (HTTP in
//! production, scripted mocks in tests) without changing orchestration.
//!
//! Implementations must resolve every call. A failed exchange is reported as
//! [`ChatReply::fallback`], never as an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reply shown when the backend could not be reached or answered badly
pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your message.";

/// The backend's answer to one message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text (markdown-like)
    pub text: String,
    /// Pages cited by the reply, in backend order
    pub cited_pages: Vec<i64>,
}

impl ChatReply {
    /// Create a reply
    pub fn new(text: impl Into<String>, cited_pages: Vec<i64>) -> Self {
        Self {
            text: text.into(),
            cited_pages,
        }
    }

    /// The fixed fallback reply with no citations
    pub fn fallback() -> Self {
        Self::new(FALLBACK_REPLY, Vec::new())
    }

    /// Whether this is the fallback reply
    pub fn is_fallback(&self) -> bool {
        self.text == FALLBACK_REPLY && self.cited_pages.is_empty()
    }
}

/// Chat transport trait
///
/// Exactly one request per call; no retries.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Transport name for logs (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Send a non-empty message and wait for the reply
    async fn send(&self, message: &str) -> ChatReply;
}
