//! Exchange - one user message and its eventual reply
//!
//! An exchange lives from submit until its reply starts revealing. After
//! that only the rendered log entries remain.

use crate::transport::ChatReply;

/// One in-flight exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// The trimmed user message
    pub user_text: String,
    /// True from submit until the reply arrives
    pub busy: bool,
    /// Reply text once received
    pub reply_text: Option<String>,
    /// Cited pages once received
    pub cited_pages: Vec<i64>,
}

impl Exchange {
    /// Start an exchange for a trimmed, non-empty message
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            busy: true,
            reply_text: None,
            cited_pages: Vec::new(),
        }
    }

    /// Record the transport result and leave busy state
    pub fn resolve(&mut self, reply: ChatReply) {
        self.reply_text = Some(reply.text);
        self.cited_pages = reply.cited_pages;
        self.busy = false;
    }

    /// Whether the reply has arrived
    pub fn is_resolved(&self) -> bool {
        self.reply_text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_lifecycle() {
        let mut exchange = Exchange::new("What is the refund policy?");
        assert!(exchange.busy);
        assert!(!exchange.is_resolved());

        exchange.resolve(ChatReply::new("Within 30 days.", vec![4]));
        assert!(!exchange.busy);
        assert_eq!(exchange.reply_text.as_deref(), Some("Within 30 days."));
        assert_eq!(exchange.cited_pages, vec![4]);
    }
}
