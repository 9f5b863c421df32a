//! Reveal Scheduler
//!
//! Progressive disclosure of an assistant reply. While animating, the entry
//! shows raw plain text growing by `batch_size` characters every `speed`;
//! partially parsed markdown is never shown. When the whole buffer is
//! visible it is rendered once and swapped in together with the citation
//! block.
//!
//! # Timing
//!
//! Each reveal runs as one spawned task that sleeps, steps, and sleeps
//! again, so steps for an entry can never overlap. The task only sends
//! [`RevealUpdate`]s; the Panel applies them to the log on the host loop.
//!
//! ```text
//! begin ──► sleep(speed) ──► Progress ──► ... ──► Progress ──► Finished
//!             (ceil(L / batch_size) steps)
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::citations::{annotate, CitationBlock};
use crate::markup::{render, Markup};
use crate::messages::MessageId;

/// Default delay between batches
pub const DEFAULT_SPEED: Duration = Duration::from_millis(10);

/// Default characters per batch
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// How a reply is revealed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealOptions {
    /// Delay between batches
    pub speed: Duration,
    /// Characters revealed per batch (always > 0)
    pub batch_size: usize,
    /// Skip the animation entirely
    pub instant: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            batch_size: DEFAULT_BATCH_SIZE,
            instant: false,
        }
    }
}

impl RevealOptions {
    /// Options that render immediately
    #[must_use]
    pub fn instant() -> Self {
        Self {
            instant: true,
            ..Self::default()
        }
    }

    /// Set the delay between batches
    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    /// Set the batch size (0 is raised to 1)
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set instant mode
    #[must_use]
    pub fn with_instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }
}

/// Progress of one in-progress assistant entry
///
/// `cursor` is a byte offset that always sits on a char boundary, with
/// `0 <= cursor <= source.len()`.
#[derive(Clone, Debug)]
pub struct RevealState {
    source: String,
    cursor: usize,
    batch_size: usize,
    cited_pages: Vec<i64>,
}

impl RevealState {
    /// Start revealing `source` from the beginning
    pub fn new(source: impl Into<String>, cited_pages: Vec<i64>, batch_size: usize) -> Self {
        Self {
            source: source.into(),
            cursor: 0,
            batch_size: batch_size.max(1),
            cited_pages,
        }
    }

    /// Full reply text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset of the next unrevealed character
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Characters per step
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Plain text revealed so far
    pub fn revealed(&self) -> &str {
        &self.source[..self.cursor]
    }

    /// Whether every character is visible
    pub fn is_finished(&self) -> bool {
        self.cursor == self.source.len()
    }

    /// Number of steps needed to reveal everything from the start
    pub fn total_steps(&self) -> usize {
        self.source.chars().count().div_ceil(self.batch_size)
    }

    /// Reveal the next batch; returns false once finished
    ///
    /// A batch larger than what is left reveals the remainder.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let rest = &self.source[self.cursor..];
        let advance = rest
            .char_indices()
            .nth(self.batch_size)
            .map_or(rest.len(), |(offset, _)| offset);
        self.cursor += advance;
        true
    }

    /// Render the full buffer and build the final update
    pub fn into_finished(self, id: MessageId) -> RevealUpdate {
        RevealUpdate::finished(id, &self.source, &self.cited_pages)
    }
}

/// Updates produced while revealing an entry
#[derive(Clone, Debug, PartialEq)]
pub enum RevealUpdate {
    /// More plain text is visible
    Progress {
        /// Entry being revealed
        id: MessageId,
        /// Full plain buffer so far
        revealed: String,
    },
    /// Rendered content replaces the plain buffer
    Finished {
        /// Entry that completed
        id: MessageId,
        /// Rendered reply
        markup: Markup,
        /// Reference block, if any pages were cited
        citations: Option<CitationBlock>,
    },
}

impl RevealUpdate {
    /// Final update for `text` and its citations
    pub fn finished(id: MessageId, text: &str, cited_pages: &[i64]) -> Self {
        Self::Finished {
            id,
            markup: render(text),
            citations: annotate(cited_pages),
        }
    }

    /// Entry this update belongs to
    pub fn id(&self) -> &MessageId {
        match self {
            Self::Progress { id, .. } | Self::Finished { id, .. } => id,
        }
    }
}

/// Drives reveals and hands their updates to the Panel
pub struct RevealScheduler {
    tx: mpsc::UnboundedSender<RevealUpdate>,
    rx: mpsc::UnboundedReceiver<RevealUpdate>,
    /// Pending timer chains, one per animating entry
    pending: Vec<JoinHandle<()>>,
}

impl RevealScheduler {
    /// Create an idle scheduler
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            pending: Vec::new(),
        }
    }

    /// Begin revealing `text` into entry `id`
    ///
    /// Instant mode and empty text finish without any timer. Must be called
    /// from within a tokio runtime when animating.
    pub fn begin(
        &mut self,
        id: MessageId,
        text: impl Into<String>,
        cited_pages: Vec<i64>,
        options: RevealOptions,
    ) {
        let state = RevealState::new(text, cited_pages, options.batch_size);

        if options.instant || state.is_finished() {
            debug!(id = %id, instant = options.instant, "Reveal finished without animation");
            // Receiver lives in self, so this cannot fail
            let _ = self.tx.send(state.into_finished(id));
            return;
        }

        debug!(
            id = %id,
            steps = state.total_steps(),
            speed_ms = options.speed.as_millis() as u64,
            "Reveal started"
        );

        self.pending.retain(|handle| !handle.is_finished());
        let tx = self.tx.clone();
        let speed = options.speed;
        self.pending.push(tokio::spawn(async move {
            let mut state = state;
            while !state.is_finished() {
                tokio::time::sleep(speed).await;
                state.step();
                let update = RevealUpdate::Progress {
                    id: id.clone(),
                    revealed: state.revealed().to_string(),
                };
                if tx.send(update).is_err() {
                    return;
                }
            }
            let _ = tx.send(state.into_finished(id));
        }));
    }

    /// Next available update, without waiting
    pub fn try_next(&mut self) -> Option<RevealUpdate> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next update
    pub async fn next(&mut self) -> Option<RevealUpdate> {
        self.rx.recv().await
    }

    /// Whether any reveal is still animating
    pub fn is_animating(&self) -> bool {
        self.pending.iter().any(|handle| !handle.is_finished())
    }

    /// Abort every pending timer chain
    pub fn cancel(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_state_steps_in_batches() {
        let mut state = RevealState::new("abcdefg", vec![], 3);
        assert_eq!(state.total_steps(), 3);
        assert!(state.step());
        assert_eq!(state.revealed(), "abc");
        assert!(state.step());
        assert_eq!(state.revealed(), "abcdef");
        assert!(state.step());
        assert_eq!(state.revealed(), "abcdefg");
        assert!(state.is_finished());
        assert!(!state.step());
    }

    #[test]
    fn test_state_batch_larger_than_text() {
        let mut state = RevealState::new("hi", vec![], 10);
        assert_eq!(state.total_steps(), 1);
        assert!(state.step());
        assert_eq!(state.revealed(), "hi");
        assert!(state.is_finished());
    }

    #[test]
    fn test_state_multibyte_chars_not_split() {
        let mut state = RevealState::new("héllo wörld", vec![], 2);
        while state.step() {
            assert!(state.source().is_char_boundary(state.cursor()));
        }
        assert_eq!(state.revealed(), "héllo wörld");
        assert_eq!(state.total_steps(), 6);
    }

    #[test]
    fn test_state_empty_is_finished() {
        let state = RevealState::new("", vec![1], 3);
        assert!(state.is_finished());
        assert_eq!(state.total_steps(), 0);
    }

    #[test]
    fn test_zero_batch_size_raised() {
        assert_eq!(RevealOptions::default().with_batch_size(0).batch_size, 1);
        assert_eq!(RevealState::new("ab", vec![], 0).batch_size(), 1);
    }

    #[test]
    fn test_finished_update_contents() {
        let update = RevealUpdate::finished(MessageId::new(), "Hello", &[2, 2]);
        match update {
            RevealUpdate::Finished {
                markup, citations, ..
            } => {
                assert_eq!(markup.plain_text(), "Hello");
                assert_eq!(citations.unwrap().affordances.len(), 2);
            }
            RevealUpdate::Progress { .. } => panic!("Expected Finished"),
        }
    }

    #[tokio::test]
    async fn test_instant_yields_single_update() {
        let mut scheduler = RevealScheduler::new();
        let id = MessageId::new();
        scheduler.begin(id.clone(), "**Done**", vec![5], RevealOptions::instant());

        let update = scheduler.try_next().unwrap();
        assert_eq!(update, RevealUpdate::finished(id, "**Done**", &[5]));
        assert!(scheduler.try_next().is_none());
        assert!(!scheduler.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_reveal_step_count() {
        let mut scheduler = RevealScheduler::new();
        let id = MessageId::new();
        let text = "You can request a refund within 30 days.";
        scheduler.begin(
            id.clone(),
            text,
            vec![4],
            RevealOptions::default().with_batch_size(4),
        );

        let mut progress = Vec::new();
        let finished = loop {
            match scheduler.next().await.unwrap() {
                RevealUpdate::Progress { revealed, .. } => progress.push(revealed),
                finished @ RevealUpdate::Finished { .. } => break finished,
            }
        };

        assert_eq!(progress.len(), text.chars().count().div_ceil(4));
        assert_eq!(progress.last().map(String::as_str), Some(text));
        assert!(progress.windows(2).all(|w| w[1].starts_with(&w[0])));
        match finished {
            RevealUpdate::Finished {
                markup, citations, ..
            } => {
                assert_eq!(markup.plain_text(), text);
                assert_eq!(citations.unwrap().to_string(), "References: Page 4");
            }
            RevealUpdate::Progress { .. } => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_wait_for_speed() {
        let mut scheduler = RevealScheduler::new();
        scheduler.begin(
            MessageId::new(),
            "abcdef",
            vec![],
            RevealOptions::default()
                .with_speed(Duration::from_millis(50))
                .with_batch_size(3),
        );

        // Nothing before the first tick
        tokio::task::yield_now().await;
        assert!(scheduler.try_next().is_none());

        tokio::time::advance(Duration::from_millis(50)).await;
        tokio::task::yield_now().await;
        match scheduler.try_next() {
            Some(RevealUpdate::Progress { revealed, .. }) => assert_eq!(revealed, "abc"),
            other => panic!("Expected first batch, got {other:?}"),
        }
        assert!(scheduler.try_next().is_none());
    }

    #[tokio::test]
    async fn test_empty_text_finishes_immediately() {
        let mut scheduler = RevealScheduler::new();
        scheduler.begin(MessageId::new(), "", vec![3], RevealOptions::default());
        match scheduler.try_next() {
            Some(RevealUpdate::Finished {
                markup, citations, ..
            }) => {
                assert!(markup.is_empty());
                assert!(citations.is_some());
            }
            other => panic!("Expected Finished, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_reveal() {
        let mut scheduler = RevealScheduler::new();
        scheduler.begin(
            MessageId::new(),
            "a long reply that would take a while",
            vec![],
            RevealOptions::default().with_batch_size(1),
        );
        assert!(scheduler.is_animating());
        scheduler.cancel();
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(scheduler.try_next().is_none());
    }
}
