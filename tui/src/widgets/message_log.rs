//! MessageLog Widget
//!
//! A borderless, scrollable view of the conversation. Entries being revealed
//! show their raw text with a cursor; finished replies show styled markup
//! followed by their reference block. Every citation label drawn is recorded
//! in the state's [`HitMap`] so clicks can be resolved after the frame.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::StatefulWidget;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use panel_core::citations::{AFFORDANCE_DELIMITER, REFERENCES_LABEL};
use panel_core::CitationBlock;

use crate::display::{DisplayBody, DisplayMessage, DisplayRole};
use crate::hit::HitMap;
use crate::theme;

/// Cursor drawn after text that is still being revealed
const REVEAL_CURSOR: &str = "▌";

/// A run of text with one style, optionally clickable
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// The text
    pub text: String,
    /// How to draw it
    pub style: Style,
    /// Data reported when clicked
    pub data: Option<String>,
}

impl Segment {
    /// Plain styled text
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            data: None,
        }
    }

    /// Clickable text carrying `data`
    pub fn clickable(text: impl Into<String>, style: Style, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
            data: Some(data.into()),
        }
    }
}

/// One display line
pub type LogLine = Vec<Segment>;

/// State for the message log
#[derive(Default)]
pub struct MessageLogState {
    /// Scroll offset (lines from bottom, 0 = latest)
    pub scroll_offset: usize,
    /// Total wrapped lines at the last render
    pub total_lines: usize,
    /// Clickable regions drawn at the last render
    pub hits: HitMap,
}

impl MessageLogState {
    /// Scroll towards older entries
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max_scroll);
    }

    /// Scroll towards newer entries
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Follow the newest entry
    pub fn scroll_to_latest(&mut self) {
        self.scroll_offset = 0;
    }
}

/// Borderless view of the conversation
pub struct MessageLog<'a> {
    messages: &'a [DisplayMessage],
}

impl<'a> MessageLog<'a> {
    pub fn new(messages: &'a [DisplayMessage]) -> Self {
        Self { messages }
    }
}

impl StatefulWidget for MessageLog<'_> {
    type State = MessageLogState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<LogLine> = Vec::new();
        for msg in self.messages {
            for line in message_lines(msg) {
                all_lines.extend(wrap_line(&line, width));
            }
            all_lines.push(Vec::new());
        }

        state.total_lines = all_lines.len();

        // Clamp scroll offset
        let height = area.height as usize;
        let max_scroll = state.total_lines.saturating_sub(height);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        // Calculate visible range
        let visible_end = state.total_lines.saturating_sub(state.scroll_offset);
        let visible_start = visible_end.saturating_sub(height);

        for (i, line) in all_lines[visible_start..visible_end].iter().enumerate() {
            let y = area.y + i as u16;
            let mut x = area.x;
            for segment in line {
                let right = area.x + area.width;
                if x >= right {
                    break;
                }
                let max_width = (right - x) as usize;
                let (end_x, _) = buf.set_stringn(x, y, &segment.text, max_width, segment.style);
                if let Some(ref data) = segment.data {
                    state.hits.push(Rect::new(x, y, end_x - x, 1), data.clone());
                }
                x = end_x;
            }
        }
    }
}

/// Unwrapped lines for one entry: a header, then its content
pub fn message_lines(msg: &DisplayMessage) -> Vec<LogLine> {
    let header_style = match msg.role {
        DisplayRole::User => Style::default().fg(theme::USER_GREEN),
        DisplayRole::Assistant => Style::default().fg(theme::ACCENT),
    }
    .add_modifier(Modifier::BOLD);

    let mut lines = vec![vec![Segment::styled(msg.role.label(), header_style)]];

    match &msg.body {
        DisplayBody::Text(text) => {
            lines.extend(
                text.split('\n')
                    .map(|l| vec![Segment::styled(l, Style::default())]),
            );
        }
        DisplayBody::Revealing(text) => {
            let mut plain: Vec<LogLine> = text
                .split('\n')
                .map(|l| vec![Segment::styled(l, Style::default())])
                .collect();
            if let Some(last) = plain.last_mut() {
                last.push(Segment::styled(REVEAL_CURSOR, theme::dim()));
            }
            lines.extend(plain);
        }
        DisplayBody::Rendered { markup, citations } => {
            lines.extend(markup.lines.iter().map(|line| {
                line.spans
                    .iter()
                    .map(|span| Segment::styled(span.text.as_str(), theme::span_style(span.style)))
                    .collect()
            }));
            if let Some(block) = citations {
                lines.push(citation_line(block));
            }
        }
    }

    lines
}

/// The reference block as one line of clickable labels
pub fn citation_line(block: &CitationBlock) -> LogLine {
    let mut line = vec![Segment::styled(REFERENCES_LABEL, theme::dim())];
    for (i, affordance) in block.affordances.iter().enumerate() {
        let sep = if i == 0 { " " } else { AFFORDANCE_DELIMITER };
        line.push(Segment::styled(sep, theme::dim()));
        line.push(Segment::clickable(
            affordance.label(),
            theme::citation_style(),
            affordance.data(),
        ));
    }
    line
}

/// Wrap a styled line to `width` columns
///
/// Breaks between words where possible; words wider than the line are split
/// by character. Segment styles and click data survive the split.
pub fn wrap_line(line: &[Segment], width: usize) -> Vec<LogLine> {
    let width = width.max(1);
    let mut out: Vec<LogLine> = Vec::new();
    let mut current: LogLine = Vec::new();
    let mut used = 0;

    for segment in line {
        for word in segment.text.split_inclusive(' ') {
            let fit = word.trim_end().width();
            if used > 0 && used + fit > width {
                out.push(std::mem::take(&mut current));
                used = 0;
            }

            if fit > width {
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if used > 0 && used + w > width {
                        out.push(std::mem::take(&mut current));
                        used = 0;
                    }
                    push_text(&mut current, &ch.to_string(), segment);
                    used += w;
                }
                continue;
            }

            push_text(&mut current, word, segment);
            used += word.width();
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

fn push_text(line: &mut LogLine, text: &str, like: &Segment) {
    match line.last_mut() {
        Some(last) if last.style == like.style && last.data == like.data => {
            last.text.push_str(text);
        }
        _ => line.push(Segment {
            text: text.to_string(),
            style: like.style,
            data: like.data.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{annotate, render, MessageId, MessageRole};
    use pretty_assertions::assert_eq;

    fn text_of(line: &LogLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    fn rendered(text: &str, pages: &[i64]) -> DisplayMessage {
        DisplayMessage {
            id: MessageId::new(),
            role: DisplayRole::Assistant,
            body: DisplayBody::Rendered {
                markup: render(text),
                citations: annotate(pages),
            },
        }
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        let line = vec![Segment::styled("hello world", Style::default())];
        let wrapped = wrap_line(&line, 40);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(text_of(&wrapped[0]), "hello world");
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let line = vec![Segment::styled("alpha beta gamma", Style::default())];
        let wrapped: Vec<_> = wrap_line(&line, 11).iter().map(text_of).collect();
        assert_eq!(wrapped, vec!["alpha beta ", "gamma"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let line = vec![Segment::styled("abcdefghij", Style::default())];
        let wrapped: Vec<_> = wrap_line(&line, 4).iter().map(text_of).collect();
        assert_eq!(wrapped, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty_line_kept() {
        assert_eq!(wrap_line(&[], 10), vec![Vec::<Segment>::new()]);
    }

    #[test]
    fn test_wrap_keeps_click_data() {
        let line = citation_line(&annotate(&[3, 7]).unwrap());
        let wrapped = wrap_line(&line, 20);
        let data: Vec<_> = wrapped
            .iter()
            .flatten()
            .filter_map(|s| s.data.clone())
            .collect();
        assert!(data.contains(&"3".to_string()));
        assert!(data.contains(&"7".to_string()));
    }

    #[test]
    fn test_citation_line_text() {
        let line = citation_line(&annotate(&[3, 7, 3]).unwrap());
        assert_eq!(text_of(&line), "References: Page 3, Page 7, Page 3");
    }

    #[test]
    fn test_revealing_shows_cursor() {
        let msg = DisplayMessage {
            id: MessageId::new(),
            role: DisplayRole::Assistant,
            body: DisplayBody::Revealing("**Ye".to_string()),
        };
        let lines = message_lines(&msg);
        assert_eq!(text_of(&lines[0]), "Assistant");
        assert_eq!(text_of(&lines[1]), "**Ye▌");
    }

    #[test]
    fn test_user_message_lines() {
        let msg = DisplayMessage::new(
            MessageId::new(),
            MessageRole::User,
            "line one\nline two".to_string(),
        );
        let lines: Vec<_> = message_lines(&msg).iter().map(text_of).collect();
        assert_eq!(lines, vec!["You", "line one", "line two"]);
    }

    #[test]
    fn test_render_registers_citation_hits() {
        let messages = vec![rendered("See the policy.", &[4, 9])];
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let mut state = MessageLogState::default();

        MessageLog::new(&messages).render(area, &mut buf, &mut state);

        // Header, body, references, trailing blank
        assert_eq!(state.total_lines, 4);
        assert_eq!(state.hits.len(), 2);

        // "References: Page 4, Page 9" on row 2
        assert_eq!(state.hits.hit(12, 2), Some("4"));
        assert_eq!(state.hits.hit(17, 2), Some("4"));
        assert_eq!(state.hits.hit(18, 2), None);
        assert_eq!(state.hits.hit(20, 2), Some("9"));
        assert_eq!(state.hits.hit(3, 1), None);
    }

    #[test]
    fn test_render_scrolls_from_bottom() {
        let messages: Vec<_> = (0..10).map(|i| rendered(&format!("reply {i}"), &[])).collect();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut state = MessageLogState::default();

        MessageLog::new(&messages).render(area, &mut buf, &mut state);
        assert_eq!(state.total_lines, 30);

        // Newest reply is visible at offset 0
        let row: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("reply 9"));

        state.scroll_up(100);
        MessageLog::new(&messages).render(area, &mut buf, &mut state);
        assert_eq!(state.scroll_offset, 27);
    }
}
