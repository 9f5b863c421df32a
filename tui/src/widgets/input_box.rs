//! Input Box
//!
//! Multi-line message editor. Enter submits, Shift+Enter inserts a newline.
//! The box grows with its content up to a configured number of lines; beyond
//! that the newest lines stay visible.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::theme;

/// Spinner frames shown while an exchange is in flight
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Editable input buffer
#[derive(Clone, Debug, Default)]
pub struct InputState {
    buffer: String,
}

impl InputState {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing has been typed
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Type a character
    pub fn insert(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Insert a line break
    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Lines of content wrapped to `width`, with a trailing cursor
    pub fn wrapped_lines(&self, width: u16) -> Vec<String> {
        let width = (width as usize).max(1);
        let with_cursor = format!("{}_", self.buffer);
        with_cursor
            .split('\n')
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect()
    }

    /// Box height (including borders) for an inner width of `width`
    pub fn height(&self, width: u16, max_lines: u16) -> u16 {
        let lines = u16::try_from(self.wrapped_lines(width).len()).unwrap_or(u16::MAX);
        lines.clamp(1, max_lines.max(1)) + 2
    }
}

/// Bordered input box widget
pub struct InputBox<'a> {
    state: &'a InputState,
    busy: bool,
    spinner_frame: usize,
}

impl<'a> InputBox<'a> {
    pub fn new(state: &'a InputState) -> Self {
        Self {
            state,
            busy: false,
            spinner_frame: 0,
        }
    }

    /// Show the busy indicator in place of the send label
    pub fn busy(mut self, busy: bool, spinner_frame: usize) -> Self {
        self.busy = busy;
        self.spinner_frame = spinner_frame;
        self
    }
}

impl Widget for InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = if self.busy {
            let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Line::styled(format!(" {frame} Waiting for reply "), theme::dim())
        } else {
            Line::styled(" Send ⏎ ", Style::default().fg(theme::ACCENT))
        };

        let block = Block::bordered()
            .title(" Message ")
            .title_bottom(label.right_aligned())
            .border_style(theme::dim());
        let inner = block.inner(area);

        let lines = self.state.wrapped_lines(inner.width);
        let skip = lines.len().saturating_sub(inner.height as usize);
        let visible: Vec<Line> = lines
            .into_iter()
            .skip(skip)
            .map(|l| Line::styled(l, Style::default().fg(theme::USER_GREEN)))
            .collect();

        Paragraph::new(visible).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = InputState::new();
        assert!(input.is_empty());
        input.insert('h');
        input.insert('i');
        input.newline();
        input.insert('x');
        assert_eq!(input.text(), "hi\nx");
        input.backspace();
        assert_eq!(input.text(), "hi\n");
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_height_grows_with_content() {
        let mut input = InputState::new();
        assert_eq!(input.height(20, 6), 3);

        for _ in 0..3 {
            input.insert('a');
            input.newline();
        }
        // Three lines plus the cursor line
        assert_eq!(input.height(20, 6), 6);
    }

    #[test]
    fn test_height_capped() {
        let mut input = InputState::new();
        for _ in 0..20 {
            input.insert('a');
            input.newline();
        }
        assert_eq!(input.height(20, 6), 8);
    }

    #[test]
    fn test_long_line_wraps() {
        let mut input = InputState::new();
        for c in "what is the refund policy".chars() {
            input.insert(c);
        }
        assert!(input.wrapped_lines(10).len() > 1);
    }
}
