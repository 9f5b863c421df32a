//! Sidebar Widget
//!
//! Document card (title and star rating) plus key hints.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use panel_core::star_fills;

use crate::display::DocumentCard;
use crate::theme;

/// Star glyphs for a rating, one per star
///
/// A star at least half full is drawn filled.
pub fn star_glyphs(rating: f64) -> String {
    star_fills(rating)
        .iter()
        .map(|&fill| if fill >= 50.0 { '★' } else { '☆' })
        .collect()
}

/// Sidebar with the document card
pub struct Sidebar<'a> {
    document: &'a DocumentCard,
}

impl<'a> Sidebar<'a> {
    pub fn new(document: &'a DocumentCard) -> Self {
        Self { document }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();

        let title = self.document.title.as_deref().unwrap_or("Untitled document");
        lines.push(Line::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        if let Some(rating) = self.document.rating {
            lines.push(Line::from(vec![
                Span::styled(star_glyphs(rating), Style::default().fg(theme::STAR)),
                Span::styled(format!(" {rating:.1}"), theme::dim()),
            ]));
        }

        lines.push(Line::default());
        for (key, action) in [
            ("Enter", "send"),
            ("Shift+Enter", "newline"),
            ("PgUp/PgDn", "scroll"),
            ("F2", "sidebar"),
            ("Esc", "quit"),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("{key} "), Style::default().fg(theme::ACCENT)),
                Span::styled(action, theme::dim()),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Library ").border_style(theme::dim()))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_glyphs() {
        assert_eq!(star_glyphs(3.0), "★★★☆☆");
        assert_eq!(star_glyphs(4.5), "★★★★★");
        assert_eq!(star_glyphs(4.4), "★★★★☆");
        assert_eq!(star_glyphs(f64::NAN), "☆☆☆☆☆");
    }
}
