//! Viewer Pane Widget
//!
//! Stands in for the companion document viewer: shows the navigation target
//! the viewer was last sent to and the page it is on.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::display::DisplayViewer;
use crate::theme;

/// Document viewer pane
pub struct ViewerPane<'a> {
    viewer: &'a DisplayViewer,
}

impl<'a> ViewerPane<'a> {
    pub fn new(viewer: &'a DisplayViewer) -> Self {
        Self { viewer }
    }
}

impl Widget for ViewerPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page = match self.viewer.page {
            Some(page) => Span::styled(
                format!("Page {page}"),
                Style::default()
                    .fg(theme::CITATION)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("First page", theme::dim()),
        };

        let lines = vec![
            Line::from(page),
            Line::default(),
            Line::styled(self.viewer.target.clone(), theme::dim()),
            Line::default(),
            Line::styled("Click a reference to jump to its page.", theme::dim()),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Document ")
                    .border_style(theme::dim()),
            )
            .render(area, buf);
    }
}
