//! Screen Layout
//!
//! ```text
//! ┌─────────┬──────────────────────┬─┬──────────────┐
//! │ sidebar │ message log          │┃│ viewer pane  │
//! │         ├──────────────────────┤┃│              │
//! │         │ input                │┃│              │
//! ├─────────┴──────────────────────┴─┴──────────────┤
//! │ status                                          │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The sidebar disappears when collapsed; the resizer and viewer pane exist
//! only when a document is configured.

use ratatui::layout::{Constraint, Layout, Rect};

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 26;

/// Narrowest the chat column may get
pub const MIN_CHAT_WIDTH: u16 = 20;

/// What to lay out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutParams {
    /// Show the sidebar
    pub sidebar: bool,
    /// Viewer pane width, if a viewer is present
    pub viewer_width: Option<u16>,
    /// Input box height including borders
    pub input_height: u16,
}

/// Screen regions for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Regions {
    /// Sidebar, if shown
    pub sidebar: Option<Rect>,
    /// Scrollable message log
    pub log: Rect,
    /// Input box
    pub input: Rect,
    /// One-column drag handle, if a viewer is present
    pub resizer: Option<Rect>,
    /// Viewer pane, if present
    pub viewer: Option<Rect>,
    /// Bottom status line
    pub status: Rect,
}

/// Split the screen
pub fn compute(area: Rect, params: LayoutParams) -> Regions {
    let [main, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    let mut constraints = Vec::with_capacity(4);
    if params.sidebar {
        constraints.push(Constraint::Length(SIDEBAR_WIDTH));
    }
    constraints.push(Constraint::Min(MIN_CHAT_WIDTH));
    if let Some(width) = params.viewer_width {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(width));
    }

    let columns = Layout::horizontal(constraints).split(main);
    let mut columns = columns.iter().copied();

    let sidebar = if params.sidebar { columns.next() } else { None };
    let chat = columns.next().unwrap_or(main);
    let (resizer, viewer) = if params.viewer_width.is_some() {
        (columns.next(), columns.next())
    } else {
        (None, None)
    };

    let [log, input] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(params.input_height)])
            .areas(chat);

    Regions {
        sidebar,
        log,
        input,
        resizer,
        viewer,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_layout() {
        let regions = compute(
            Rect::new(0, 0, 120, 40),
            LayoutParams {
                sidebar: true,
                viewer_width: Some(40),
                input_height: 3,
            },
        );

        assert_eq!(regions.sidebar, Some(Rect::new(0, 0, SIDEBAR_WIDTH, 39)));
        assert_eq!(regions.status, Rect::new(0, 39, 120, 1));
        assert_eq!(regions.viewer, Some(Rect::new(80, 0, 40, 39)));
        assert_eq!(regions.resizer, Some(Rect::new(79, 0, 1, 39)));
        assert_eq!(regions.log.x, SIDEBAR_WIDTH);
        assert_eq!(regions.log.width, 79 - SIDEBAR_WIDTH);
        assert_eq!(regions.input.height, 3);
        assert_eq!(regions.input.y + 3, 39);
    }

    #[test]
    fn test_collapsed_sidebar_no_viewer() {
        let regions = compute(
            Rect::new(0, 0, 80, 24),
            LayoutParams {
                sidebar: false,
                viewer_width: None,
                input_height: 5,
            },
        );

        assert_eq!(regions.sidebar, None);
        assert_eq!(regions.resizer, None);
        assert_eq!(regions.viewer, None);
        assert_eq!(regions.log, Rect::new(0, 0, 80, 18));
        assert_eq!(regions.input, Rect::new(0, 18, 80, 5));
    }

    #[test]
    fn test_wider_viewer_narrows_chat() {
        let params = LayoutParams {
            sidebar: false,
            viewer_width: Some(30),
            input_height: 3,
        };
        let narrow = compute(Rect::new(0, 0, 100, 20), params);
        let wide = compute(
            Rect::new(0, 0, 100, 20),
            LayoutParams {
                viewer_width: Some(45),
                ..params
            },
        );
        assert_eq!(narrow.log.width, 69);
        assert_eq!(wide.log.width, 54);
    }
}
