//! Theme and Colors
//!
//! Palette for the chat panel and the mapping from rendered markup styles to
//! terminal styles.

use ratatui::style::{Color, Modifier, Style};

use panel_core::SpanStyle;

// ============================================================================
// UI Colors
// ============================================================================

/// Accent for headings, bullets and the assistant label
pub const ACCENT: Color = Color::Rgb(120, 170, 255);

/// User input green
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Citation affordances
pub const CITATION: Color = Color::Rgb(255, 200, 90);

/// Links inside replies
pub const LINK: Color = Color::Rgb(110, 200, 220);

/// Inline and block code
pub const CODE: Color = Color::Rgb(230, 160, 200);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Filled rating stars
pub const STAR: Color = Color::Rgb(255, 196, 0);

/// Resizer handle while dragging
pub const HANDLE_ACTIVE: Color = Color::Rgb(255, 200, 90);

// ============================================================================
// Style Mapping
// ============================================================================

/// Terminal style for a rendered markup span
pub fn span_style(style: SpanStyle) -> Style {
    match style {
        SpanStyle::Plain => Style::default(),
        SpanStyle::Strong => Style::default().add_modifier(Modifier::BOLD),
        SpanStyle::Emphasis => Style::default().add_modifier(Modifier::ITALIC),
        SpanStyle::Code => Style::default().fg(CODE),
        SpanStyle::Heading => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        SpanStyle::ListBullet => Style::default().fg(ACCENT),
        SpanStyle::Quote => Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC),
        SpanStyle::Link => Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED),
    }
}

/// Style for a citation affordance label
pub fn citation_style() -> Style {
    Style::default()
        .fg(CITATION)
        .add_modifier(Modifier::UNDERLINED)
}

/// Style for dim helper text
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}
