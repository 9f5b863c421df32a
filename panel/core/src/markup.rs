//! Rich-Text Rendering
//!
//! Converts a markdown-like reply buffer into surface-agnostic styled lines.
//! The renderer is a pure function of its input: the reveal scheduler calls
//! it exactly once per reply, after the plain-text animation has finished.
//!
//! Raw HTML is never interpreted: tags are kept as literal plain text so a
//! reply like `Press <Enter> to send` keeps every word.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Inline style of a rendered span
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanStyle {
    /// Body text
    Plain,
    /// `**strong**`
    Strong,
    /// `*emphasis*`
    Emphasis,
    /// Inline code and code block lines
    Code,
    /// Heading text
    Heading,
    /// List bullets and task markers
    ListBullet,
    /// Block quote text
    Quote,
    /// Link text
    Link,
}

/// A run of text with one style
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The text
    pub text: String,
    /// How to draw it
    pub style: SpanStyle,
}

impl Span {
    /// Create a span
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One rendered line
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupLine {
    /// Spans in display order
    pub spans: Vec<Span>,
}

impl MarkupLine {
    /// Concatenated span text
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Rendered rich text
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    /// Lines in display order
    pub lines: Vec<MarkupLine>,
}

impl Markup {
    /// Whether nothing was rendered
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }

    /// The rendered text with all styling stripped
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a reply buffer into markup
pub fn render(text: &str) -> Markup {
    if text.is_empty() {
        return Markup::default();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::new();
    for event in Parser::new_ext(text, options) {
        renderer.process_event(event);
    }
    renderer.finish()
}

#[derive(Debug)]
struct ListState {
    /// None for unordered, Some(n) for the next ordered number
    next_number: Option<u64>,
}

struct Renderer {
    lines: Vec<MarkupLine>,
    current: Vec<Span>,
    style_stack: Vec<SpanStyle>,
    list_stack: Vec<ListState>,
    in_code_block: bool,
}

impl Renderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            style_stack: vec![SpanStyle::Plain],
            list_stack: Vec::new(),
            in_code_block: false,
        }
    }

    fn current_style(&self) -> SpanStyle {
        self.style_stack.last().copied().unwrap_or(SpanStyle::Plain)
    }

    fn push_style(&mut self, style: SpanStyle) {
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.current.push(Span::new(&*code, SpanStyle::Code)),
            Event::SoftBreak | Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.begin_block();
                self.lines.push(MarkupLine {
                    spans: vec![Span::new("─".repeat(20), SpanStyle::Plain)],
                });
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.current.push(Span::new(marker, SpanStyle::ListBullet));
            }
            Event::Html(html) => self.add_literal(&html),
            Event::InlineHtml(html) => self.current.push(Span::new(&*html, SpanStyle::Plain)),
            // Footnotes and math are not rendered
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            // Loose list items wrap their text in paragraphs
            Tag::Paragraph if !self.list_stack.is_empty() => {}
            Tag::Paragraph => self.begin_block(),
            Tag::Heading { .. } => {
                self.begin_block();
                self.push_style(SpanStyle::Heading);
            }
            Tag::CodeBlock(_) => {
                self.begin_block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.begin_block();
                } else {
                    self.flush_line();
                }
                self.list_stack.push(ListState { next_number: start });
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.list_stack.len().saturating_sub(1);
                let bullet = match self.list_stack.last_mut() {
                    Some(ListState {
                        next_number: Some(n),
                    }) => {
                        let bullet = format!("{}{n}. ", "  ".repeat(depth));
                        *n += 1;
                        bullet
                    }
                    _ => format!("{}- ", "  ".repeat(depth)),
                };
                self.current.push(Span::new(bullet, SpanStyle::ListBullet));
            }
            Tag::BlockQuote { .. } => {
                self.begin_block();
                self.push_style(SpanStyle::Quote);
            }
            Tag::HtmlBlock => self.begin_block(),
            Tag::Emphasis => self.push_style(SpanStyle::Emphasis),
            Tag::Strong => self.push_style(SpanStyle::Strong),
            Tag::Link { .. } => self.push_style(SpanStyle::Link),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item | TagEnd::HtmlBlock => self.flush_line(),
            TagEnd::Heading(_) => {
                self.flush_line();
                self.pop_style();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.flush_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_line();
                self.pop_style();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => self.pop_style(),
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            for piece in text.split_inclusive('\n') {
                let line = piece.strip_suffix('\n');
                self.current
                    .push(Span::new(line.unwrap_or(piece), SpanStyle::Code));
                if line.is_some() {
                    self.flush_line();
                }
            }
            return;
        }
        let style = self.current_style();
        self.current.push(Span::new(text, style));
    }

    /// Raw block text, one line per source line
    fn add_literal(&mut self, text: &str) {
        for piece in text.split_inclusive('\n') {
            let line = piece.strip_suffix('\n');
            let line = line.unwrap_or(piece);
            if !line.is_empty() {
                self.current.push(Span::new(line, SpanStyle::Plain));
            }
            if piece.ends_with('\n') {
                self.flush_line();
            }
        }
    }

    /// Separate top-level blocks with one blank line
    fn begin_block(&mut self) {
        self.flush_line();
        let after_content = self.lines.last().is_some_and(|l| !l.spans.is_empty());
        if self.list_stack.is_empty() && after_content {
            self.lines.push(MarkupLine::default());
        }
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current);
        self.lines.push(MarkupLine { spans });
    }

    fn finish(mut self) -> Markup {
        self.flush_line();
        Markup { lines: self.lines }
    }
}
