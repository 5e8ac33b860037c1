//! Plain styled text: the unbounded leaf of the layout tree.

use super::cell::Cell;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    /// Text of the run.
    pub content: String,
    /// Style applied to every character.
    pub style: Style,
}

impl Span {
    /// Unstyled span.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }

    /// Styled span.
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }
}

/// A sequence of spans laid out one after another.
///
/// Has no bounds of its own: its cell buffer is exactly as long as its text
/// (one cell per narrow character, two per wide one) until a block gives it a
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spans(pub Vec<Span>);

impl Spans {
    /// Empty text.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a span, builder style.
    pub fn push(mut self, span: Span) -> Self {
        self.0.push(span);
        self
    }

    /// Number of cells the text occupies.
    pub fn width(&self) -> usize {
        self.0
            .iter()
            .flat_map(|s| s.content.chars())
            .map(cell_width)
            .sum()
    }

    /// The natural cell buffer of the text.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.width());
        for span in &self.0 {
            for ch in span.content.chars() {
                match cell_width(ch) {
                    0 => {}
                    2 => {
                        out.push(Cell::styled(ch, span.style));
                        out.push(Cell::continuation(span.style));
                    }
                    _ => out.push(Cell::styled(printable(ch), span.style)),
                }
            }
        }
        out
    }
}

impl From<&str> for Spans {
    fn from(s: &str) -> Self {
        Self(vec![Span::raw(s)])
    }
}

impl From<String> for Spans {
    fn from(s: String) -> Self {
        Self(vec![Span::raw(s)])
    }
}

impl From<Span> for Spans {
    fn from(span: Span) -> Self {
        Self(vec![span])
    }
}

impl From<Vec<Span>> for Spans {
    fn from(spans: Vec<Span>) -> Self {
        Self(spans)
    }
}

// Control characters have no width of their own but still take a cell.
fn cell_width(ch: char) -> usize {
    if ch.is_control() {
        return 1;
    }
    ch.width().unwrap_or(1).min(2)
}

fn printable(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}
