//! Session screen composition.
//!
//! [`compose`] turns the session state into a layout tree: a shaded frame
//! around a page, and on the page a vertical stack of text blocks. Nothing
//! here touches the terminal; the loop fits the tree to the screen and paints
//! it.

use super::state::{Mode, SessionState};
use super::theme::Theme;
use crate::layout::{Block, Column, Grid, Group, Node, Rectangle, Row, Span, Spans};
use crate::model::{Action, Misspelling};
use ratatui::style::Style;

/// Frame thickness, in cells.
const BORDER_ROWS: u32 = 1;
const BORDER_COLS: u32 = 2;

/// Legend entries: underlined key, rest of the label.
const LEGEND: [(&str, &str); 9] = [
    ("r", "eplace"),
    ("R", "eplace all"),
    ("i", "gnore"),
    ("I", "gnore all"),
    ("e", "dit"),
    ("E", "dit all"),
    ("n", "ext undefined"),
    ("a", "pply"),
    ("q", "uit"),
];

/// Build the screen for a `width` x `height` terminal.
///
/// `margin` is the horizontal padding between the frame and the page text.
pub fn compose(state: &SessionState, theme: &Theme, margin: u16, width: u16, height: u16) -> Node {
    let (w, h) = (u32::from(width), u32::from(height));
    let page_w = i32::from(width).saturating_sub(2 * BORDER_COLS as i32);
    let page_h = i32::from(height).saturating_sub(2 * BORDER_ROWS as i32);

    let border = || shade(theme.border, w as usize * h as usize);
    let middle = h.saturating_sub(2 * BORDER_ROWS);
    let inner = w.saturating_sub(2 * BORDER_COLS);

    Grid::new()
        .row(Row::single(BORDER_ROWS, border()))
        .row(Row::new(
            middle,
            vec![
                Column::new(BORDER_COLS, border()),
                Column::new(inner, page(state, theme, i32::from(margin), page_w, page_h)),
                Column::new(BORDER_COLS, border()),
            ],
        ))
        .row(Row::single(BORDER_ROWS, border()))
        .into()
}

fn shade(style: Style, cells: usize) -> Spans {
    Spans::from(Span::styled(" ".repeat(cells), style))
}

fn page(state: &SessionState, theme: &Theme, margin: i32, w: i32, h: i32) -> Node {
    let left = margin.min(w / 2);
    let right = (w - margin).max(left);
    let text_width = (right - left).max(0);
    let mut stack = Stack::new(text_width);

    match state.current() {
        None if state.done_loading() => stack.line("No spelling errors!"),
        None => stack.line("Loading data..."),
        Some(m) => details(&mut stack, state, theme, m),
    }

    if !state.status().is_empty() || matches!(state.mode(), Mode::Prompt(_)) {
        stack.gap();
    }
    for line in state.status().lines() {
        stack.line(Span::styled(line.text.clone(), theme.tone(line.tone)));
    }
    if let Mode::Prompt(prompt) = state.mode() {
        stack.line(
            Spans::new()
                .push(Span::styled(prompt.label(), theme.prompt))
                .push(Span::styled(prompt.input().to_string(), theme.input)),
        );
    }

    Block::new(
        Rectangle::new(left, 1, right, (h - 1).max(1)),
        stack.into_group(),
    )
    .into()
}

fn details(stack: &mut Stack, state: &SessionState, theme: &Theme, m: &Misspelling) {
    let total = state.misspellings().len();
    let mut header = Spans::new()
        .push(Span::raw("Spelling error "))
        .push(Span::styled((state.index() + 1).to_string(), theme.strong))
        .push(Span::raw(" of "))
        .push(Span::styled(total.to_string(), theme.strong));
    if !state.done_loading() {
        header = header.push(Span::raw("+"));
    }
    stack.line(header);
    stack.gap();

    stack.line(Span::styled(m.text.position.to_string(), theme.location));
    stack.gap();

    for line in highlighted(m, theme) {
        stack.line(line);
    }
    stack.gap();

    let suggestions: Vec<Spans> = m
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| Spans::from(format!("[{}] {}", i + 1, s)))
        .collect();
    if suggestions.is_empty() {
        stack.line("Suggestions: none");
    } else {
        stack.flow(Spans::from("Suggestions: "), suggestions);
    }
    stack.gap();

    let legend = LEGEND
        .iter()
        .map(|(key, rest)| {
            Spans::new()
                .push(Span::styled(*key, theme.key))
                .push(Span::raw(*rest))
        })
        .collect();
    stack.flow(Spans::from("Actions: "), legend);

    let decision = match &m.action {
        Action::Undefined => None,
        Action::Ignore => Some("ignored".to_string()),
        Action::Replace { replacement } => Some(format!("replace with '{}'", replacement)),
    };
    if let Some(decision) = decision {
        stack.gap();
        stack.line(Span::styled(decision, theme.decision));
    }
}

/// The text content, one entry per source line, with the word picked out.
fn highlighted(m: &Misspelling, theme: &Theme) -> Vec<Spans> {
    let content = &m.text.content;
    let word_end = m.offset + m.word.len();
    let mut start = 0;
    let mut out = Vec::new();

    for line in content.split('\n') {
        let end = start + line.len();
        let spans = if m.offset >= start && m.offset <= end && !m.word.is_empty() {
            let a = m.offset - start;
            let b = word_end.min(end) - start;
            match (line.get(..a), line.get(a..b), line.get(b..)) {
                (Some(before), Some(word), Some(after)) => Spans::new()
                    .push(Span::styled(before, theme.content))
                    .push(Span::styled(word, theme.word))
                    .push(Span::styled(after, theme.content)),
                _ => Spans::from(Span::styled(line, theme.content)),
            }
        } else {
            Spans::from(Span::styled(line, theme.content))
        };
        out.push(spans);
        start = end + 1;
    }
    out
}

/// Blocks stacked top to bottom, each as tall as its wrapped text.
struct Stack {
    width: i32,
    y: i32,
    group: Group,
}

impl Stack {
    fn new(width: i32) -> Self {
        Self {
            width,
            y: 0,
            group: Group::new(),
        }
    }

    fn gap(&mut self) {
        self.y += 1;
    }

    fn line(&mut self, text: impl Into<Spans>) {
        let text = text.into();
        let rows = if self.width > 0 {
            (text.width() as i32 + self.width - 1) / self.width
        } else {
            1
        };
        let rows = rows.max(1);
        self.group.push(Block::new(
            Rectangle::new(0, self.y, self.width, self.y + rows),
            text,
        ));
        self.y += rows;
    }

    /// Lay `items` after `head`, comma separated, breaking lines between
    /// items. Continuation lines are indented to line up with the first item.
    fn flow(&mut self, head: Spans, items: Vec<Spans>) {
        let width = self.width.max(0) as usize;
        let indent = head.width();
        let count = items.len();
        let mut line = head;
        let mut placed = 0;

        for (i, item) in items.into_iter().enumerate() {
            let comma = usize::from(i + 1 < count);
            let space = usize::from(placed > 0);
            if placed > 0 && line.width() + space + item.width() + comma > width {
                self.line(std::mem::replace(&mut line, Spans::from(" ".repeat(indent))));
                placed = 0;
            }
            if placed > 0 {
                line = line.push(Span::raw(" "));
            }
            line.0.extend(item.0);
            if comma == 1 {
                line = line.push(Span::raw(","));
            }
            placed += 1;
        }
        self.line(line);
    }

    fn into_group(self) -> Group {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Fit;
    use crate::model::{Position, Text};
    use crate::model::Command;
    use crate::session::prompt::Prompt;
    use crate::session::state::Tone;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn screen(state: &SessionState, width: u16, height: u16) -> Vec<String> {
        compose(state, &Theme::new(false), 1, width, height)
            .fit(Rectangle::from_size(i32::from(width), i32::from(height)))
            .to_lines()
            .into_iter()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    fn state_with(content: &str, word: &str, offset: usize, suggestions: &[&str]) -> SessionState {
        let text = Arc::new(Text::new(
            content,
            Position {
                filename: PathBuf::from("a.go"),
                offset: 0,
                line: 7,
                column: 2,
            },
        ));
        let mut state = SessionState::new(3);
        state.push(Misspelling {
            word: word.into(),
            offset,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            action: Action::Undefined,
            text,
        });
        state
    }

    #[test]
    fn empty_session_shows_loading_then_done() {
        let mut state = SessionState::new(3);
        assert_eq!(screen(&state, 30, 6), vec!["   Loading data..."]);
        state.finish_loading();
        assert_eq!(screen(&state, 30, 6), vec!["   No spelling errors!"]);
    }

    #[test]
    fn header_marks_loading_with_plus() {
        let mut state = state_with("teh", "teh", 0, &["the"]);
        assert_eq!(screen(&state, 40, 8)[0], "   Spelling error 1 of 1+");
        state.finish_loading();
        assert_eq!(screen(&state, 40, 8)[0], "   Spelling error 1 of 1");
    }

    #[test]
    fn word_is_highlighted_on_its_line() {
        let state = state_with("first line\nsecond tpyo here", "tpyo", 18, &[]);
        let theme = Theme::new(true);
        let lines = highlighted(&state.misspellings()[0], &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0.len(), 1);
        let words: Vec<&str> = lines[1].0.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(words, vec!["second ", "tpyo", " here"]);
        assert_eq!(lines[1].0[1].style, theme.word);
    }

    #[test]
    fn legend_wraps_between_items() {
        let state = state_with("teh", "teh", 0, &["the", "ten"]);
        let lines = screen(&state, 40, 20);
        let legend: Vec<&String> = lines
            .iter()
            .skip_while(|l| !l.contains("Actions:"))
            .collect();
        assert_eq!(
            legend,
            vec![
                "   Actions: replace, Replace all,",
                "            ignore, Ignore all, edit,",
                "            Edit all, next undefined,",
                "            apply, quit",
            ]
        );
    }

    #[test]
    fn decision_status_and_prompt_are_shown() {
        let mut state = state_with("teh", "teh", 0, &["the"]);
        state.replace(1).unwrap();
        state.status_mut().push(Tone::Warning, "careful");
        let mut prompt = Prompt::text(Command::Edit);
        prompt.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('x'),
            crossterm::event::KeyModifiers::NONE,
        ));
        state.set_mode(Mode::Prompt(prompt));

        let lines = screen(&state, 50, 22);
        let tail: Vec<&str> = lines.iter().rev().take(5).rev().map(String::as_str).collect();
        assert_eq!(
            tail,
            vec![
                "            next undefined, apply, quit",
                "   replace with 'the'",
                "   all done",
                "   careful",
                "   replace with: x",
            ]
        );
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let state = state_with("teh", "teh", 0, &["the"]);
        for (w, h) in [(0, 0), (1, 1), (3, 2), (5, 3)] {
            let buf = compose(&state, &Theme::default(), 3, w, h)
                .fit(Rectangle::from_size(i32::from(w), i32::from(h)));
            assert_eq!(buf.cells().len(), usize::from(w) * usize::from(h));
        }
    }
}
