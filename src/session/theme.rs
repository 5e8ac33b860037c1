//! Session styling.

use super::state::Tone;
use ratatui::style::{Color, Modifier, Style};

// ===== Theme =====

/// Styles used by the session view.
///
/// With colors disabled every style keeps its modifiers (bold, underline,
/// reverse) and drops its colors, so the screen stays readable on a
/// monochrome terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Frame around the page.
    pub border: Style,
    /// Counters in the header.
    pub strong: Style,
    /// `file:line:col` line.
    pub location: Style,
    /// Surrounding documentation text.
    pub content: Style,
    /// The misspelled word inside the text.
    pub word: Style,
    /// Key letters in the action legend.
    pub key: Style,
    /// The current decision.
    pub decision: Style,
    /// Prompt question.
    pub prompt: Style,
    /// Prompt input echo.
    pub input: Style,
    info: Style,
    success: Style,
    warning: Style,
    error: Style,
}

impl Theme {
    /// Colored or monochrome theme.
    pub fn new(color: bool) -> Self {
        if color {
            Self::colored()
        } else {
            Self::monochrome()
        }
    }

    fn colored() -> Self {
        Self {
            border: Style::default().bg(Color::Indexed(247)),
            strong: Style::default().add_modifier(Modifier::BOLD),
            location: Style::default().add_modifier(Modifier::UNDERLINED),
            content: Style::default().fg(Color::Indexed(244)),
            word: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            key: Style::default().add_modifier(Modifier::UNDERLINED),
            decision: Style::default().fg(Color::Blue),
            prompt: Style::default().add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::Magenta),
            info: Style::default(),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
        }
    }

    fn monochrome() -> Self {
        Self {
            border: Style::default().add_modifier(Modifier::REVERSED),
            strong: Style::default().add_modifier(Modifier::BOLD),
            location: Style::default().add_modifier(Modifier::UNDERLINED),
            content: Style::default(),
            word: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            key: Style::default().add_modifier(Modifier::UNDERLINED),
            decision: Style::default().add_modifier(Modifier::ITALIC),
            prompt: Style::default().add_modifier(Modifier::BOLD),
            input: Style::default(),
            info: Style::default(),
            success: Style::default(),
            warning: Style::default(),
            error: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    /// Style of a status message.
    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Info => self.info,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Error => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== Tests =====
