//! User intents, independent of the keys bound to them.

/// A fix-session command.
///
/// Commands that need an argument (a suggestion number or replacement text)
/// are resolved through a prompt before they reach the session state. The
/// mapping from `crossterm::event::KeyEvent` to `Command` lives in
/// `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move to the next misspelling, wrapping around. Default: Up/Right
    Next,
    /// Move to the previous misspelling, wrapping around. Default: Down/Left
    Previous,
    /// Move to the next misspelling without a decision. Default: n
    NextUndefined,
    /// Ignore the current misspelling. Default: i
    Ignore,
    /// Ignore every later undecided occurrence of the current word. Default: I
    IgnoreAll,
    /// Replace the current misspelling with a numbered suggestion. Default: r
    Replace,
    /// Replace every later undecided occurrence with a suggestion. Default: R
    ReplaceAll,
    /// Replace the current misspelling with typed text. Default: e
    Edit,
    /// Replace every later undecided occurrence with typed text. Default: E
    EditAll,
    /// Write all replacements to disk. Default: a
    Apply,
    /// End the session. Default: q/Esc/Ctrl+C
    Quit,
}

impl Command {
    /// Commands that open a prompt before they can run.
    pub fn needs_prompt(self) -> bool {
        matches!(
            self,
            Command::Replace | Command::ReplaceAll | Command::Edit | Command::EditAll
        )
    }
}
