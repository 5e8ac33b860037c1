//! Modal input prompts.
//!
//! A prompt owns the keyboard until it resolves: digits (integer prompt) or
//! printable characters (text prompt) are echoed, Backspace deletes, Enter
//! submits, and Esc or Ctrl+C cancels.

use crate::model::{Command, PromptError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A number in `[min, max]`.
    Integer {
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// Free text.
    Text,
}

/// Result of feeding one key to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still reading.
    Pending,
    /// Enter was pressed on invalid input; the input was cleared.
    Invalid(PromptError),
    /// Esc or Ctrl+C.
    Cancelled,
    /// A valid number was submitted.
    Choice(usize),
    /// Text was submitted.
    Text(String),
}

/// An active prompt and the command waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    command: Command,
    kind: PromptKind,
    input: String,
}

impl Prompt {
    /// Ask for a number in `[min, max]` on behalf of `command`.
    pub fn integer(command: Command, min: usize, max: usize) -> Self {
        Self {
            command,
            kind: PromptKind::Integer { min, max },
            input: String::new(),
        }
    }

    /// Ask for replacement text on behalf of `command`.
    pub fn text(command: Command) -> Self {
        Self {
            command,
            kind: PromptKind::Text,
            input: String::new(),
        }
    }

    /// The command that opened the prompt.
    pub fn command(&self) -> Command {
        self.command
    }

    /// What the prompt asks for.
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    /// Text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Question shown before the input.
    pub fn label(&self) -> String {
        match self.kind {
            PromptKind::Integer { min, max } => {
                format!("enter number in range [{}, {}]: ", min, max)
            }
            PromptKind::Text => "replace with: ".to_string(),
        }
    }

    /// Feed one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Char('c') if ctrl => PromptOutcome::Cancelled,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                PromptOutcome::Pending
            }
            KeyCode::Char(_) if ctrl => PromptOutcome::Pending,
            KeyCode::Char(ch) => {
                let accepted = match self.kind {
                    PromptKind::Integer { .. } => ch.is_ascii_digit(),
                    PromptKind::Text => !ch.is_control(),
                };
                if accepted {
                    self.input.push(ch);
                }
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    fn submit(&mut self) -> PromptOutcome {
        match self.kind {
            PromptKind::Integer { min, max } => match parse_choice(&self.input, min, max) {
                Ok(n) => PromptOutcome::Choice(n),
                Err(err) => {
                    self.input.clear();
                    PromptOutcome::Invalid(err)
                }
            },
            PromptKind::Text => PromptOutcome::Text(std::mem::take(&mut self.input)),
        }
    }
}

/// Parse a decimal number and check it lies in `[min, max]`.
pub fn parse_choice(input: &str, min: usize, max: usize) -> Result<usize, PromptError> {
    let value: usize = input.parse().map_err(|_| PromptError::NotANumber {
        input: input.to_string(),
    })?;
    if value < min || value > max {
        return Err(PromptError::OutOfRange { value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(prompt: &mut Prompt, s: &str) {
        for ch in s.chars() {
            assert_eq!(prompt.handle_key(key(KeyCode::Char(ch))), PromptOutcome::Pending);
        }
    }

    #[test]
    fn parse_choice_accepts_range_bounds() {
        assert_eq!(parse_choice("1", 1, 3), Ok(1));
        assert_eq!(parse_choice("3", 1, 3), Ok(3));
    }

    #[test]
    fn parse_choice_rejects_empty_and_out_of_range() {
        assert_eq!(
            parse_choice("", 1, 3),
            Err(PromptError::NotANumber { input: String::new() })
        );
        assert_eq!(
            parse_choice("0", 1, 3),
            Err(PromptError::OutOfRange { value: 0, min: 1, max: 3 })
        );
        assert_eq!(
            parse_choice("4", 1, 3),
            Err(PromptError::OutOfRange { value: 4, min: 1, max: 3 })
        );
    }

    #[test]
    fn parse_choice_rejects_overflow() {
        let huge = "9".repeat(40);
        assert!(matches!(
            parse_choice(&huge, 1, 3),
            Err(PromptError::NotANumber { .. })
        ));
    }

    #[test]
    fn integer_prompt_ignores_non_digits() {
        let mut prompt = Prompt::integer(Command::Replace, 1, 20);
        type_str(&mut prompt, "1x2 ");
        assert_eq!(prompt.input(), "12");
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), PromptOutcome::Choice(12));
    }

    #[test]
    fn invalid_integer_clears_input_and_keeps_prompting() {
        let mut prompt = Prompt::integer(Command::ReplaceAll, 1, 2);
        type_str(&mut prompt, "7");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Invalid(PromptError::OutOfRange { value: 7, min: 1, max: 2 })
        );
        assert_eq!(prompt.input(), "");

        type_str(&mut prompt, "2");
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), PromptOutcome::Choice(2));
    }

    #[test]
    fn empty_integer_is_invalid() {
        let mut prompt = Prompt::integer(Command::Replace, 1, 2);
        assert!(matches!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Invalid(PromptError::NotANumber { .. })
        ));
    }

    #[test]
    fn text_prompt_accepts_spaces_and_backspace() {
        let mut prompt = Prompt::text(Command::Edit);
        type_str(&mut prompt, "the  end");
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Backspace));
        assert_eq!(prompt.input(), "the  ");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Text("the  ".into())
        );
    }

    #[test]
    fn backspace_on_empty_input_is_harmless() {
        let mut prompt = Prompt::text(Command::EditAll);
        assert_eq!(prompt.handle_key(key(KeyCode::Backspace)), PromptOutcome::Pending);
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn empty_text_is_a_valid_replacement() {
        let mut prompt = Prompt::text(Command::Edit);
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Text(String::new())
        );
    }

    #[test]
    fn cancel_keys() {
        let mut prompt = Prompt::text(Command::Edit);
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptOutcome::Cancelled);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(prompt.handle_key(ctrl_c), PromptOutcome::Cancelled);
    }

    #[test]
    fn labels() {
        assert_eq!(
            Prompt::integer(Command::Replace, 1, 3).label(),
            "enter number in range [1, 3]: "
        );
        assert_eq!(Prompt::text(Command::Edit).label(), "replace with: ");
    }
}
