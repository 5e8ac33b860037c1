//! Keyboard bindings configuration.

use crate::model::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to session commands.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Command>,
}

impl KeyBindings {
    /// Look up the command for a key event.
    ///
    /// Character keys match regardless of the Shift modifier, since the
    /// character itself already carries the case. Event kind and keyboard
    /// state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<Command> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Bind `key` to `command`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, command: Command) {
        self.bindings.insert(normalize(key), command);
    }
}

fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    KeyEvent::new(key.code, modifiers)
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = KeyBindings {
            bindings: HashMap::new(),
        };
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        // Navigation
        bindings.bind(plain(KeyCode::Up), Command::Next);
        bindings.bind(plain(KeyCode::Right), Command::Next);
        bindings.bind(plain(KeyCode::Down), Command::Previous);
        bindings.bind(plain(KeyCode::Left), Command::Previous);
        bindings.bind(plain(KeyCode::Char('n')), Command::NextUndefined);

        // Decisions
        bindings.bind(plain(KeyCode::Char('i')), Command::Ignore);
        bindings.bind(plain(KeyCode::Char('I')), Command::IgnoreAll);
        bindings.bind(plain(KeyCode::Char('r')), Command::Replace);
        bindings.bind(plain(KeyCode::Char('R')), Command::ReplaceAll);
        bindings.bind(plain(KeyCode::Char('e')), Command::Edit);
        bindings.bind(plain(KeyCode::Char('E')), Command::EditAll);

        bindings.bind(plain(KeyCode::Char('a')), Command::Apply);

        bindings.bind(plain(KeyCode::Char('q')), Command::Quit);
        bindings.bind(plain(KeyCode::Esc), Command::Quit);
        bindings.bind(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit,
        );

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn arrows_navigate() {
        let kb = KeyBindings::default();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(kb.get(key(KeyCode::Up)), Some(Command::Next));
        assert_eq!(kb.get(key(KeyCode::Right)), Some(Command::Next));
        assert_eq!(kb.get(key(KeyCode::Down)), Some(Command::Previous));
        assert_eq!(kb.get(key(KeyCode::Left)), Some(Command::Previous));
    }

    #[test]
    fn uppercase_matches_with_or_without_shift() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.get(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Command::ReplaceAll)
        );
        assert_eq!(
            kb.get(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::NONE)),
            Some(Command::ReplaceAll)
        );
        assert_eq!(
            kb.get(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Command::Replace)
        );
    }

    #[test]
    fn all_quit_keys() {
        let kb = KeyBindings::default();
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(kb.get(key), Some(Command::Quit), "{:?}", key);
        }
    }

    #[test]
    fn plain_c_is_unbound() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn event_kind_and_state_are_ignored() {
        let kb = KeyBindings::default();
        let key = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::CAPS_LOCK,
        };
        assert_eq!(kb.get(key), Some(Command::Apply));
    }

    #[test]
    fn bind_overrides_default() {
        let mut kb = KeyBindings::default();
        kb.bind(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE),
            Command::Next,
        );
        assert_eq!(
            kb.get(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Command::Next)
        );
    }
}
