//! Fix-session state and the commands that mutate it.
//!
//! Pure data: no terminal, no threads. The interactive loop owns one
//! [`SessionState`] and is its only writer.

use super::prompt::Prompt;
use crate::model::{Action, Misspelling, PromptError};
use std::collections::VecDeque;

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral information.
    Info,
    /// Something finished well.
    Success,
    /// Needs attention but nothing failed.
    Warning,
    /// Something failed.
    Error,
}

/// One status log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Presentation hint.
    pub tone: Tone,
    /// Message text.
    pub text: String,
}

/// Most recent status messages, oldest dropped first.
#[derive(Debug, Clone)]
pub struct StatusLog {
    capacity: usize,
    lines: VecDeque<StatusLine>,
}

impl StatusLog {
    /// Log keeping at most `capacity` lines (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a message, evicting the oldest when full.
    pub fn push(&mut self, tone: Tone, text: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(StatusLine {
            tone,
            text: text.into(),
        });
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Messages, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &StatusLine> {
        self.lines.iter()
    }

    /// Number of messages held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no messages.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of messages held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// What the keyboard currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Key bindings map to commands.
    Browse,
    /// A prompt owns the keyboard.
    Prompt(Prompt),
    /// Corrections are being written; keys are ignored.
    Applying,
    /// Apply finished; the next key continues.
    Acknowledge,
}

/// Everything the session knows.
#[derive(Debug, Clone)]
pub struct SessionState {
    misspellings: Vec<Misspelling>,
    index: usize,
    done_loading: bool,
    status: StatusLog,
    mode: Mode,
}

impl SessionState {
    /// Empty session with a status log of `status_lines` messages.
    pub fn new(status_lines: usize) -> Self {
        Self {
            misspellings: Vec::new(),
            index: 0,
            done_loading: false,
            status: StatusLog::new(status_lines),
            mode: Mode::Browse,
        }
    }

    /// Append a misspelling delivered by ingestion.
    pub fn push(&mut self, misspelling: Misspelling) {
        self.misspellings.push(misspelling);
    }

    /// Mark the upstream stream as complete.
    pub fn finish_loading(&mut self) {
        self.done_loading = true;
    }

    /// True once every misspelling has been delivered.
    pub fn done_loading(&self) -> bool {
        self.done_loading
    }

    /// All misspellings, in arrival order.
    pub fn misspellings(&self) -> &[Misspelling] {
        &self.misspellings
    }

    /// Index of the current misspelling.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current misspelling, if any.
    pub fn current(&self) -> Option<&Misspelling> {
        self.misspellings.get(self.index)
    }

    /// Status messages.
    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    /// Mutable status messages.
    pub fn status_mut(&mut self) -> &mut StatusLog {
        &mut self.status
    }

    /// Current input mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Mutable input mode.
    pub fn mode_mut(&mut self) -> &mut Mode {
        &mut self.mode
    }

    /// Switch input mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Step forward, wrapping around.
    pub fn next(&mut self) {
        let len = self.misspellings.len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Step backward, wrapping around.
    pub fn previous(&mut self) {
        let len = self.misspellings.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Move to the next misspelling without a decision.
    ///
    /// Scans at most one full cycle starting after the current index; the
    /// current item is considered last. When nothing is undecided the index
    /// stays put and "all done" is logged.
    pub fn next_undefined(&mut self) {
        let len = self.misspellings.len();
        if len == 0 {
            return;
        }
        for step in 1..=len {
            let i = (self.index + step) % len;
            if self.misspellings[i].action.is_undefined() {
                self.index = i;
                return;
            }
        }
        self.status.push(Tone::Success, "all done");
    }

    /// Ignore the current misspelling.
    pub fn ignore(&mut self) {
        self.decide(Action::Ignore);
    }

    /// Replace the current misspelling with suggestion `choice` (1-based).
    ///
    /// # Errors
    ///
    /// [`PromptError::OutOfRange`] if `choice` does not name a suggestion.
    pub fn replace(&mut self, choice: usize) -> Result<(), PromptError> {
        let Some(current) = self.current() else {
            return Ok(());
        };
        let replacement = suggestion_for(current, choice)?;
        self.decide(Action::Replace { replacement });
        Ok(())
    }

    /// Replace the current misspelling with typed text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.decide(Action::replace(text));
    }

    /// Ignore every undecided occurrence of the current word from here on.
    pub fn ignore_all(&mut self) {
        self.decide_all(Action::Ignore);
    }

    /// Replace every undecided occurrence of the current word from here on
    /// with suggestion `choice` (1-based) of the current item.
    ///
    /// # Errors
    ///
    /// [`PromptError::OutOfRange`] if `choice` does not name a suggestion.
    pub fn replace_all(&mut self, choice: usize) -> Result<(), PromptError> {
        let Some(current) = self.current() else {
            return Ok(());
        };
        let replacement = suggestion_for(current, choice)?;
        self.decide_all(Action::Replace { replacement });
        Ok(())
    }

    /// Replace every undecided occurrence of the current word from here on
    /// with typed text.
    pub fn edit_all(&mut self, text: impl Into<String>) {
        self.decide_all(Action::replace(text));
    }

    fn decide(&mut self, action: Action) {
        let Some(current) = self.misspellings.get_mut(self.index) else {
            return;
        };
        current.action = action;
        self.next_undefined();
    }

    fn decide_all(&mut self, action: Action) {
        let Some(word) = self.current().map(|m| m.word.clone()) else {
            return;
        };
        for m in &mut self.misspellings[self.index..] {
            if m.word == word && m.action.is_undefined() {
                m.action = action.clone();
            }
        }
        self.next_undefined();
    }
}

fn suggestion_for(m: &Misspelling, choice: usize) -> Result<String, PromptError> {
    m.suggestion(choice)
        .map(str::to_string)
        .ok_or(PromptError::OutOfRange {
            value: choice,
            min: 1,
            max: m.suggestions.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, Text};
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn misspelling(word: &str, suggestions: &[&str], action: Action) -> Misspelling {
        let text = Arc::new(Text::new(
            word,
            Position {
                filename: PathBuf::from("doc.go"),
                offset: 0,
                line: 1,
                column: 1,
            },
        ));
        Misspelling {
            word: word.to_string(),
            offset: 0,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            action,
            text,
        }
    }

    fn state_with(words: &[&str]) -> SessionState {
        let mut state = SessionState::new(5);
        for w in words {
            state.push(misspelling(w, &["fix1", "fix2"], Action::Undefined));
        }
        state
    }

    fn actions(state: &SessionState) -> Vec<Action> {
        state.misspellings().iter().map(|m| m.action.clone()).collect()
    }

    #[test]
    fn commands_on_empty_list_are_noops() {
        let mut state = SessionState::new(5);
        state.next();
        state.previous();
        state.next_undefined();
        state.ignore();
        state.ignore_all();
        state.edit("x");
        state.edit_all("x");
        assert_eq!(state.replace(1), Ok(()));
        assert_eq!(state.replace_all(1), Ok(()));
        assert_eq!(state.index(), 0);
        assert!(state.current().is_none());
        assert!(state.status().is_empty());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut state = state_with(&["a", "b", "c"]);
        state.previous();
        assert_eq!(state.index(), 2);
        state.next();
        assert_eq!(state.index(), 0);
        state.next();
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn next_undefined_skips_decided_items() {
        let mut state = state_with(&["a", "b", "c"]);
        state.misspellings[1].action = Action::Ignore;
        state.next_undefined();
        assert_eq!(state.index(), 2);
        state.next_undefined();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn next_undefined_returns_to_current_when_it_is_the_only_one() {
        let mut state = state_with(&["a", "b"]);
        state.misspellings[1].action = Action::Ignore;
        state.next_undefined();
        assert_eq!(state.index(), 0);
        assert!(state.status().is_empty());
    }

    #[test]
    fn next_undefined_reports_all_done() {
        let mut state = state_with(&["a", "b", "c"]);
        state.index = 1;
        for m in &mut state.misspellings {
            m.action = Action::Ignore;
        }
        state.next_undefined();
        assert_eq!(state.index(), 1);
        let last = state.status().lines().last().unwrap();
        assert_eq!(last.text, "all done");
        assert_eq!(last.tone, Tone::Success);

        state.next_undefined();
        state.next_undefined();
        assert_eq!(state.index(), 1, "repeated scans stay put");
        assert!(state
            .status()
            .lines()
            .all(|line| line.text == "all done" && line.tone == Tone::Success));
    }

    #[test]
    fn single_decisions_advance_to_next_undefined() {
        let mut state = state_with(&["a", "b", "c"]);
        state.ignore();
        assert_eq!(state.index(), 1);
        state.replace(2).unwrap();
        assert_eq!(state.index(), 2);
        state.edit("zz");
        assert_eq!(
            actions(&state),
            vec![Action::Ignore, Action::replace("fix2"), Action::replace("zz")]
        );
        assert_eq!(state.status().lines().last().unwrap().text, "all done");
    }

    #[test]
    fn single_decision_overwrites_previous_one() {
        let mut state = state_with(&["a"]);
        state.ignore();
        state.replace(1).unwrap();
        assert_eq!(actions(&state), vec![Action::replace("fix1")]);
    }

    #[test]
    fn replace_rejects_bad_choice() {
        let mut state = state_with(&["a"]);
        assert_eq!(
            state.replace(3),
            Err(PromptError::OutOfRange { value: 3, min: 1, max: 2 })
        );
        assert_eq!(state.replace(0).unwrap_err(), PromptError::OutOfRange {
            value: 0,
            min: 1,
            max: 2
        });
        assert_eq!(actions(&state), vec![Action::Undefined]);
    }

    #[test]
    fn bulk_commands_touch_only_later_undecided_matches() {
        let mut state = state_with(&["teh", "wrod", "teh", "teh", "teh"]);
        state.misspellings[3].action = Action::Ignore;
        state.index = 2;
        state.replace_all(1).unwrap();

        assert_eq!(
            actions(&state),
            vec![
                Action::Undefined,
                Action::Undefined,
                Action::replace("fix1"),
                Action::Ignore,
                Action::replace("fix1"),
            ]
        );
        assert_eq!(state.index(), 0, "wraps to the first undecided item");
    }

    #[test]
    fn ignore_all_and_edit_all() {
        let mut state = state_with(&["teh", "teh", "wrod", "wrod"]);
        state.ignore_all();
        assert_eq!(state.index(), 2);
        state.edit_all("word");
        assert_eq!(
            actions(&state),
            vec![
                Action::Ignore,
                Action::Ignore,
                Action::replace("word"),
                Action::replace("word"),
            ]
        );
    }

    #[test]
    fn status_log_is_bounded() {
        let mut log = StatusLog::new(2);
        log.push(Tone::Info, "one");
        log.push(Tone::Info, "two");
        log.push(Tone::Error, "three");
        let texts: Vec<_> = log.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
        assert_eq!(StatusLog::new(0).capacity(), 1);
    }

    proptest! {
        #[test]
        fn next_undefined_lands_on_undefined_or_stays(
            decided in proptest::collection::vec(any::<bool>(), 1..20),
            start in 0usize..20,
        ) {
            let mut state = SessionState::new(3);
            for &d in &decided {
                let action = if d { Action::Ignore } else { Action::Undefined };
                state.push(misspelling("w", &[], action));
            }
            state.index = start % decided.len();
            let before = state.index;

            state.next_undefined();

            if decided.iter().all(|&d| d) {
                prop_assert_eq!(state.index(), before);
            } else {
                prop_assert!(state.current().unwrap().action.is_undefined());
            }
        }
    }
}
