//! Packages, documentation texts, and the misspellings found in them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a documentation text starts inside its source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// File the text was extracted from.
    pub filename: PathBuf,
    /// Byte offset of the first byte of the text within the file.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename.display(), self.line, self.column)
    }
}

/// A fragment of documentation as it appears in a source file.
///
/// Shared read-only between every [`Misspelling`] found in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    /// Raw text of the fragment.
    pub content: String,
    /// Location of the fragment.
    pub position: Position,
}

impl Text {
    /// Create a text fragment.
    pub fn new(content: impl Into<String>, position: Position) -> Self {
        Self {
            content: content.into(),
            position,
        }
    }
}

/// What the user decided to do about a misspelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    /// No decision yet.
    #[default]
    Undefined,
    /// Leave the word as it is.
    Ignore,
    /// Replace the word.
    Replace {
        /// Text written in place of the word.
        replacement: String,
    },
}

impl Action {
    /// Shorthand for [`Action::Replace`].
    pub fn replace(replacement: impl Into<String>) -> Self {
        Action::Replace {
            replacement: replacement.into(),
        }
    }

    /// True when no decision has been made.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Action::Undefined)
    }
}

/// A potentially misspelled word inside a [`Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    /// The word as it appears in the text.
    pub word: String,
    /// Byte offset of the word within the text content.
    pub offset: usize,
    /// Candidate corrections, best first. May be empty.
    pub suggestions: Vec<String>,
    /// Current decision.
    pub action: Action,
    /// The text the word was found in.
    pub text: Arc<Text>,
}

impl Misspelling {
    /// Byte offset of the word within its file.
    ///
    /// Saturates at `usize::MAX`; ingestion rejects records where that could
    /// happen.
    pub fn absolute_offset(&self) -> usize {
        self.text.position.offset.saturating_add(self.offset)
    }

    /// True when `offset + len(word)` fits inside the text content and the
    /// end of the word is addressable in the file.
    pub fn is_within_text(&self) -> bool {
        self.offset
            .checked_add(self.word.len())
            .filter(|&end| end <= self.text.content.len())
            .and_then(|end| self.text.position.offset.checked_add(end))
            .is_some()
    }

    /// Suggestion by 1-based choice number.
    pub fn suggestion(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }
}

/// A named unit of documentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Identifiers known to the extraction layer. Carried through unchanged.
    pub identifiers: Vec<String>,
    /// Documentation texts in source order.
    pub documentation: Vec<Arc<Text>>,
    /// Misspellings of every text, in text order then word order.
    pub misspellings: Vec<Misspelling>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str, offset: usize) -> Arc<Text> {
        Arc::new(Text::new(
            content,
            Position {
                filename: PathBuf::from("a.go"),
                offset,
                line: 3,
                column: 4,
            },
        ))
    }

    fn word(text: &Arc<Text>, word: &str, offset: usize) -> Misspelling {
        Misspelling {
            word: word.to_string(),
            offset,
            suggestions: vec!["one".into(), "two".into()],
            action: Action::Undefined,
            text: Arc::clone(text),
        }
    }

    #[test]
    fn absolute_offset_adds_text_position() {
        let t = text("Helo world", 100);
        assert_eq!(word(&t, "Helo", 0).absolute_offset(), 100);
        assert_eq!(word(&t, "world", 5).absolute_offset(), 105);
    }

    #[test]
    fn within_text_checks_word_end() {
        let t = text("Helo", 0);
        assert!(word(&t, "Helo", 0).is_within_text());
        assert!(!word(&t, "Helo", 1).is_within_text());
        assert!(!word(&t, "x", usize::MAX).is_within_text());
    }

    #[test]
    fn within_text_rejects_unaddressable_file_offset() {
        let t = text("teh", usize::MAX);
        let m = word(&t, "eh", 1);
        assert!(!m.is_within_text());
        assert_eq!(m.absolute_offset(), usize::MAX);

        let t = text("teh", usize::MAX - 3);
        assert!(word(&t, "eh", 1).is_within_text());
    }

    #[test]
    fn suggestion_is_one_based() {
        let t = text("Helo", 0);
        let m = word(&t, "Helo", 0);
        assert_eq!(m.suggestion(1), Some("one"));
        assert_eq!(m.suggestion(2), Some("two"));
        assert_eq!(m.suggestion(0), None);
        assert_eq!(m.suggestion(3), None);
    }

    #[test]
    fn position_displays_as_location() {
        assert_eq!(text("", 0).position.to_string(), "a.go:3:4");
    }
}
