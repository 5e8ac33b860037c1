//! Error types for typofix.
//!
//! Each layer owns a `thiserror` enum and errors compose upward through `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned to `main`
//!   - [`IngestionError`] - Reading or decoding the correction stream
//!   - [`PatchError`] - File I/O while applying corrections
//!   - [`SessionError`] - Interactive session failures
//!   - [`ConfigError`], [`LoggingError`] - Ambient setup
//!
//! # Recovery Strategy
//!
//! Ingestion errors end the interactive session: without a reliable stream
//! the list of corrections cannot be trusted. A patch I/O error aborts the
//! rest of the apply queue but leaves already written edits in place. A word
//! that no longer matches the file is **not** an error; the patch engine
//! reports it as a progress message and moves on. Prompt validation errors
//! never leave the prompt that produced them.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// The correction stream could not be read or decoded.
    #[error("Failed to read corrections: {0}")]
    Ingestion(#[from] IngestionError),

    /// Applying corrections failed on file I/O.
    #[error("Failed to apply corrections: {0}")]
    Patch(#[from] PatchError),

    /// The interactive session ended abnormally.
    #[error("Fix session failed: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Opening the input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while turning the correction stream into misspellings.
///
/// All variants are fatal to a running session.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The underlying reader failed.
    #[error("Failed to read correction stream: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// File named on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No file was given and stdin is an interactive terminal.
    #[error("No input: pass a FILE or pipe the correction stream on stdin")]
    NoInput,

    /// A line is not a valid package record.
    ///
    /// `line` is 1-based so it can be matched against the input with any
    /// editor.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the stream.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// A misspelling points outside the text it was found in.
    ///
    /// `offset + len(word)` must not exceed the length of the text content;
    /// applying such a record would read or write the wrong bytes.
    #[error(
        "Misspelling {word:?} at offset {offset} overruns text of {content_len} bytes in {filename}"
    )]
    OffsetOutOfBounds {
        /// File the text belongs to.
        filename: PathBuf,
        /// Offset of the word inside the text.
        offset: usize,
        /// The misspelled word.
        word: String,
        /// Byte length of the text content.
        content_len: usize,
    },
}

/// File I/O failures while applying corrections.
///
/// Ends the apply run. Edits written before the failure stay on disk; items
/// still queued are not applied.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Reading the file to patch failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File being patched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the patched file back failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File being patched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    /// The file the failure happened on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PatchError::Read { path, .. } | PatchError::Write { path, .. } => path,
        }
    }
}

/// Validation failures for integer prompt input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Input is empty or not a decimal number.
    #[error("{input:?} is not a number")]
    NotANumber {
        /// What the user typed.
        input: String,
    },

    /// Input is a number outside the accepted range.
    #[error("{value} is not in range [{min}, {max}]")]
    OutOfRange {
        /// Parsed value.
        value: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
}

/// Failures that end an interactive session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The terminal could not be set up, drawn to, or read from.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The correction stream failed while the session was running.
    #[error("Upstream error: {0}")]
    Ingestion(#[from] IngestionError),

    /// Applying corrections failed; reported after the user acknowledged it.
    #[error("Apply failed: {0}")]
    Patch(#[from] PatchError),

    /// Another session holds the session gate.
    #[error("A fix session is already running")]
    AlreadyRunning,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn ingestion_error_converts_to_app_error() {
        fn decode() -> Result<(), IngestionError> {
            Err(IngestionError::InvalidJson {
                line: 3,
                message: "expected value".into(),
            })
        }
        fn run() -> Result<(), AppError> {
            decode()?;
            Ok(())
        }
        let err = run().unwrap_err();
        assert!(matches!(
            err,
            AppError::Ingestion(IngestionError::InvalidJson { line: 3, .. })
        ));
        assert_eq!(
            err.to_string(),
            "Failed to read corrections: Invalid JSON at line 3: expected value"
        );
    }

    #[test]
    fn patch_error_names_path() {
        let err = PatchError::Read {
            path: PathBuf::from("/tmp/x.go"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.path(), std::path::Path::new("/tmp/x.go"));
        assert_eq!(err.to_string(), "Failed to read /tmp/x.go: gone");
    }

    #[test]
    fn prompt_error_messages() {
        let err = PromptError::OutOfRange {
            value: 7,
            min: 1,
            max: 3,
        };
        assert_eq!(err.to_string(), "7 is not in range [1, 3]");
        let err = PromptError::NotANumber {
            input: String::new(),
        };
        assert_eq!(err.to_string(), "\"\" is not a number");
    }

    #[test]
    fn offset_error_mentions_word_and_file() {
        let err = IngestionError::OffsetOutOfBounds {
            filename: PathBuf::from("doc.go"),
            offset: 10,
            word: "teh".into(),
            content_len: 11,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"teh\""));
        assert!(msg.contains("doc.go"));
    }
}
