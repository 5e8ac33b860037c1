//! Domain model types (pure).
//!
//! Misspellings, the decisions taken on them, user commands, and the error
//! taxonomy shared by every layer.

pub mod command;
pub mod error;
pub mod misspelling;

pub use command::Command;
pub use error::{AppError, IngestionError, PatchError, PromptError, SessionError};
pub use misspelling::{Action, Misspelling, Package, Position, Text};
