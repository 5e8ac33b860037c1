//! Interactive fix session.
//!
//! - [`state`]: the list of misspellings and the commands over it (pure)
//! - [`prompt`]: modal number and text input (pure)
//! - [`view`]: screen composition as a layout tree (pure)
//! - [`events`]: the terminal event pump feeding the loop
//! - [`gate`]: one session at a time
//! - [`app`]: the loop itself and terminal setup

pub mod app;
pub mod events;
pub mod gate;
pub mod prompt;
pub mod state;
pub mod theme;
pub mod view;

pub use app::{FixSession, SessionOptions, run_fix};
pub use events::{CrosstermEvents, EventSource, ScriptedEvents};
pub use gate::{SessionGate, SessionPermit};
pub use prompt::{Prompt, PromptKind, PromptOutcome, parse_choice};
pub use state::{Mode, SessionState, StatusLine, StatusLog, Tone};
pub use theme::Theme;
