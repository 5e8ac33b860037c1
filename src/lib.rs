//! typofix
//!
//! Review and fix misspelled words in source code documentation.
//!
//! The crate follows a Pure Core / Impure Shell split:
//! - [`layout`], [`model`], [`session::state`], [`session::view`] are pure
//! - [`patch`] and [`source`] do file and stream I/O
//! - [`session::app`] owns the terminal and the helper threads

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod patch;
pub mod session;
pub mod source;
