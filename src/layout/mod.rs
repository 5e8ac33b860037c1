//! Cell-buffer layout engine.
//!
//! Composes nested rectangular regions into one flat buffer of styled cells.
//! A layout is a tree of [`Node`]s; calling [`Fit::fit`] on the root with the
//! screen rectangle yields exactly one cell per screen position, and
//! [`draw`] paints that onto a ratatui frame.

mod canvas;
mod cell;
mod geometry;
mod grid;
mod node;
mod text;

pub use canvas::{Canvas, draw, rect_of};
pub use cell::{Cell, CellBuffer, LayoutError};
pub use geometry::{Point, Rectangle};
pub use grid::{Column, Grid, Row};
pub use node::{Block, Fit, Group, Node};
pub use text::{Span, Spans};
