//! Styled cells and bounded cell buffers.

use super::geometry::{Point, Rectangle};
use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

/// Layout invariant violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A cell vector does not cover its rectangle exactly.
    #[error("cell buffer holds {actual} cells but {bounds:?} needs {expected}")]
    SizeMismatch {
        /// Rectangle the cells were meant for.
        bounds: Rectangle,
        /// `width * height` of `bounds`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
}

/// One terminal cell: a character plus style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character shown. `'\0'` marks the trailing half of a wide character.
    pub ch: char,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Bold, underline, etc.
    pub modifier: Modifier,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// An unstyled space.
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
        bg: Color::Reset,
        modifier: Modifier::empty(),
    };

    /// Create a cell with `ch` in the given style.
    pub fn styled(ch: char, style: Style) -> Self {
        Self {
            ch,
            fg: style.fg.unwrap_or(Color::Reset),
            bg: style.bg.unwrap_or(Color::Reset),
            modifier: style.add_modifier,
        }
    }

    /// The cell that follows a double-width character.
    pub fn continuation(style: Style) -> Self {
        Self::styled('\0', style)
    }

    /// True for the trailing half of a wide character.
    pub fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }

    /// Style of this cell as a ratatui [`Style`].
    pub fn style(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(self.modifier)
    }
}

/// A flat, row-major cell array tied to a rectangle.
///
/// `cells.len() == bounds.width() * bounds.height()` holds for every value;
/// the fields are private so nothing can break it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    bounds: Rectangle,
    cells: Vec<Cell>,
}

impl CellBuffer {
    /// A buffer of blank cells covering `bounds` (normalized).
    pub fn blank(bounds: Rectangle) -> Self {
        let bounds = bounds.canon();
        Self {
            bounds,
            cells: vec![Cell::BLANK; bounds.area()],
        }
    }

    /// Wrap existing cells, checking the size invariant.
    pub fn from_cells(bounds: Rectangle, cells: Vec<Cell>) -> Result<Self, LayoutError> {
        let bounds = bounds.canon();
        let expected = bounds.area();
        if cells.len() != expected {
            return Err(LayoutError::SizeMismatch {
                bounds,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { bounds, cells })
    }

    /// The rectangle this buffer covers.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the buffer, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.bounds.width() as usize
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.bounds.height() as usize
    }

    /// Cell at absolute coordinates, if inside the bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        let b = self.bounds;
        if x < b.min.x || x >= b.max.x || y < b.min.y || y >= b.max.y {
            return None;
        }
        self.cells.get(b.index_of(x, y))
    }

    /// Move the buffer without touching its cells.
    pub fn translate(mut self, offset: Point) -> Self {
        self.bounds = self.bounds.translate(offset);
        self
    }

    /// Fill cells in row-major order from the start, dropping whatever does
    /// not fit.
    ///
    /// A wide character never straddles a row end: the last column is left
    /// blank and the character moves to the next row. A buffer one cell wide
    /// cannot hold a wide character at all, so it is dropped.
    pub fn fill(&mut self, cells: &[Cell]) {
        let w = self.width();
        if w == 0 {
            return;
        }
        let mut pos = 0;
        let mut i = 0;
        while i < cells.len() && pos < self.cells.len() {
            let wide = cells.get(i + 1).is_some_and(Cell::is_continuation);
            if !wide {
                self.cells[pos] = cells[i];
                pos += 1;
                i += 1;
            } else if w < 2 {
                i += 2;
            } else if pos % w == w - 1 {
                self.cells[pos] = Cell::BLANK;
                pos += 1;
            } else {
                self.cells[pos..pos + 2].copy_from_slice(&cells[i..i + 2]);
                pos += 2;
                i += 2;
            }
        }
    }

    /// Copy `src` onto this buffer at `src`'s own (absolute) bounds. Only the
    /// overlap is copied.
    pub fn blit(&mut self, src: &CellBuffer) {
        debug_assert_eq!(src.cells.len(), src.bounds.area());
        debug_assert_eq!(self.cells.len(), self.bounds.area());

        let overlap = self.bounds.intersect(src.bounds);
        if overlap.is_empty() {
            return;
        }
        let w = overlap.width() as usize;
        for y in overlap.min.y..overlap.max.y {
            let dst = self.bounds.index_of(overlap.min.x, y);
            let from = src.bounds.index_of(overlap.min.x, y);
            self.cells[dst..dst + w].copy_from_slice(&src.cells[from..from + w]);
        }
    }

    /// Render rows as plain strings; continuation cells are dropped.
    pub fn to_lines(&self) -> Vec<String> {
        let w = self.width();
        if w == 0 {
            return vec![String::new(); self.height()];
        }
        self.cells
            .chunks(w)
            .map(|row| {
                row.iter()
                    .filter(|c| !c.is_continuation())
                    .map(|c| c.ch)
                    .collect()
            })
            .collect()
    }
}
