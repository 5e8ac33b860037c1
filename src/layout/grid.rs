//! Weighted rows and columns.

use super::cell::CellBuffer;
use super::geometry::Rectangle;
use super::node::{Fit, Node};

/// One column of a grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Share of the row's width.
    pub weight: u32,
    /// What the column shows.
    pub content: Node,
}

impl Column {
    /// Create a column.
    pub fn new(weight: u32, content: impl Into<Node>) -> Self {
        Self {
            weight,
            content: content.into(),
        }
    }
}

/// One row of a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Share of the grid's height.
    pub weight: u32,
    /// Columns, left to right.
    pub columns: Vec<Column>,
}

impl Row {
    /// Create a row.
    pub fn new(weight: u32, columns: Vec<Column>) -> Self {
        Self { weight, columns }
    }

    /// Row holding a single full-width column.
    pub fn single(weight: u32, content: impl Into<Node>) -> Self {
        Self::new(weight, vec![Column::new(1, content)])
    }
}

/// Proportional layout: the target height is split among rows by weight,
/// then each row's width among its columns the same way.
///
/// Boundaries are `floor(cumulative * length / total)`; the final segment
/// takes whatever rounding leaves over. A weight of 0 collapses its segment,
/// and an all-zero axis renders nothing but blanks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, builder style.
    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Fit for Grid {
    fn fit(&self, target: Rectangle) -> CellBuffer {
        let target = target.canon();
        let mut out = CellBuffer::blank(target);

        let heights = split(target.height(), self.rows.iter().map(|r| r.weight));
        for (row, (dy, h)) in self.rows.iter().zip(heights) {
            if h == 0 {
                continue;
            }
            let y = target.min.y + dy;
            let widths = split(target.width(), row.columns.iter().map(|c| c.weight));
            for (col, (dx, w)) in row.columns.iter().zip(widths) {
                if w == 0 {
                    continue;
                }
                let x = target.min.x + dx;
                out.blit(&col.content.fit(Rectangle::new(x, y, x + w, y + h)));
            }
        }
        out
    }
}

/// Split `length` into `(start, size)` segments proportional to `weights`.
fn split(length: i32, weights: impl Iterator<Item = u32>) -> Vec<(i32, i32)> {
    let weights: Vec<u64> = weights.map(u64::from).collect();
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return vec![(0, 0); weights.len()];
    }

    let length = i64::from(length.max(0));
    let last = weights.len() - 1;
    let mut cumulative = 0u64;
    let mut prev = 0i64;
    let mut out = Vec::with_capacity(weights.len());
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        let end = if i == last {
            length
        } else {
            (cumulative as i64 * length) / total as i64
        };
        out.push((prev as i32, (end - prev) as i32));
        prev = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_equal_columns_in_one_row() {
        let grid = Grid::new().row(Row::new(
            1,
            vec![Column::new(1, "XYZ"), Column::new(1, "MNO")],
        ));
        let buf = grid.fit(Rectangle::from_size(10, 1));
        assert_eq!(buf.to_lines(), vec!["XYZ  MNO  "]);
    }

    #[test]
    fn last_row_absorbs_remainder() {
        let grid = Grid::new()
            .row(Row::single(1, "a"))
            .row(Row::single(1, "b"))
            .row(Row::single(1, "c"));
        let buf = grid.fit(Rectangle::from_size(1, 5));
        assert_eq!(buf.to_lines(), vec!["a", "b", " ", "c", " "]);
    }

    #[test]
    fn zero_weight_row_collapses() {
        let grid = Grid::new()
            .row(Row::single(1, "top"))
            .row(Row::single(0, "hidden"))
            .row(Row::single(1, "end"));
        let buf = grid.fit(Rectangle::from_size(3, 2));
        assert_eq!(buf.to_lines(), vec!["top", "end"]);
    }

    #[test]
    fn empty_grid_is_blank() {
        let buf = Grid::new().fit(Rectangle::new(2, 3, 5, 5));
        assert_eq!(buf.bounds(), Rectangle::new(2, 3, 5, 5));
        assert_eq!(buf.to_lines(), vec!["   ", "   "]);
    }

    #[test]
    fn all_zero_weights_are_blank() {
        let grid = Grid::new().row(Row::new(0, vec![Column::new(0, "x")]));
        let buf = grid.fit(Rectangle::from_size(2, 2));
        assert_eq!(buf.to_lines(), vec!["  ", "  "]);
    }

    #[test]
    fn zero_weight_columns_inside_weighted_row() {
        let grid = Grid::new().row(Row::new(
            1,
            vec![Column::new(0, "nope"), Column::new(1, "yes")],
        ));
        let buf = grid.fit(Rectangle::from_size(4, 1));
        assert_eq!(buf.to_lines(), vec!["yes "]);
    }

    #[test]
    fn grid_at_offset_keeps_absolute_bounds() {
        let grid = Grid::new().row(Row::new(
            1,
            vec![Column::new(1, "ab"), Column::new(1, "cd")],
        ));
        let target = Rectangle::new(-3, 7, 1, 8);
        let buf = grid.fit(target);
        assert_eq!(buf.bounds(), target);
        assert_eq!(buf.to_lines(), vec!["abcd"]);
    }

    #[test]
    fn grid_inside_block_fits_block_size() {
        use crate::layout::Block;
        let grid = Grid::new().row(Row::new(
            1,
            vec![Column::new(1, "L"), Column::new(1, "R")],
        ));
        let buf = Block::new(Rectangle::new(5, 5, 9, 6), grid).render();
        assert_eq!(buf.bounds(), Rectangle::new(5, 5, 9, 6));
        assert_eq!(buf.to_lines(), vec!["L R "]);
    }

    proptest! {
        #[test]
        fn segments_tile_the_length(
            length in 0i32..500,
            weights in proptest::collection::vec(0u32..10, 1..8),
        ) {
            let segments = split(length, weights.iter().copied());
            prop_assert_eq!(segments.len(), weights.len());
            if weights.iter().all(|w| *w == 0) {
                prop_assert!(segments.iter().all(|(_, s)| *s == 0));
            } else {
                let mut next = 0;
                for (start, size) in &segments {
                    prop_assert_eq!(*start, next);
                    prop_assert!(*size >= 0);
                    next += size;
                }
                prop_assert_eq!(next, length);
            }
        }
    }
}
