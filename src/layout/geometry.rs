//! Signed-coordinate geometry for cell composition.
//!
//! Unlike terminal screen coordinates, layout rectangles may sit anywhere in
//! the plane (including negative coordinates) because nested blocks are
//! always positioned relative to their parent's origin.

/// A point in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle. `min` is inclusive, `max` is exclusive.
///
/// A rectangle built with swapped corners is valid input; call [`canon`]
/// (every composition operation does) to get the well-formed version.
///
/// [`canon`]: Rectangle::canon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    /// Top-left corner (inclusive).
    pub min: Point,
    /// Bottom-right corner (exclusive).
    pub max: Point,
}

impl Rectangle {
    /// The empty rectangle at the origin.
    pub const ZERO: Rectangle = Rectangle {
        min: Point::new(0, 0),
        max: Point::new(0, 0),
    };

    /// Create a rectangle from two corners, normalized.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
        .canon()
    }

    /// Create a rectangle from two corners without normalizing.
    pub const fn raw(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Return the well-formed version of this rectangle, with
    /// `min.x <= max.x` and `min.y <= max.y`.
    pub fn canon(self) -> Self {
        let (x0, x1) = if self.max.x < self.min.x {
            (self.max.x, self.min.x)
        } else {
            (self.min.x, self.max.x)
        };
        let (y0, y1) = if self.max.y < self.min.y {
            (self.max.y, self.min.y)
        } else {
            (self.min.y, self.max.y)
        };
        Self::raw(x0, y0, x1, y1)
    }

    /// Width. Only meaningful for canonical rectangles.
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height. Only meaningful for canonical rectangles.
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        let r = self.canon();
        r.width() as usize * r.height() as usize
    }

    /// True when the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Translate by `p`.
    pub fn translate(self, p: Point) -> Self {
        Self::raw(
            self.min.x + p.x,
            self.min.y + p.y,
            self.max.x + p.x,
            self.max.y + p.y,
        )
    }

    /// Largest rectangle contained by both. Empty intersections collapse to
    /// [`Rectangle::ZERO`].
    pub fn intersect(self, other: Rectangle) -> Self {
        let r = Self::raw(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() {
            Self::ZERO
        } else {
            r
        }
    }

    /// Smallest rectangle containing both. Empty operands are ignored.
    pub fn union(self, other: Rectangle) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::raw(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    /// Row-major index of the absolute point `(x, y)` inside this rectangle.
    pub(crate) fn index_of(&self, x: i32, y: i32) -> usize {
        ((y - self.min.y) * self.width() + (x - self.min.x)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canon_swaps_inverted_corners() {
        let r = Rectangle::raw(4, 8, 0, 0).canon();
        assert_eq!(r, Rectangle::raw(0, 0, 4, 8));
        assert_eq!(r.area(), 32);
    }

    #[test]
    fn intersect_of_disjoint_is_zero() {
        let a = Rectangle::new(0, 0, 2, 2);
        let b = Rectangle::new(5, 5, 7, 7);
        assert_eq!(a.intersect(b), Rectangle::ZERO);
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rectangle::new(0, 0, 4, 4);
        let b = Rectangle::new(2, 1, 6, 3);
        assert_eq!(a.intersect(b), Rectangle::new(2, 1, 4, 3));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Rectangle::new(1, 1, 3, 3);
        assert_eq!(a.union(Rectangle::ZERO), a);
        assert_eq!(Rectangle::new(9, 9, 9, 12).union(a), a);
    }

    #[test]
    fn union_spans_both() {
        let a = Rectangle::new(1, 1, 3, 3);
        let b = Rectangle::new(4, 0, 5, 4);
        assert_eq!(a.union(b), Rectangle::new(1, 0, 5, 4));
    }

    #[test]
    fn negative_coordinates_are_valid() {
        let r = Rectangle::new(-42, -43, -41, -39);
        assert_eq!(r.width(), 1);
        assert_eq!(r.height(), 4);
        assert_eq!(r.index_of(-42, -40), 3);
    }
}
