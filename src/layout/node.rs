//! The fitting contract and the bounded composition nodes.
//!
//! Every node answers one question: given a target rectangle, what cells
//! fill it? Nested rectangles are always relative to their parent's origin,
//! so callers never do coordinate math beyond "where inside my parent".

use super::cell::CellBuffer;
use super::geometry::Rectangle;
use super::grid::Grid;
use super::text::Spans;

/// Produce a bounded cell buffer for a target rectangle.
///
/// The result's bounds equal `target.canon()` and it holds exactly
/// `width * height` cells.
pub trait Fit {
    /// Fit `self` into `target`.
    fn fit(&self, target: Rectangle) -> CellBuffer;
}

/// Any composable piece of a layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain text with no bounds of its own.
    Text(Spans),
    /// A single bounded region.
    Block(Block),
    /// Several bounded regions sharing one coordinate space.
    Group(Group),
    /// Weighted rows and columns.
    Grid(Grid),
}

impl Node {
    /// Inherent bounds, for nodes that have them.
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            Node::Block(b) => Some(b.bounds()),
            Node::Group(g) => Some(g.bounds()),
            Node::Text(_) | Node::Grid(_) => None,
        }
    }
}

impl Fit for Node {
    fn fit(&self, target: Rectangle) -> CellBuffer {
        match self {
            Node::Text(spans) => spans.fit(target),
            Node::Block(block) => block.fit(target),
            Node::Group(group) => group.fit(target),
            Node::Grid(grid) => grid.fit(target),
        }
    }
}

impl From<Spans> for Node {
    fn from(spans: Spans) -> Self {
        Node::Text(spans)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(Spans::from(s))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(Spans::from(s))
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Grid> for Node {
    fn from(grid: Grid) -> Self {
        Node::Grid(grid)
    }
}

impl Fit for Spans {
    fn fit(&self, target: Rectangle) -> CellBuffer {
        let mut out = CellBuffer::blank(target);
        out.fill(&self.cells());
        out
    }
}

/// Place an already bounded buffer inside `target`, treating its bounds as
/// relative to `target`'s origin. Whatever falls outside is clipped.
fn frame(target: Rectangle, inner: CellBuffer) -> CellBuffer {
    let target = target.canon();
    let mut out = CellBuffer::blank(target);
    out.blit(&inner.translate(target.min));
    out
}

/// A rectangle with optional content.
///
/// Text content flows row-major into the rectangle; bounded content is
/// positioned relative to the rectangle's origin and clipped to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    rect: Rectangle,
    content: Option<Box<Node>>,
}

impl Block {
    /// Block bounded by `rect` holding `content`.
    pub fn new(rect: Rectangle, content: impl Into<Node>) -> Self {
        Self {
            rect,
            content: Some(Box::new(content.into())),
        }
    }

    /// Block with nothing in it: renders as blank cells.
    pub fn empty(rect: Rectangle) -> Self {
        Self {
            rect,
            content: None,
        }
    }

    /// Normalized bounds.
    pub fn bounds(&self) -> Rectangle {
        self.rect.canon()
    }

    /// The block's cells at its own bounds.
    pub fn render(&self) -> CellBuffer {
        match &self.content {
            Some(node) => node.fit(self.bounds()),
            None => CellBuffer::blank(self.bounds()),
        }
    }
}

impl Fit for Block {
    fn fit(&self, target: Rectangle) -> CellBuffer {
        frame(target, self.render())
    }
}

/// Blocks composed into one buffer covering the union of their bounds.
/// Later members overwrite earlier ones where they overlap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    members: Vec<Block>,
}

impl Group {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member, builder style.
    pub fn with(mut self, block: Block) -> Self {
        self.members.push(block);
        self
    }

    /// Append a member.
    pub fn push(&mut self, block: Block) {
        self.members.push(block);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union of all member bounds; the zero rectangle for an empty group.
    pub fn bounds(&self) -> Rectangle {
        self.members
            .iter()
            .fold(Rectangle::ZERO, |acc, m| acc.union(m.bounds()))
    }

    /// The group's cells at its own bounds.
    pub fn render(&self) -> CellBuffer {
        let mut out = CellBuffer::blank(self.bounds());
        for member in &self.members {
            out.blit(&member.render());
        }
        out
    }
}

impl FromIterator<Block> for Group {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Fit for Group {
    fn fit(&self, target: Rectangle) -> CellBuffer {
        frame(target, self.render())
    }
}
