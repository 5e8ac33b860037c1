//! Painting fitted cell buffers onto a ratatui frame.

use super::cell::CellBuffer;
use super::geometry::Rectangle;
use super::node::{Fit, Node};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;

/// Widget that copies a [`CellBuffer`] into the frame buffer.
///
/// The cell buffer's bounds are taken as screen coordinates; anything outside
/// the render area is dropped.
pub struct Canvas<'a> {
    cells: &'a CellBuffer,
}

impl<'a> Canvas<'a> {
    /// Wrap a cell buffer for painting.
    pub fn new(cells: &'a CellBuffer) -> Self {
        Self { cells }
    }
}

impl Widget for Canvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = self.cells.bounds().intersect(rect_of(area));
        for y in bounds.min.y..bounds.max.y {
            for x in bounds.min.x..bounds.max.x {
                let (Some(src), Ok(sx), Ok(sy)) =
                    (self.cells.get(x, y), u16::try_from(x), u16::try_from(y))
                else {
                    continue;
                };
                let Some(dst) = buf.cell_mut((sx, sy)) else {
                    continue;
                };
                if src.is_continuation() {
                    dst.reset();
                    continue;
                }
                dst.set_char(src.ch).set_style(src.style());
            }
        }
    }
}

/// The screen area as a layout rectangle.
pub fn rect_of(area: Rect) -> Rectangle {
    Rectangle::new(
        i32::from(area.x),
        i32::from(area.y),
        i32::from(area.x) + i32::from(area.width),
        i32::from(area.y) + i32::from(area.height),
    )
}

/// Fit `node` to the whole frame and paint it.
pub fn draw(frame: &mut Frame, node: &Node) {
    let area = frame.area();
    let cells = node.fit(rect_of(area));
    frame.render_widget(Canvas::new(&cells), area);
}
