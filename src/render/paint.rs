// Painting a display tree into a ratatui buffer
//
// Geometry is resolved top-down: each node's percentages are taken of its
// parent's resolved area. Unset sizes fill what is left after the offset,
// and nothing is allowed to spill outside its parent.

use crate::display::{Atom, Display, Geometry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Area a node with `geometry` occupies inside `parent`
pub fn resolve(geometry: &Geometry, parent: Rect) -> Rect {
    let left = geometry.left.map_or(0, |p| p.of(parent.width));
    let top = geometry.top.map_or(0, |p| p.of(parent.height));
    let room_x = parent.width - left;
    let room_y = parent.height - top;

    let width = geometry.width.map_or(room_x, |p| p.of(parent.width).min(room_x));
    let height = geometry.height.map_or(room_y, |p| p.of(parent.height).min(room_y));

    Rect::new(parent.x + left, parent.y + top, width, height)
}

impl Widget for &Display {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = resolve(self.geometry(), area);
        match self {
            Display::Atom(atom) => paint_atom(atom, area, buf),
            // Insertion order is stacking order: later children cover earlier ones
            Display::List(list) => {
                for child in list.children() {
                    child.render(area, buf);
                }
            }
        }
    }
}

fn paint_atom(atom: &Atom, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let mut block = Block::bordered();
    if let Some(label) = atom.label() {
        block = block.title(label);
    }
    Paragraph::new(atom.content()).block(block).render(area, buf);
}
