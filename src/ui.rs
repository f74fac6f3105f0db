//! Small buffer helpers shared by the desktop's painters. Every write is
//! clipped to a caller-supplied bound so windows that hang off-screen never
//! touch cells outside the visible area.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub(crate) fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && row >= rect.y && column < rect.right() && row < rect.bottom()
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    let clip = bounds.intersection(buffer.area);
    if !rect_contains(clip, x, y) {
        return;
    }
    let room = clip.right().saturating_sub(x) as usize;
    buffer.set_stringn(x, y, text, room, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

pub(crate) fn fill(buffer: &mut Buffer, area: Rect, style: Style) {
    let clip = area.intersection(buffer.area);
    for y in clip.top()..clip.bottom() {
        for x in clip.left()..clip.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}
