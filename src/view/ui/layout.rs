//! Layout utilities for hit testing and dialog placement

use ratatui::layout::Rect;

/// Check if a point is within a rectangle
///
/// This is the fundamental hit testing primitive used by the dialog to tell
/// overlay clicks from content clicks.
#[inline]
pub fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// A rectangle of at most `width` x `height` centered in `area`
///
/// The result is clamped so it never exceeds `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
