//! The drawing surface the panel renders onto.

use crate::geometry::{Align, Color, Rect};

/// Minimal drawing and windowing interface consumed by [`Panel`](crate::Panel).
pub trait Surface {
    /// Current drawable size in pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` inside `rect`, shrinking below `size` pixels if it would
    /// not fit.
    fn draw_text(&mut self, rect: Rect, color: Color, text: &str, size: u32, align: Align);

    /// Ask for [`Panel::refresh`](crate::Panel::refresh) to be called soon.
    fn request_repaint(&mut self);
}
