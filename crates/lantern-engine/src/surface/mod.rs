//! Abstract 2D drawing surface.
//!
//! The runtime renders through [`Surface`] and never learns what backs it.
//! [`Pixmap`] is the CPU reference implementation used by the tests and by
//! embedders that blit the pixels themselves; a GPU-backed implementation
//! plugs in at the same seam.

mod pixmap;

use std::sync::Arc;

use crate::assets::Bitmap;
use crate::coords::{Point, Rect};
use crate::paint::Color;

pub use pixmap::Pixmap;

/// Text appearance for [`Surface::fill_text`] / [`Surface::measure_text`].
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font: Arc<fontdue::Font>,
    pub px: f32,
    pub color: Color,
}

/// Result of a text measurement.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
}

/// 2D drawing contract.
///
/// Drawing coordinates are in the current transformed space: the runtime
/// applies the logical→device scale factor, entities push their own
/// translate/scale on top. Every `save` must be paired with a `restore`; the
/// runtime guarantees pairing even on early error returns, and implementations
/// may debug-assert balance.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, offset: Point);
    fn scale(&mut self, factor: Point);

    /// Resets a rectangle to fully transparent.
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blits `bitmap` scaled into `dst`, modulated by `opacity`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect, opacity: f32);

    /// Draws `text` with its top-left pen position at `origin`.
    fn fill_text(&mut self, text: &str, style: &TextStyle, origin: Point);
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Current backing store size in device pixels.
    fn device_size(&self) -> (u32, u32);

    /// Reallocates the backing store. Contents are discarded, the transform
    /// stack is reset.
    fn set_device_size(&mut self, width: u32, height: u32);
}
