//! Text shaping and rasterization.
//!
//! One shared code path for everything that touches glyphs: the `Text`
//! component's cached raster and the software surface's `fill_text` /
//! `measure_text`. Fonts are parsed once and shared behind an `Arc`.

use std::sync::Arc;

use thiserror::Error;

use crate::assets::Bitmap;
use crate::paint::Color;

/// Error returned by [`load_font`].
#[derive(Debug, Error)]
#[error("font parse error: {0}")]
pub struct FontError(String);

/// Parses a TrueType/OpenType font from raw bytes.
pub fn load_font(bytes: &[u8]) -> Result<Arc<fontdue::Font>, FontError> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map(Arc::new)
        .map_err(|e| FontError(e.to_string()))
}

/// Width of `text` laid out at `px`, in logical units.
pub fn measure(font: &fontdue::Font, text: &str, px: f32) -> f32 {
    layout(font, text, px)
        .glyphs()
        .iter()
        .map(|g| {
            let m = font.metrics_indexed(g.key.glyph_index, px);
            (g.x - m.xmin as f32 + m.advance_width).max(0.0)
        })
        .fold(0.0f32, f32::max)
}

/// Rasterizes `text` into `target` with its top-left pen position at
/// `(origin_x, origin_y)`. Glyph coverage modulates the color's alpha;
/// pixels are source-over blended.
pub fn raster_into(
    target: &mut Bitmap,
    font: &fontdue::Font,
    text: &str,
    px: f32,
    color: Color,
    origin_x: f32,
    origin_y: f32,
) {
    for glyph in layout(font, text, px).glyphs() {
        let (metrics, coverage) = font.rasterize_config(glyph.key);

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let c = coverage[row * metrics.width + col] as f32 / 255.0;
                if c <= 0.0 {
                    continue;
                }

                let x = origin_x + glyph.x + col as f32;
                let y = origin_y + glyph.y + row as f32;
                if x < 0.0 || y < 0.0 {
                    continue;
                }

                target.blend_pixel(x as u32, y as u32, color.with_alpha(color.a * c));
            }
        }
    }
}

fn layout(font: &fontdue::Font, text: &str, px: f32) -> fontdue::layout::Layout {
    use fontdue::layout::{CoordinateSystem, Layout, TextStyle};

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.append(&[font], &TextStyle::new(text, px, 0));
    layout
}
