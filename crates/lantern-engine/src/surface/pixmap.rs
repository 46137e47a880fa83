use crate::assets::Bitmap;
use crate::coords::{Point, Rect};
use crate::paint::Color;
use crate::text;

use super::{Surface, TextMetrics, TextStyle};

/// Translate + scale transform. No rotation: the runtime only ever composes
/// offsets and axis-aligned scales.
#[derive(Debug, Copy, Clone)]
struct Transform {
    tx: f32,
    ty: f32,
    sx: f32,
    sy: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform { tx: 0.0, ty: 0.0, sx: 1.0, sy: 1.0 };

    #[inline]
    fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.sx + self.tx, p.y * self.sy + self.ty)
    }
}

/// Software [`Surface`] over an owned RGBA8 bitmap.
///
/// Rendering is deliberately simple: nearest-neighbor bitmap scaling and
/// per-pixel source-over blending. Good enough for tests, tools, and small
/// embedders; not a performance statement.
#[derive(Debug)]
pub struct Pixmap {
    bitmap: Bitmap,
    current: Transform,
    stack: Vec<Transform>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bitmap: Bitmap::new(width, height),
            current: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// The rendered pixels.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Maps a rect through the current transform and clamps it to the device,
    /// yielding an inclusive-exclusive pixel span.
    fn device_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let a = self.current.apply(Point::new(rect.x, rect.y));
        let b = self.current.apply(Point::new(rect.x + rect.w, rect.y + rect.h));

        let (w, h) = (self.bitmap.width() as f32, self.bitmap.height() as f32);
        let x0 = a.x.min(b.x).max(0.0).floor();
        let y0 = a.y.min(b.y).max(0.0).floor();
        let x1 = a.x.max(b.x).min(w).ceil();
        let y1 = a.y.max(b.y).min(h).ceil();

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for Pixmap {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        debug_assert!(!self.stack.is_empty(), "restore without matching save");
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    fn translate(&mut self, offset: Point) {
        self.current.tx += offset.x * self.current.sx;
        self.current.ty += offset.y * self.current.sy;
    }

    fn scale(&mut self, factor: Point) {
        self.current.sx *= factor.x;
        self.current.sy *= factor.y;
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some((x0, y0, x1, y1)) = self.device_span(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.bitmap.set_pixel(x, y, [0; 4]);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.device_span(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.bitmap.blend_pixel(x, y, color);
            }
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect, opacity: f32) {
        if bitmap.width() == 0 || bitmap.height() == 0 || opacity <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.device_span(dst) else {
            return;
        };

        // Nearest-neighbor: map each device pixel back into source space.
        let origin = self.current.apply(Point::new(dst.x, dst.y));
        let px_w = dst.w * self.current.sx;
        let px_h = dst.h * self.current.sy;

        for y in y0..y1 {
            for x in x0..x1 {
                let u = ((x as f32 + 0.5 - origin.x) / px_w).clamp(0.0, 1.0);
                let v = ((y as f32 + 0.5 - origin.y) / px_h).clamp(0.0, 1.0);

                let sx = ((u * bitmap.width() as f32) as u32).min(bitmap.width() - 1);
                let sy = ((v * bitmap.height() as f32) as u32).min(bitmap.height() - 1);

                let [r, g, b, a] = bitmap.pixel(sx, sy);
                let color = Color::from_rgba8(r, g, b, a);
                self.bitmap.blend_pixel(x, y, color.with_alpha(color.a * opacity));
            }
        }
    }

    fn fill_text(&mut self, s: &str, style: &TextStyle, origin: Point) {
        // Text is rasterized at the transformed pixel size so glyphs stay
        // sharp under the logical→device scale.
        let device_origin = self.current.apply(origin);
        let px = style.px * self.current.sy;

        text::raster_into(
            &mut self.bitmap,
            &style.font,
            s,
            px,
            style.color,
            device_origin.x,
            device_origin.y,
        );
    }

    fn measure_text(&mut self, s: &str, style: &TextStyle) -> TextMetrics {
        TextMetrics {
            width: text::measure(&style.font, s, style.px),
        }
    }

    fn device_size(&self) -> (u32, u32) {
        (self.bitmap.width(), self.bitmap.height())
    }

    fn set_device_size(&mut self, width: u32, height: u32) {
        self.bitmap = Bitmap::new(width, height);
        self.current = Transform::IDENTITY;
        self.stack.clear();
    }
}
