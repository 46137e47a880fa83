use crate::paint::Color;

use super::loader::LoadError;

/// Owned RGBA8 pixel buffer, row-major, straight alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Transparent bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wraps an existing RGBA8 buffer. `pixels.len()` must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "pixel buffer size does not match dimensions"
        );
        Self { width, height, pixels }
    }

    /// Decodes an encoded image (PNG/JPEG/BMP) into a bitmap.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        let decoded = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba8(width, height, decoded.into_raw()))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// RGBA of one pixel. Out-of-bounds reads return transparent.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let o = self.offset(x, y);
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }

    /// Writes one pixel; out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.pixels[o..o + 4].copy_from_slice(&rgba);
    }

    /// Source-over blend of a straight-alpha color onto one pixel.
    pub(crate) fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height || color.a <= 0.0 {
            return;
        }

        let sa = color.a.clamp(0.0, 1.0);
        let dst = self.pixel(x, y);
        let da = dst[3] as f32 / 255.0;

        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            self.set_pixel(x, y, [0; 4]);
            return;
        }

        let blend = |s: f32, d: u8| {
            let d = d as f32 / 255.0;
            let premul = s * sa + d * da * (1.0 - sa);
            ((premul / out_a).clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        };

        self.set_pixel(
            x,
            y,
            [
                blend(color.r, dst[0]),
                blend(color.g, dst[1]),
                blend(color.b, dst[2]),
                (out_a * 255.0 + 0.5) as u8,
            ],
        );
    }

    /// Builds the tint overlay for this bitmap: a destination-atop composite of
    /// a solid `tint` fill under this image drawn at 0.75 alpha.
    ///
    /// The result carries the tint's color with an alpha channel shaped by this
    /// bitmap (`alpha = src_alpha * 0.75 * tint_alpha`). Drawn on top of the
    /// original, that produces a uniform tint that preserves the original
    /// per-pixel color underneath.
    pub fn tinted(&self, tint: Color) -> Bitmap {
        let mut out = Bitmap::new(self.width, self.height);
        let tint_rgba = tint.to_rgba8();

        for y in 0..self.height {
            for x in 0..self.width {
                let src_a = self.pixel(x, y)[3] as f32 / 255.0;
                let a = src_a * 0.75 * tint.a.clamp(0.0, 1.0);
                out.set_pixel(
                    x,
                    y,
                    [
                        tint_rgba[0],
                        tint_rgba[1],
                        tint_rgba[2],
                        (a * 255.0 + 0.5) as u8,
                    ],
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn new_bitmap_is_transparent() {
        let b = Bitmap::new(2, 2);
        assert_eq!(b.pixel(0, 0), [0; 4]);
        assert_eq!(b.pixel(1, 1), [0; 4]);
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let b = Bitmap::new(2, 2);
        assert_eq!(b.pixel(5, 0), [0; 4]);
        assert_eq!(b.pixel(0, 5), [0; 4]);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut b = Bitmap::new(4, 4);
        b.set_pixel(2, 3, [10, 20, 30, 40]);
        assert_eq!(b.pixel(2, 3), [10, 20, 30, 40]);
    }

    // ── blending ──────────────────────────────────────────────────────────

    #[test]
    fn opaque_blend_replaces() {
        let mut b = Bitmap::new(1, 1);
        b.set_pixel(0, 0, [0, 0, 255, 255]);
        b.blend_pixel(0, 0, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(b.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn half_alpha_blend_mixes() {
        let mut b = Bitmap::new(1, 1);
        b.set_pixel(0, 0, [0, 0, 0, 255]);
        b.blend_pixel(0, 0, Color::new(1.0, 1.0, 1.0, 0.5));
        let [r, g, _, a] = b.pixel(0, 0);
        assert!((r as i32 - 128).abs() <= 1);
        assert!((g as i32 - 128).abs() <= 1);
        assert_eq!(a, 255);
    }

    // ── tinting ───────────────────────────────────────────────────────────

    #[test]
    fn tint_carries_color_and_shaped_alpha() {
        // Opaque source pixel, opaque red tint: overlay is red at 75% alpha.
        let mut b = Bitmap::new(2, 1);
        b.set_pixel(0, 0, [10, 200, 30, 255]);
        // (1, 0) stays transparent.

        let t = b.tinted(Color::from_rgb8(255, 0, 0));

        let [r, g, bch, a] = t.pixel(0, 0);
        assert_eq!((r, g, bch), (255, 0, 0));
        assert!((a as i32 - 191).abs() <= 1); // 0.75 * 255

        // Transparent source stays transparent in the overlay.
        assert_eq!(t.pixel(1, 0)[3], 0);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Bitmap::decode(&[0, 1, 2, 3]).is_err());
    }
}
