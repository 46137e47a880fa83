use super::Point;

/// Axis-aligned rectangle in logical units (top-left origin).
///
/// This is the value handed to component render calls: an entity renders its
/// components into `(0, 0, width, height)` of its own local space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the local origin with the given size.
    #[inline]
    pub const fn from_size(w: f32, h: f32) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    #[inline]
    pub const fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(self) -> Point {
        Point::new(self.w, self.h)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_sits_at_origin() {
        let r = Rect::from_size(10.0, 20.0);
        assert_eq!(r.origin(), Point::ZERO);
        assert_eq!(r.size(), Point::new(10.0, 20.0));
    }

    #[test]
    fn is_empty_zero_extent() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
