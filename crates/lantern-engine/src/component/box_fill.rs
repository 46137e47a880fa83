use crate::coords::Rect;
use crate::paint::Color;
use crate::surface::Surface;

use super::Component;

/// Fills the entity rectangle with a solid color.
#[derive(Debug, Clone)]
pub struct BoxFill {
    pub color: Color,
}

impl BoxFill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for BoxFill {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Component for BoxFill {
    fn render(&self, surface: &mut dyn Surface, rect: Rect) -> anyhow::Result<()> {
        surface.fill_rect(rect, self.color);
        Ok(())
    }
}
