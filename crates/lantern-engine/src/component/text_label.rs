use std::sync::Arc;

use crate::assets::Bitmap;
use crate::coords::Rect;
use crate::paint::Color;
use crate::surface::Surface;
use crate::text;

use super::{Component, UpdateCtx};

/// Partial restyle for [`Text::set`]. `None` fields keep their current value.
#[derive(Default)]
pub struct TextUpdate {
    pub font: Option<Arc<fontdue::Font>>,
    pub px: Option<f32>,
    pub text: Option<String>,
    pub color: Option<Color>,
}

/// Renders a line of text from a cached raster.
///
/// The raster is rebuilt lazily on the next update after any restyle, at which
/// point the entity adopts the measured text size and the scene is marked
/// dirty. The cache height leaves headroom above and below the em square for
/// ascenders and descenders.
pub struct Text {
    font: Arc<fontdue::Font>,
    px: f32,
    content: String,
    color: Color,
    pub opacity: f32,
    cache: Option<Bitmap>,
    dirty: bool,
}

impl Text {
    pub fn new(font: Arc<fontdue::Font>, content: impl Into<String>) -> Self {
        Self {
            font,
            px: 32.0,
            content: content.into(),
            color: Color::WHITE,
            opacity: 1.0,
            cache: None,
            dirty: true,
        }
    }

    pub fn with_px(mut self, px: f32) -> Self {
        self.px = px;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Applies a partial restyle; the raster rebuilds on the next tick.
    pub fn set(&mut self, update: TextUpdate) {
        if let Some(font) = update.font {
            self.font = font;
        }
        if let Some(px) = update.px {
            self.px = px;
        }
        if let Some(text) = update.text {
            self.content = text;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        self.cache = None;
        self.dirty = true;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn rebuild(&mut self, ctx: &mut UpdateCtx<'_>) {
        let width = text::measure(&self.font, &self.content, self.px).ceil();
        let height = (self.px * 5.0 / 3.0).ceil();

        let mut raster = Bitmap::new(width as u32, height as u32);
        text::raster_into(
            &mut raster,
            &self.font,
            &self.content,
            self.px,
            self.color,
            0.0,
            0.0,
        );

        *ctx.entity.width = width;
        *ctx.entity.height = height;
        self.cache = Some(raster);
        self.dirty = false;
        ctx.mark_scene_updated();
    }
}

impl Component for Text {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()> {
        if self.dirty {
            self.rebuild(ctx);
        }
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface, rect: Rect) -> anyhow::Result<()> {
        if let Some(cache) = &self.cache {
            surface.draw_bitmap(cache, rect, self.opacity);
        }
        Ok(())
    }
}
