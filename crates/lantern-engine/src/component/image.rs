use std::path::PathBuf;

use crate::assets::{Bitmap, PendingImage};
use crate::coords::Rect;
use crate::paint::Color;
use crate::surface::Surface;

use super::{Component, UpdateCtx};

enum Slot {
    /// No bitmap — either nothing was requested yet, or a load failed and the
    /// component fell back to a blank placeholder.
    Empty,
    Pending(PendingImage),
    Ready(Bitmap),
}

/// Draws a bitmap stretched over the entity rectangle.
///
/// Loads complete asynchronously; until then the component draws nothing. On
/// the tick a load finishes, an entity that still has no size adopts the
/// bitmap's dimensions and the scene is marked dirty so the frame re-renders.
/// A failed load logs a warning and leaves a blank placeholder.
pub struct Image {
    slot: Slot,
    tint: Option<Color>,
    tinted: Option<Bitmap>,
    pub opacity: f32,
    on_load: Option<Box<dyn FnMut(&Bitmap)>>,
}

impl Image {
    /// Starts an asynchronous load from `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        Self::from_pending(PendingImage::spawn(path.into()))
    }

    /// Uses an already-decoded bitmap. Size adoption and the load callback
    /// still run on the first update.
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Self::from_pending(PendingImage::ready(bitmap))
    }

    pub fn from_pending(pending: PendingImage) -> Self {
        Self {
            slot: Slot::Pending(pending),
            tint: None,
            tinted: None,
            opacity: 1.0,
            on_load: None,
        }
    }

    /// Overlays a uniform tint on top of the bitmap.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Runs once when the bitmap becomes available.
    pub fn on_load(mut self, callback: impl FnMut(&Bitmap) + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// The decoded bitmap, if the load has completed successfully.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.slot {
            Slot::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

impl Component for Image {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()> {
        let Slot::Pending(pending) = &self.slot else {
            return Ok(());
        };
        let Some(result) = pending.poll() else {
            return Ok(());
        };

        match result {
            Ok(bitmap) => {
                if ctx.entity.has_no_size() {
                    *ctx.entity.width = bitmap.width() as f32;
                    *ctx.entity.height = bitmap.height() as f32;
                }
                if let Some(tint) = self.tint {
                    self.tinted = Some(bitmap.tinted(tint));
                }
                if let Some(callback) = &mut self.on_load {
                    callback(&bitmap);
                }
                self.slot = Slot::Ready(bitmap);
            }
            Err(err) => {
                log::warn!("image load failed, using blank placeholder: {err}");
                self.slot = Slot::Empty;
            }
        }

        ctx.mark_scene_updated();
        Ok(())
    }

    fn render(&self, surface: &mut dyn Surface, rect: Rect) -> anyhow::Result<()> {
        let Slot::Ready(bitmap) = &self.slot else {
            return Ok(());
        };

        surface.draw_bitmap(bitmap, rect, self.opacity);
        if let Some(overlay) = &self.tinted {
            surface.draw_bitmap(overlay, rect, self.opacity);
        }
        Ok(())
    }
}
