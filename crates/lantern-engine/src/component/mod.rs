//! Component model.
//!
//! A component is a per-entity behavior or render unit. Components never hold
//! references to their entity or the runtime; instead every hook receives a
//! context view of exactly what it may touch, which is what keeps the whole
//! update path free of interior mutability.

mod behavior;
mod box_fill;
mod image;
mod text_label;

use std::any::Any;

use crate::coords::{Point, Rect};
use crate::input::InputState;
use crate::surface::Surface;

pub use behavior::Behavior;
pub use box_fill::BoxFill;
pub use image::Image;
pub use text_label::{Text, TextUpdate};

/// Mutable view of the owning entity's placement and size.
///
/// A split borrow of the entity's plain fields, handed out for the duration of
/// one hook call. Components never hold onto it.
pub struct EntityView<'a> {
    pub position: &'a mut Point,
    pub scale: &'a mut Point,
    pub width: &'a mut f32,
    pub height: &'a mut f32,
}

impl EntityView<'_> {
    /// True until either dimension has been set.
    pub fn has_no_size(&self) -> bool {
        *self.width == 0.0 && *self.height == 0.0
    }
}

/// Per-tick context for [`Component::update`].
pub struct UpdateCtx<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub input: &'a InputState,
    pub entity: EntityView<'a>,
    pub(crate) scene_updated: &'a mut bool,
}

impl UpdateCtx<'_> {
    /// Marks the owning scene dirty so the next frame re-renders even if the
    /// state's update signalled "nothing changed".
    pub fn mark_scene_updated(&mut self) {
        *self.scene_updated = true;
    }
}

/// Behavior/render unit attached to an entity.
///
/// All hooks default to no-ops; implement only what the component needs.
/// `update` and `render` may fail — an error escaping either is caught at the
/// frame-loop boundary, logged, and pauses the runtime.
pub trait Component: Any {
    /// Called once when the component is attached to an entity.
    fn init(&mut self, entity: &mut EntityView<'_>) {
        let _ = entity;
    }

    /// Called at most once per tick (guarded by the scene's update generation).
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Draws into `rect`, the entity-local rectangle `(0, 0, width, height)`
    /// unless the caller overrode it.
    fn render(&self, surface: &mut dyn Surface, rect: Rect) -> anyhow::Result<()> {
        let _ = (surface, rect);
        Ok(())
    }
}
