//! Scene lifecycle hooks.

use crate::coords::Point;
use crate::scene::{Scene, Tick};
use crate::surface::Surface;

/// A scene controller: one active per [`Game`](crate::game::Game).
///
/// The runtime owns the state and its [`Scene`] and calls the hooks in a
/// fixed order per tick: `update`, then (when dirty) `render`. Input hooks
/// fire between ticks as events arrive.
///
/// All hooks default to the plain entity traversal, so a state that is
/// nothing but entities needs no overrides.
pub trait State {
    /// Runs once when the state becomes active, with its fresh scene.
    fn init(&mut self, scene: &mut Scene) {
        let _ = scene;
    }

    /// Per-tick simulation step.
    ///
    /// The return value is a skip-render signal with inverted polarity,
    /// preserved deliberately: `Ok(true)` means "nothing changed, skip
    /// rendering this frame"; `Ok(false)` requests a redraw. The runtime
    /// still redraws a `true` frame if the scene's own `updated` flag was
    /// set or nothing has been rendered yet.
    fn update(&mut self, scene: &mut Scene, tick: &Tick<'_>) -> anyhow::Result<bool> {
        scene.update_all(tick)?;
        Ok(false)
    }

    /// Draws the frame. The runtime has already applied the logical→device
    /// scale and cleared the surface (unless `scene.stop_clear` is set).
    fn render(&mut self, scene: &mut Scene, surface: &mut dyn Surface) -> anyhow::Result<()> {
        scene.render_all(surface)
    }

    /// Fires once per key release, with the bound action name.
    fn on_key(&mut self, scene: &mut Scene, action: &str) {
        let _ = (scene, action);
    }

    /// Press and release landed within the click slop. `pos` is in logical
    /// coordinates.
    fn click(&mut self, scene: &mut Scene, pos: Point) {
        let _ = (scene, pos);
    }

    fn drag_start(&mut self, scene: &mut Scene, pos: Point) {
        let _ = (scene, pos);
    }

    fn drag(&mut self, scene: &mut Scene, pos: Point) {
        let _ = (scene, pos);
    }

    /// The pointer was released after moving beyond the click slop.
    fn drag_end(&mut self, scene: &mut Scene, pos: Point) {
        let _ = (scene, pos);
    }
}

/// A state with no behavior of its own; renders whatever is in the scene.
#[derive(Debug, Default)]
pub struct EmptyState;

impl State for EmptyState {}
