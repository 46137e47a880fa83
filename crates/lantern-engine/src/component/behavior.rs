use super::{Component, UpdateCtx};

/// Wraps an arbitrary per-tick callback.
///
/// Enables scripting an entity without defining a component type:
///
/// ```ignore
/// entity.attach(Behavior::new(|ctx| {
///     if ctx.input.key_down("RIGHT") {
///         ctx.entity.position.x += 120.0 * ctx.dt;
///     }
///     Ok(())
/// }));
/// ```
pub struct Behavior {
    callback: Box<dyn FnMut(&mut UpdateCtx<'_>) -> anyhow::Result<()>>,
}

impl Behavior {
    pub fn new(callback: impl FnMut(&mut UpdateCtx<'_>) -> anyhow::Result<()> + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Component for Behavior {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()> {
        (self.callback)(ctx)
    }
}
