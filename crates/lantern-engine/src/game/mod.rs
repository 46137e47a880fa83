//! The frame-loop runtime.
//!
//! [`Game`] owns the active [`State`], its [`Scene`], the input tables, and
//! the frame clock. The embedder owns the actual loop: it forwards window
//! events through [`Game::handle_event`] and calls [`Game::tick`] once per
//! host frame. While paused, ticks are no-ops.

use std::time::{Duration, Instant};

use crate::coords::{Point, Rect};
use crate::error::EngineError;
use crate::input::{Bindings, InputEvent, InputState};
use crate::scene::{Scene, Tick};
use crate::state::State;
use crate::surface::Surface;
use crate::time::TickClock;

/// Construction parameters for [`Game::new`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Virtual width the game is authored at, in logical units.
    pub logical_width: f32,
    pub logical_height: f32,
    pub bindings: Bindings,
    /// Frame deltas above this are treated as stalls and skipped.
    pub stall_limit: Duration,
    /// Pointer press/release within this logical distance counts as a click
    /// rather than a drag.
    pub click_slop: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            logical_width: 800.0,
            logical_height: 600.0,
            bindings: Bindings::new(),
            stall_limit: Duration::from_millis(200),
            click_slop: 2.0,
        }
    }
}

/// The engine runtime. One per drawing surface.
pub struct Game {
    width: f32,
    height: f32,
    /// Device pixels per logical unit, per axis. Changes only in
    /// [`resize`](Self::resize).
    scale: Point,
    surface_size: (u32, u32),
    input: InputState,
    state: Box<dyn State>,
    scene: Scene,
    running: bool,
    clock: TickClock,
    /// Logical position of the last pointer press, while the button is held.
    drag_origin: Option<Point>,
    click_slop: f32,
}

impl Game {
    /// Binds the logical resolution to the surface and activates the initial
    /// state. The surface is sized to its current device dimensions via an
    /// initial [`resize`](Self::resize).
    ///
    /// The runtime starts paused; call [`run`](Self::run).
    pub fn new(
        surface: &mut dyn Surface,
        state: Box<dyn State>,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        let GameConfig {
            logical_width,
            logical_height,
            bindings,
            stall_limit,
            click_slop,
        } = config;

        if !logical_width.is_finite()
            || !logical_height.is_finite()
            || logical_width <= 0.0
            || logical_height <= 0.0
        {
            return Err(EngineError::InvalidResolution {
                width: logical_width,
                height: logical_height,
            });
        }

        let (device_w, device_h) = surface.device_size();
        if device_w == 0 || device_h == 0 {
            return Err(EngineError::SurfaceUnavailable("surface has zero size"));
        }

        let mut game = Self {
            width: logical_width,
            height: logical_height,
            scale: Point::ONE,
            surface_size: (device_w, device_h),
            input: InputState::new(bindings),
            state,
            scene: Scene::new(),
            running: false,
            clock: TickClock::with_stall_limit(stall_limit),
            drag_origin: None,
            click_slop,
        };
        game.resize(surface, device_w as f32, device_h as f32)?;

        let Game { state, scene, .. } = &mut game;
        state.init(scene);

        log::info!(
            "runtime initialized: {logical_width}x{logical_height} logical on {}x{} device",
            game.surface_size.0,
            game.surface_size.1
        );
        Ok(game)
    }

    // ── surface geometry ──────────────────────────────────────────────────

    /// Fits the surface into `avail_w` x `avail_h` without distorting the
    /// logical aspect ratio: fit by width first, fall back to fitting by
    /// height (letterboxing). Recomputes the scale factor and forces the
    /// next frame to redraw.
    pub fn resize(
        &mut self,
        surface: &mut dyn Surface,
        avail_w: f32,
        avail_h: f32,
    ) -> Result<(), EngineError> {
        if !avail_w.is_finite() || !avail_h.is_finite() || avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(EngineError::InvalidResolution {
                width: avail_w,
                height: avail_h,
            });
        }

        let mut w = avail_w;
        let mut h = avail_w * self.height / self.width;
        if h > avail_h {
            h = avail_h;
            w = avail_h * self.width / self.height;
        }

        let (w, h) = (w.floor().max(1.0) as u32, h.floor().max(1.0) as u32);
        surface.set_device_size(w, h);
        self.surface_size = (w, h);
        self.scale = Point::new(w as f32 / self.width, h as f32 / self.height);
        self.scene.has_rendered = false;

        log::debug!("surface resized to {w}x{h}, scale ({}, {})", self.scale.x, self.scale.y);
        Ok(())
    }

    /// Maps device pixel coordinates (relative to the surface) into logical
    /// coordinates, floored to whole units.
    pub fn canvas_coords(&self, device: Point) -> Point {
        let (sw, sh) = self.surface_size;
        Point::new(
            device.x * self.width / sw as f32,
            device.y * self.height / sh as f32,
        )
        .floored()
    }

    // ── state lifecycle ───────────────────────────────────────────────────

    /// Swaps in a new state: the old state and its whole scene are dropped,
    /// held keys and any drag in progress are cleared, and the new state's
    /// `init` hook runs against a fresh scene.
    pub fn set_state(&mut self, state: Box<dyn State>) {
        self.scene = Scene::new();
        self.input.clear_pressed();
        self.drag_origin = None;
        self.state = state;

        let Game { state, scene, .. } = self;
        state.init(scene);
    }

    /// Starts frame processing. Resets the clock baseline so time spent
    /// paused is not simulated.
    pub fn run(&mut self) {
        self.running = true;
        self.clock.reset();
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── frame loop ────────────────────────────────────────────────────────

    /// One frame: update, then render when dirty. No-op while paused.
    ///
    /// A frame delta above the stall limit skips the whole tick — the clock
    /// still advances, so a backgrounded host does not produce one giant
    /// simulated step on resume. Errors escaping the state are logged and
    /// pause the runtime; nothing propagates to the embedder.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.tick_at(surface, Instant::now());
    }

    pub(crate) fn tick_at(&mut self, surface: &mut dyn Surface, now: Instant) {
        if !self.running {
            return;
        }
        let Some(dt) = self.clock.tick_at(now) else {
            log::debug!("frame stall detected, skipping tick");
            return;
        };
        if let Err(err) = self.step(surface, dt) {
            log::error!("state update/render failed, pausing: {err:#}");
            self.running = false;
        }
    }

    fn step(&mut self, surface: &mut dyn Surface, dt: f32) -> anyhow::Result<()> {
        let scale = self.scale;
        let (width, height) = (self.width, self.height);
        let Game {
            state,
            scene,
            input,
            ..
        } = self;

        let tick = Tick { dt, input };
        let skip = state.update(scene, &tick)?;

        // Inverted polarity by contract: `skip == true` means the state saw
        // no changes. The scene flag and the first frame override it.
        let dirty = !skip || scene.updated;
        scene.updated = false;

        if dirty || !scene.has_rendered {
            render_frame(state.as_mut(), scene, surface, scale, width, height)?;
            scene.has_rendered = true;
        }
        Ok(())
    }

    /// Unconditional redraw outside the tick cycle.
    pub fn render(&mut self, surface: &mut dyn Surface) -> anyhow::Result<()> {
        let scale = self.scale;
        let (width, height) = (self.width, self.height);
        let Game { state, scene, .. } = self;

        render_frame(state.as_mut(), scene, surface, scale, width, height)?;
        scene.has_rendered = true;
        Ok(())
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Feeds one translated platform event into the runtime, dispatching
    /// state hooks as needed. Pointer coordinates arrive in device pixels
    /// and reach the state in logical units.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => self.input.press(key),

            InputEvent::KeyReleased(key) => {
                self.input.release(key);
                let action = self.input.bindings().action_for(key).map(str::to_owned);
                if let Some(action) = action {
                    let Game { state, scene, .. } = self;
                    state.on_key(scene, &action);
                }
            }

            InputEvent::PointerPressed { x, y } => {
                let pos = self.canvas_coords(Point::new(x, y));
                self.drag_origin = Some(pos);
                let Game { state, scene, .. } = self;
                state.drag_start(scene, pos);
            }

            InputEvent::PointerMoved { x, y } => {
                if self.drag_origin.is_some() {
                    let pos = self.canvas_coords(Point::new(x, y));
                    let Game { state, scene, .. } = self;
                    state.drag(scene, pos);
                }
            }

            InputEvent::PointerReleased { x, y } => {
                let Some(origin) = self.drag_origin.take() else {
                    return;
                };
                let pos = self.canvas_coords(Point::new(x, y));
                let slop = self.click_slop;
                let Game { state, scene, .. } = self;
                if (pos - origin).length() <= slop {
                    state.click(scene, pos);
                } else {
                    state.drag_end(scene, pos);
                }
            }
        }
    }

    /// True while the key bound to `action` is held.
    pub fn key_down(&self, action: &str) -> bool {
        self.input.key_down(action)
    }

    pub fn any_down<'a>(&self, actions: impl IntoIterator<Item = &'a str>) -> bool {
        self.input.any_down(actions)
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn scale_factor(&self) -> Point {
        self.scale
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Draws one frame: scale to device, clear (unless suppressed), delegate to
/// the state. The transform save/restore is paired even when the state's
/// render fails.
fn render_frame(
    state: &mut dyn State,
    scene: &mut Scene,
    surface: &mut dyn Surface,
    scale: Point,
    width: f32,
    height: f32,
) -> anyhow::Result<()> {
    surface.save();
    let result = (|| {
        surface.scale(scale);
        if !scene.stop_clear {
            surface.clear_rect(Rect::from_size(width, height));
        }
        state.render(scene, surface)
    })();
    surface.restore();
    result
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::assets::Bitmap;
    use crate::input::Key;
    use crate::surface::{TextMetrics, TextStyle};

    // ── test doubles ──────────────────────────────────────────────────────

    /// Surface that records call counts instead of drawing.
    #[derive(Debug)]
    struct RecordingSurface {
        size: (u32, u32),
        saves: u32,
        restores: u32,
        clears: u32,
    }

    impl RecordingSurface {
        fn new(w: u32, h: u32) -> Self {
            Self {
                size: (w, h),
                saves: 0,
                restores: 0,
                clears: 0,
            }
        }
    }

    impl Surface for RecordingSurface {
        fn save(&mut self) {
            self.saves += 1;
        }
        fn restore(&mut self) {
            self.restores += 1;
        }
        fn translate(&mut self, _offset: Point) {}
        fn scale(&mut self, _factor: Point) {}
        fn clear_rect(&mut self, _rect: Rect) {
            self.clears += 1;
        }
        fn fill_rect(&mut self, _rect: Rect, _color: crate::paint::Color) {}
        fn draw_bitmap(&mut self, _bitmap: &Bitmap, _dst: Rect, _opacity: f32) {}
        fn fill_text(&mut self, _text: &str, _style: &TextStyle, _origin: Point) {}
        fn measure_text(&mut self, _text: &str, _style: &TextStyle) -> TextMetrics {
            TextMetrics::default()
        }
        fn device_size(&self) -> (u32, u32) {
            self.size
        }
        fn set_device_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    /// State that records hook invocations and can report "nothing changed".
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
        skip_render: bool,
    }

    impl Recorder {
        fn new(events: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                events: Rc::clone(events),
                skip_render: false,
            }
        }

        fn quiet(events: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                events: Rc::clone(events),
                skip_render: true,
            }
        }

        fn log(&self, entry: impl Into<String>) {
            self.events.borrow_mut().push(entry.into());
        }
    }

    impl State for Recorder {
        fn init(&mut self, _scene: &mut Scene) {
            self.log("init");
        }

        fn update(&mut self, scene: &mut Scene, tick: &Tick<'_>) -> anyhow::Result<bool> {
            scene.update_all(tick)?;
            Ok(self.skip_render)
        }

        fn render(&mut self, scene: &mut Scene, surface: &mut dyn Surface) -> anyhow::Result<()> {
            self.log("render");
            scene.render_all(surface)
        }

        fn on_key(&mut self, _scene: &mut Scene, action: &str) {
            self.log(format!("key:{action}"));
        }

        fn click(&mut self, _scene: &mut Scene, pos: Point) {
            self.log(format!("click:{},{}", pos.x, pos.y));
        }

        fn drag_start(&mut self, _scene: &mut Scene, pos: Point) {
            self.log(format!("drag_start:{},{}", pos.x, pos.y));
        }

        fn drag(&mut self, _scene: &mut Scene, pos: Point) {
            self.log(format!("drag:{},{}", pos.x, pos.y));
        }

        fn drag_end(&mut self, _scene: &mut Scene, pos: Point) {
            self.log(format!("drag_end:{},{}", pos.x, pos.y));
        }
    }

    fn config_100() -> GameConfig {
        GameConfig {
            logical_width: 100.0,
            logical_height: 100.0,
            bindings: Bindings::new().with("UP", Key::ArrowUp),
            ..GameConfig::default()
        }
    }

    fn game_on(surface: &mut RecordingSurface) -> (Game, Rc<RefCell<Vec<String>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let game = Game::new(surface, Box::new(Recorder::new(&events)), config_100()).unwrap();
        (game, events)
    }

    fn events_of(events: &Rc<RefCell<Vec<String>>>) -> Vec<String> {
        events.borrow().clone()
    }

    // ── construction & resize ─────────────────────────────────────────────

    #[test]
    fn rejects_bad_logical_resolution() {
        let mut surface = RecordingSurface::new(100, 100);
        let config = GameConfig {
            logical_width: 0.0,
            ..config_100()
        };
        let result = Game::new(&mut surface, Box::new(crate::state::EmptyState), config);
        assert!(matches!(result, Err(EngineError::InvalidResolution { .. })));
    }

    #[test]
    fn rejects_zero_sized_surface() {
        let mut surface = RecordingSurface::new(0, 100);
        let result = Game::new(&mut surface, Box::new(crate::state::EmptyState), config_100());
        assert!(matches!(result, Err(EngineError::SurfaceUnavailable(_))));
    }

    #[test]
    fn init_hook_runs_once_on_construction() {
        let mut surface = RecordingSurface::new(200, 200);
        let (_game, events) = game_on(&mut surface);
        assert_eq!(events_of(&events), vec!["init"]);
    }

    #[test]
    fn resize_letterboxes_wide_areas_by_height() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, _) = game_on(&mut surface);

        game.resize(&mut surface, 400.0, 300.0).unwrap();
        assert_eq!(game.surface_size(), (300, 300));
        assert_eq!(game.scale_factor(), Point::splat(3.0));
    }

    #[test]
    fn resize_letterboxes_tall_areas_by_width() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, _) = game_on(&mut surface);

        game.resize(&mut surface, 300.0, 400.0).unwrap();
        assert_eq!(game.surface_size(), (300, 300));
    }

    #[test]
    fn resize_preserves_aspect_ratio() {
        let mut surface = RecordingSurface::new(100, 100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let config = GameConfig {
            logical_width: 160.0,
            logical_height: 90.0,
            ..GameConfig::default()
        };
        let mut game = Game::new(&mut surface, Box::new(Recorder::new(&events)), config).unwrap();

        game.resize(&mut surface, 777.0, 505.0).unwrap();
        let (w, h) = game.surface_size();
        let ratio = w as f32 / h as f32;
        assert!((ratio - 160.0 / 90.0).abs() < 0.02);
    }

    #[test]
    fn canvas_coords_inverts_the_scale_mapping() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, _) = game_on(&mut surface);
        game.resize(&mut surface, 300.0, 300.0).unwrap();

        // Logical (17, 42) through the scale factor and back.
        let logical = Point::new(17.0, 42.0);
        let device = logical * game.scale_factor();
        assert_eq!(game.canvas_coords(device), logical);
    }

    // ── keyboard dispatch ─────────────────────────────────────────────────

    #[test]
    fn key_press_release_round_trip() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        game.handle_event(InputEvent::KeyPressed(Key::ArrowUp));
        assert!(game.key_down("UP"));

        game.handle_event(InputEvent::KeyReleased(Key::ArrowUp));
        assert!(!game.key_down("UP"));

        let keys: Vec<_> = events_of(&events)
            .into_iter()
            .filter(|e| e.starts_with("key:"))
            .collect();
        assert_eq!(keys, vec!["key:UP"]);
    }

    #[test]
    fn unbound_keys_do_not_dispatch() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        game.handle_event(InputEvent::KeyPressed(Key::X));
        game.handle_event(InputEvent::KeyReleased(Key::X));
        assert!(!events_of(&events).iter().any(|e| e.starts_with("key:")));
    }

    // ── pointer dispatch ──────────────────────────────────────────────────

    #[test]
    fn press_release_within_slop_is_a_click() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);
        game.resize(&mut surface, 200.0, 200.0).unwrap(); // scale 2

        game.handle_event(InputEvent::PointerPressed { x: 20.0, y: 20.0 });
        game.handle_event(InputEvent::PointerReleased { x: 22.0, y: 22.0 });

        let events = events_of(&events);
        assert!(events.contains(&"drag_start:10,10".to_string()));
        assert!(events.contains(&"click:11,11".to_string()));
        assert!(!events.iter().any(|e| e.starts_with("drag_end")));
    }

    #[test]
    fn press_move_release_beyond_slop_is_a_drag() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);
        game.resize(&mut surface, 200.0, 200.0).unwrap();

        game.handle_event(InputEvent::PointerPressed { x: 20.0, y: 20.0 });
        game.handle_event(InputEvent::PointerMoved { x: 60.0, y: 20.0 });
        game.handle_event(InputEvent::PointerReleased { x: 80.0, y: 20.0 });

        let events = events_of(&events);
        assert!(events.contains(&"drag:30,10".to_string()));
        assert!(events.contains(&"drag_end:40,10".to_string()));
        assert!(!events.iter().any(|e| e.starts_with("click")));
    }

    #[test]
    fn moves_without_a_press_are_ignored() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        game.handle_event(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        game.handle_event(InputEvent::PointerReleased { x: 10.0, y: 10.0 });
        assert!(!events_of(&events).iter().any(|e| e.starts_with("drag")));
    }

    // ── frame loop ────────────────────────────────────────────────────────

    fn run_and_tick(game: &mut Game, surface: &mut RecordingSurface, frames: u32) {
        game.run();
        let base = Instant::now();
        for i in 1..=frames {
            game.tick_at(surface, base + Duration::from_millis(16 * i as u64));
        }
    }

    #[test]
    fn paused_runtime_ignores_ticks() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        game.tick(&mut surface);
        assert!(!events_of(&events).contains(&"render".to_string()));
    }

    #[test]
    fn default_polarity_renders_every_tick() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        run_and_tick(&mut game, &mut surface, 3);
        let renders = events_of(&events).iter().filter(|e| *e == "render").count();
        assert_eq!(renders, 3);
    }

    #[test]
    fn quiet_state_renders_only_the_first_frame() {
        let mut surface = RecordingSurface::new(100, 100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game =
            Game::new(&mut surface, Box::new(Recorder::quiet(&events)), config_100()).unwrap();

        run_and_tick(&mut game, &mut surface, 3);
        let renders = events_of(&events).iter().filter(|e| *e == "render").count();
        assert_eq!(renders, 1);
    }

    #[test]
    fn scene_updated_flag_overrides_a_quiet_state() {
        let mut surface = RecordingSurface::new(100, 100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game =
            Game::new(&mut surface, Box::new(Recorder::quiet(&events)), config_100()).unwrap();

        run_and_tick(&mut game, &mut surface, 2);
        assert_eq!(events_of(&events).iter().filter(|e| *e == "render").count(), 1);

        // A component-style dirty mark forces exactly one extra render.
        game.scene_mut().updated = true;
        let base = Instant::now();
        game.tick_at(&mut surface, base + Duration::from_millis(16));
        game.tick_at(&mut surface, base + Duration::from_millis(32));
        assert_eq!(events_of(&events).iter().filter(|e| *e == "render").count(), 2);
    }

    #[test]
    fn stalled_frame_is_skipped_and_the_clock_advances() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);

        game.run();
        let base = Instant::now();

        // 300 ms > the 200 ms stall limit: the whole tick is skipped.
        game.tick_at(&mut surface, base + Duration::from_millis(300));
        assert!(events_of(&events).iter().all(|e| e != "render"));

        // The baseline moved to the stall point; the next frame is normal.
        game.tick_at(&mut surface, base + Duration::from_millis(316));
        assert_eq!(events_of(&events).iter().filter(|e| *e == "render").count(), 1);
    }

    #[test]
    fn failing_update_pauses_instead_of_crashing() {
        struct Exploding;
        impl State for Exploding {
            fn update(&mut self, _scene: &mut Scene, _tick: &Tick<'_>) -> anyhow::Result<bool> {
                anyhow::bail!("update exploded")
            }
        }

        let mut surface = RecordingSurface::new(100, 100);
        let mut game = Game::new(&mut surface, Box::new(Exploding), config_100()).unwrap();

        game.run();
        assert!(game.is_running());
        let base = Instant::now();
        game.tick_at(&mut surface, base + Duration::from_millis(16));
        assert!(!game.is_running());
    }

    #[test]
    fn save_restore_stays_paired_when_render_fails() {
        struct BadRender;
        impl State for BadRender {
            fn render(
                &mut self,
                _scene: &mut Scene,
                _surface: &mut dyn Surface,
            ) -> anyhow::Result<()> {
                anyhow::bail!("render exploded")
            }
        }

        let mut surface = RecordingSurface::new(100, 100);
        let mut game = Game::new(&mut surface, Box::new(BadRender), config_100()).unwrap();

        game.run();
        let base = Instant::now();
        game.tick_at(&mut surface, base + Duration::from_millis(16));

        assert!(!game.is_running());
        assert_eq!(surface.saves, surface.restores);
    }

    #[test]
    fn stop_clear_suppresses_the_per_frame_clear() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, _) = game_on(&mut surface);

        game.scene_mut().stop_clear = true;
        run_and_tick(&mut game, &mut surface, 1);
        assert_eq!(surface.clears, 0);

        game.scene_mut().stop_clear = false;
        let base = Instant::now();
        game.tick_at(&mut surface, base + Duration::from_millis(16));
        assert_eq!(surface.clears, 1);
    }

    // ── state switching ───────────────────────────────────────────────────

    #[test]
    fn set_state_resets_input_and_scene() {
        let mut surface = RecordingSurface::new(100, 100);
        let (mut game, events) = game_on(&mut surface);
        game.scene_mut().add(crate::scene::Entity::new());

        game.handle_event(InputEvent::KeyPressed(Key::ArrowUp));
        assert!(game.key_down("UP"));

        game.set_state(Box::new(Recorder::new(&events)));
        assert!(!game.key_down("UP"));
        assert!(game.scene().is_empty());
        assert_eq!(
            events_of(&events).iter().filter(|e| *e == "init").count(),
            2
        );
    }

    #[test]
    fn fresh_state_renders_even_when_quiet() {
        let mut surface = RecordingSurface::new(100, 100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game =
            Game::new(&mut surface, Box::new(Recorder::quiet(&events)), config_100()).unwrap();

        run_and_tick(&mut game, &mut surface, 2);
        game.set_state(Box::new(Recorder::quiet(&events)));

        let base = Instant::now();
        game.tick_at(&mut surface, base + Duration::from_millis(16));
        game.tick_at(&mut surface, base + Duration::from_millis(32));

        // One render per state activation, none after.
        assert_eq!(events_of(&events).iter().filter(|e| *e == "render").count(), 2);
    }
}
