//! Lantern engine crate.
//!
//! A minimal 2D game runtime: a frame loop, a state (scene) lifecycle, and an
//! entity/component model, layered over an abstract drawing surface and
//! platform-agnostic input.
//!
//! The crate owns no window and no GPU pipeline. Embedders drive it:
//! - translate platform events into [`input::InputEvent`]s (a ready-made
//!   translator for winit lives in `input::platform`)
//! - feed them to [`game::Game::handle_event`]
//! - call [`game::Game::tick`] once per host frame callback with a
//!   [`surface::Surface`] implementation

pub mod assets;
pub mod component;
pub mod coords;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod state;
pub mod surface;
pub mod text;
pub mod time;

pub use component::{Behavior, BoxFill, Component, EntityView, Image, Text, TextUpdate, UpdateCtx};
pub use coords::{Point, Rect};
pub use error::EngineError;
pub use game::{Game, GameConfig};
pub use paint::Color;
pub use scene::{Blueprint, Entity, EntityId, Scene, Tick};
pub use state::{EmptyState, State};
pub use surface::Surface;
