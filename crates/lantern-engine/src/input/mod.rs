//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Embedders translate window-system events into [`InputEvent`]s (see
//! [`platform`] for a ready-made winit translator) and feed them to
//! [`Game::handle_event`](crate::game::Game::handle_event).

mod bindings;
mod state;
mod types;

pub mod platform;

pub use bindings::Bindings;
pub use state::InputState;
pub use types::{InputEvent, Key};
