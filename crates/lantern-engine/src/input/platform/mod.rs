//! Platform event translators.
//!
//! Each submodule turns one window system's events into engine
//! [`InputEvent`](super::InputEvent)s. Platform types stop here; nothing else
//! in the crate imports them.

pub mod winit;
