use thiserror::Error;

/// Fatal setup-time failures.
///
/// These are raised synchronously from [`Game::new`](crate::game::Game::new) and
/// [`Game::resize`](crate::game::Game::resize); the runtime never starts (or never
/// resumes) past one of them. Recoverable per-frame failures travel as
/// `anyhow::Error` and are absorbed at the tick boundary instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid logical resolution {width}x{height}")]
    InvalidResolution { width: f32, height: f32 },

    #[error("drawing surface is unavailable: {0}")]
    SurfaceUnavailable(&'static str),
}
