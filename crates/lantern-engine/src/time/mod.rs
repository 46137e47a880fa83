//! Frame timing.
//!
//! One [`TickClock`] per runtime; call [`TickClock::tick`] once per host frame
//! callback. The clock owns the stall guard: a delta above the stall limit is
//! swallowed (returning `None`) rather than clamped, so a backgrounded or
//! debugger-paused process never feeds a huge simulated step into game logic.

mod tick_clock;

pub use tick_clock::TickClock;
