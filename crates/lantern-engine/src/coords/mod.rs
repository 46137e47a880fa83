//! Coordinate types.
//!
//! Everything here lives in logical units: the fixed virtual resolution the game
//! is authored at, independent of the actual surface size.

mod point;
mod rect;

pub use point::Point;
pub use rect::Rect;
