//! Bitmap assets and asynchronous image loading.
//!
//! Loading is fire-and-forget: a decode runs on a background thread and the
//! result travels over a channel. Nothing in the frame loop blocks on it; the
//! owning component polls once per tick and picks the result up on the first
//! tick after completion. A load that never completes simply leaves the
//! component in its placeholder state — there are no retries and no timeouts.

mod bitmap;
mod loader;

pub use bitmap::Bitmap;
pub use loader::{LoadError, PendingImage, load_image};
