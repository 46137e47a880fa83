use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;

use thiserror::Error;

use super::Bitmap;

/// Failure of a single asset load attempt.
///
/// Handled locally by the owning component (placeholder fallback); never
/// surfaces at the frame loop.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Handle to an image decode that may still be in flight.
///
/// The decode runs on a background thread; [`poll`](Self::poll) never blocks.
/// Dropping the handle abandons the result (the worker finishes and its send
/// fails silently) — pausing the runtime does not cancel loads.
#[derive(Debug)]
pub struct PendingImage {
    rx: Receiver<Result<Bitmap, LoadError>>,
}

impl PendingImage {
    /// Reads and decodes `path` off-thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let result = std::fs::read(&path)
                .map_err(LoadError::from)
                .and_then(|bytes| Bitmap::decode(&bytes));
            // Receiver may be gone if the component was dropped mid-load.
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// An already-completed load. Useful for tests and pre-decoded assets.
    pub fn ready(bitmap: Bitmap) -> Self {
        let (tx, rx) = channel();
        let _ = tx.send(Ok(bitmap));
        Self { rx }
    }

    /// An already-failed load.
    pub fn failed(err: LoadError) -> Self {
        let (tx, rx) = channel();
        let _ = tx.send(Err(err));
        Self { rx }
    }

    /// Non-blocking completion check. Returns `None` while the decode is still
    /// running (or if the worker vanished — treated as never-completing).
    pub fn poll(&self) -> Option<Result<Bitmap, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Convenience wrapper over [`PendingImage::spawn`].
pub fn load_image(path: impl Into<PathBuf>) -> PendingImage {
    PendingImage::spawn(path.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_completes_on_first_poll() {
        let pending = PendingImage::ready(Bitmap::new(2, 3));
        let bitmap = pending.poll().unwrap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (2, 3));

        // Result is consumed; further polls stay empty.
        assert!(pending.poll().is_none());
    }

    #[test]
    fn failed_surfaces_the_error() {
        let pending = PendingImage::failed(LoadError::Io(std::io::Error::other("boom")));
        assert!(pending.poll().unwrap().is_err());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let pending = PendingImage::spawn(PathBuf::from("/definitely/not/here.png"));
        // The worker thread is quick, but poll without assuming timing.
        let result = loop {
            if let Some(r) = pending.poll() {
                break r;
            }
            std::thread::yield_now();
        };
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
