//! Logging utilities.
//!
//! Centralizes logger initialization. The crate itself only ever talks to the
//! `log` facade; the backend is chosen here.

mod init;

pub use init::{LoggingConfig, init_logging};
