//! # Logging
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it more than once is
/// harmless: only the first subscriber is installed. Returns whether this
/// call installed it.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Initialize tracing with JSON-formatted output
///
/// Same filtering rules as [`init_tracing`].
pub fn init_json_tracing() -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
