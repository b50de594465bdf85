//! # Error Handling
//!
//! Centralized error types for webcore.
//! Uses `thiserror` for ergonomic error definitions.
//!
//! Lookup misses (unknown collection, no matching record, unknown controller)
//! are never errors: they surface as `bool`, `Option` or empty results.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for webcore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for webcore
#[derive(Error, Debug)]
pub enum Error {
    /// The route declaration file could not be read
    #[error("Failed to read route file {}: {source}", .path.display())]
    RouteFileUnreadable {
        /// Path of the route file
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The backing JSON document does not exist
    #[error("Data file does not exist: {}", .path.display())]
    DataFileMissing {
        /// Path of the data file
        path: PathBuf,
    },

    /// The backing JSON document exists but cannot be opened for writing
    #[error("Data file is not writable: {}: {source}", .path.display())]
    DataFileNotWritable {
        /// Path of the data file
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The backing JSON document is not an object of arrays of flat objects
    #[error("Malformed data file {}: {reason}", .path.display())]
    MalformedDocument {
        /// Path of the data file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A thread panicked while holding the shared store lock
    #[error("Shared store lock poisoned")]
    StateLockPoisoned,
}
