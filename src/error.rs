//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine and its command driver.
///
/// `put` and `get` never produce one of these; absent keys and values are
/// silent no-ops. Errors only arise while building a cache or interpreting
/// driver input.
#[derive(Error, Debug)]
pub enum CacheError {
    /// MAX_ITEMS is not a positive integer
    #[error("Invalid capacity: MAX_ITEMS must be a positive integer, got '{0}'")]
    InvalidCapacity(String),

    /// Policy name does not match any supported policy
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// Driver input could not be interpreted as a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Output sink failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
