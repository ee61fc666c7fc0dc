//! Policy Cache - A bounded in-memory key/value cache
//!
//! Provides FIFO, LIFO, LRU, MRU and LFU eviction behind one cache contract,
//! reporting each eviction as a `DISCARD: <key>` line.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use cache::{Cache, EvictionPolicy, PolicyCache};
pub use config::{CacheMode, Config};
pub use error::{CacheError, Result};
pub use session::Session;
