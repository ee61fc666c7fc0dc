//! Cache Module
//!
//! Provides bounded in-memory caching with FIFO, LIFO, LRU, MRU and LFU
//! eviction, plus an unbounded basic cache.

mod basic;
mod frequency;
mod listener;
mod order;
mod policy;
mod stats;
mod store;
mod traits;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use basic::BasicCache;
pub use frequency::FrequencyTable;
pub use listener::{DiscardListener, DiscardNotice, FnListener, LogListener, StdoutListener};
pub use order::{Iter as OrderIter, OrderList};
pub use policy::EvictionPolicy;
pub use stats::CacheStats;
pub use store::PolicyCache;
pub use traits::{render_contents, Cache};

// == Public Constants ==
/// Default MAX_ITEMS when none is configured
pub const DEFAULT_MAX_ITEMS: usize = 4;
