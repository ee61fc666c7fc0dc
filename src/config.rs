//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::fmt;

use crate::cache::{EvictionPolicy, DEFAULT_MAX_ITEMS};
use crate::error::{CacheError, Result};

// == Cache Mode ==
/// Which cache the driver builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Unbounded, never evicts
    Basic,
    /// Bounded by MAX_ITEMS, evicting by the given policy
    Bounded(EvictionPolicy),
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheMode::Basic => f.write_str("BASIC"),
            CacheMode::Bounded(policy) => fmt::Display::fmt(policy, f),
        }
    }
}

impl std::str::FromStr for CacheMode {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("basic") {
            Ok(CacheMode::Basic)
        } else {
            s.parse().map(CacheMode::Bounded)
        }
    }
}

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold (MAX_ITEMS)
    pub max_items: usize,
    /// Cache kind and eviction policy
    pub mode: CacheMode,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Maximum cache entries, a positive integer (default: 4)
    /// - `CACHE_POLICY` - One of basic, fifo, lifo, lru, mru, lfu (default: lru)
    ///
    /// # Errors
    /// A set but invalid variable is rejected rather than replaced by its
    /// default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_items = match lookup("MAX_ITEMS") {
            Some(raw) => parse_max_items(&raw)?,
            None => DEFAULT_MAX_ITEMS,
        };
        let mode = match lookup("CACHE_POLICY") {
            Some(raw) => raw.parse()?,
            None => CacheMode::Bounded(EvictionPolicy::Lru),
        };

        Ok(Self { max_items, mode })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            mode: CacheMode::Bounded(EvictionPolicy::Lru),
        }
    }
}

fn parse_max_items(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CacheError::InvalidCapacity(raw.to_string())),
    }
}
