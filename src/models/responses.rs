//! Response DTOs for the cache driver
//!
//! Serialized as one JSON object per output line.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::config::{CacheMode, Config};

/// Output of the `get` command. `value` is null when the key is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResponse {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl GetResponse {
    pub fn new(key: Option<String>, value: Option<String>) -> Self {
        Self { key, value }
    }
}

/// Output of the `remove` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoveResponse {
    pub key: String,
    /// Whether the key was present
    pub removed: bool,
}

impl RemoveResponse {
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Output of the `stats` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    /// Policy name, e.g. "LRU", or "BASIC" for the unbounded cache
    pub policy: String,
    /// MAX_ITEMS; null for the unbounded cache
    pub max_items: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a StatsResponse from configuration and counters.
    pub fn new(config: &Config, stats: &CacheStats) -> Self {
        let max_items = match config.mode {
            CacheMode::Basic => None,
            CacheMode::Bounded(_) => Some(config.max_items),
        };
        Self {
            policy: config.mode.to_string(),
            max_items,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EvictionPolicy;

    #[test]
    fn test_get_response_serialize() {
        let json = serde_json::to_string(&GetResponse::new(Some("A".into()), None)).unwrap();
        assert_eq!(json, r#"{"key":"A","value":null}"#);
    }

    #[test]
    fn test_remove_response_serialize() {
        let json = serde_json::to_string(&RemoveResponse::new("A", true)).unwrap();
        assert_eq!(json, r#"{"key":"A","removed":true}"#);
    }

    #[test]
    fn test_stats_response_bounded() {
        let config = Config {
            max_items: 4,
            mode: CacheMode::Bounded(EvictionPolicy::Lfu),
        };
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.set_total_entries(4);

        let response = StatsResponse::new(&config, &stats);
        assert_eq!(response.policy, "LFU");
        assert_eq!(response.max_items, Some(4));
        assert_eq!(response.evictions, 1);
        assert_eq!(response.hit_rate, 0.5);
    }

    #[test]
    fn test_stats_response_basic() {
        let config = Config {
            max_items: 4,
            mode: CacheMode::Basic,
        };
        let response = StatsResponse::new(&config, &CacheStats::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["policy"], "BASIC");
        assert!(json["max_items"].is_null());
    }
}
