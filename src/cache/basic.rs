//! Basic Cache Module
//!
//! Unbounded cache with the same put/get contract and no eviction.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{Cache, CacheStats};

// == Basic Cache ==
/// A plain mapping: never evicts, never emits a discard notification.
#[derive(Debug)]
pub struct BasicCache<K, V> {
    entries: HashMap<K, V>,
    stats: CacheStats,
}

impl<K, V> Default for BasicCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }
}

impl<K: Hash + Eq, V> BasicCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a key-value pair; absent key or value is a no-op.
    pub fn put(&mut self, key: impl Into<Option<K>>, value: impl Into<Option<V>>) {
        if let (Some(key), Some(value)) = (key.into(), value.into()) {
            self.entries.insert(key, value);
            self.stats.set_total_entries(self.entries.len());
        }
    }

    /// Retrieves a value; absent or missing key returns None.
    pub fn get<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Option<&V>
    where
        K: 'k,
    {
        let key = key.into()?;
        let value = self.entries.get(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.stats.set_total_entries(self.entries.len());
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq, V> Cache<K, V> for BasicCache<K, V> {
    fn put(&mut self, key: Option<K>, value: Option<V>) {
        BasicCache::put(self, key, value)
    }

    fn get(&mut self, key: Option<&K>) -> Option<&V> {
        BasicCache::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BasicCache::remove(self, key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contents(&self) -> Vec<(&K, &V)> {
        self.entries.iter().collect()
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
