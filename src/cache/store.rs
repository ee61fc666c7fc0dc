//! Policy Cache Module
//!
//! Bounded cache engine combining HashMap storage with a pluggable eviction
//! policy and a discard notification side channel.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::cache::policy::Bookkeeping;
use crate::cache::{Cache, CacheStats, DiscardListener, EvictionPolicy, StdoutListener};
use crate::error::{CacheError, Result};

// == Policy Cache ==
/// Cache holding at most `max_items` entries, evicting by `policy`.
///
/// The mapping and the policy bookkeeping always hold the same key set;
/// every call updates both before returning. Not internally synchronized:
/// wrap an instance in a lock if several threads must share it.
pub struct PolicyCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Order / frequency tracking for the configured policy
    bookkeeping: Bookkeeping<K>,
    /// Receives every evicted entry
    listener: Box<dyn DiscardListener<K, V>>,
    /// Hit, miss and eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_items: usize,
}

impl<K, V> PolicyCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug + fmt::Display,
{
    // == Constructor ==
    /// Creates a cache that prints `DISCARD: <key>` to stdout on eviction.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `max_items` is zero.
    pub fn new(policy: EvictionPolicy, max_items: usize) -> Result<Self> {
        Self::with_listener(policy, max_items, StdoutListener)
    }
}

impl<K, V> PolicyCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    /// Creates a cache that reports evictions to `listener`.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `max_items` is zero.
    pub fn with_listener(
        policy: EvictionPolicy,
        max_items: usize,
        listener: impl DiscardListener<K, V> + 'static,
    ) -> Result<Self> {
        if max_items == 0 {
            return Err(CacheError::InvalidCapacity(max_items.to_string()));
        }

        Ok(Self {
            entries: HashMap::new(),
            bookkeeping: Bookkeeping::new(policy),
            listener: Box::new(listener),
            stats: CacheStats::new(),
            max_items,
        })
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// - Absent key or value: no-op.
    /// - Existing key: value overwritten in place, counted as a touch.
    /// - New key into a full cache: the policy's victim is evicted and
    ///   reported to the listener first, then the new entry is inserted.
    pub fn put(&mut self, key: impl Into<Option<K>>, value: impl Into<Option<V>>) {
        if let (Some(key), Some(value)) = (key.into(), value.into()) {
            self.insert_entry(key, value);
        }
    }

    fn insert_entry(&mut self, key: K, value: V) {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            self.bookkeeping.on_update(&key);
            return;
        }

        if self.entries.len() >= self.max_items {
            self.evict_one();
        }

        self.bookkeeping.on_insert(key.clone());
        self.entries.insert(key, value);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    fn evict_one(&mut self) {
        let Some(victim) = self.bookkeeping.choose_victim() else {
            return;
        };

        if let Some(value) = self.entries.remove(&victim) {
            self.stats.record_eviction();
            self.stats.set_total_entries(self.entries.len());
            debug!(
                policy = %self.bookkeeping.policy(),
                key = ?victim,
                remaining = self.entries.len(),
                "evicted entry"
            );
            self.listener.on_discard(&victim, &value);
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None for an absent or missing key. Under LRU, MRU and LFU a
    /// hit counts as a use; FIFO and LIFO leave their order untouched.
    pub fn get<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Option<&V>
    where
        K: 'k,
    {
        let key = key.into()?;
        if !self.entries.contains_key(key) {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.bookkeeping.on_hit(key);
        self.entries.get(key)
    }

    // == Peek ==
    /// Retrieves a value without counting it as a use.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes an entry by key. No discard notification is emitted.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.bookkeeping.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(value)
    }

    // == Next Victim ==
    /// The key the next insertion into a full cache would evict.
    pub fn next_victim(&self) -> Option<&K> {
        self.bookkeeping.peek_victim()
    }

    /// LFU use count for a key; None under other policies.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.bookkeeping.frequency(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates current entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.bookkeeping.policy()
    }

    /// Maximum number of entries (MAX_ITEMS).
    pub fn capacity(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Panics if the mapping and the bookkeeping disagree on the key set.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert!(self.entries.len() <= self.max_items);
        assert_eq!(self.entries.len(), self.bookkeeping.len());
        for key in self.entries.keys() {
            assert!(self.bookkeeping.contains(key), "untracked key {:?}", key);
        }
    }
}

impl<K, V> fmt::Debug for PolicyCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyCache")
            .field("entries", &self.entries)
            .field("bookkeeping", &self.bookkeeping)
            .field("stats", &self.stats)
            .field("max_items", &self.max_items)
            .finish_non_exhaustive()
    }
}

// == Cache Contract ==
impl<K, V> Cache<K, V> for PolicyCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    fn put(&mut self, key: Option<K>, value: Option<V>) {
        PolicyCache::put(self, key, value)
    }

    fn get(&mut self, key: Option<&K>) -> Option<&V> {
        PolicyCache::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        PolicyCache::remove(self, key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contents(&self) -> Vec<(&K, &V)> {
        self.entries.iter().collect()
    }

    fn stats(&self) -> CacheStats {
        PolicyCache::stats(self)
    }
}
