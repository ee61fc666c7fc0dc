//! Frequency Table Module
//!
//! LFU bookkeeping: a use counter per key plus one recency-ordered bucket
//! per distinct counter value.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::cache::OrderList;

// == Frequency Table ==
/// Tracks use counts for LFU eviction.
///
/// Every touch moves a key from bucket `f` to the back of bucket `f + 1`, so
/// inside a bucket keys are ordered by their last touch. The front of the
/// lowest bucket is therefore the least recently touched key among those
/// sharing the minimum frequency.
#[derive(Debug)]
pub struct FrequencyTable<K> {
    /// Current use count per key
    counts: HashMap<K, u64>,
    /// Frequency → keys at that frequency, least recent first
    buckets: BTreeMap<u64, OrderList<K>>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Starts tracking a key with a frequency of 1.
    ///
    /// A key that is already tracked is touched instead.
    pub fn insert(&mut self, key: K) {
        if self.counts.contains_key(&key) {
            self.touch(&key);
            return;
        }
        self.counts.insert(key.clone(), 1);
        self.buckets.entry(1).or_default().push_back(key);
    }

    // == Touch ==
    /// Increments a key's frequency and makes it the most recent entry of
    /// its new bucket. Returns the new frequency, or None if untracked.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let count = self.counts.get_mut(key)?;
        let old = *count;
        let new = old.saturating_add(1);
        *count = new;

        self.detach(key, old);
        self.buckets.entry(new).or_default().push_back(key.clone());
        Some(new)
    }

    // == Remove ==
    /// Stops tracking a key. Returns its last frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let freq = self.counts.remove(key)?;
        self.detach(key, freq);
        Some(freq)
    }

    // == Pop Min ==
    /// Removes and returns the least recently touched key among those with
    /// the lowest frequency, together with that frequency.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let mut lowest = self.buckets.first_entry()?;
        let freq = *lowest.key();
        let key = lowest.get_mut().pop_front()?;
        if lowest.get().is_empty() {
            lowest.remove();
        }
        self.counts.remove(&key);
        Some((key, freq))
    }

    // == Peek Min ==
    /// Returns the key `pop_min` would remove, without removing it.
    pub fn peek_min(&self) -> Option<&K> {
        self.buckets.values().next()?.front()
    }

    // == Frequency ==
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Lowest frequency currently tracked.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    fn detach(&mut self, key: &K, freq: u64) {
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.remove(key);
            if bucket.is_empty() {
                self.buckets.remove(&freq);
            }
        }
    }
}
