//! Eviction Policy Module
//!
//! The policy tag chosen at construction and the bookkeeping each policy
//! keeps next to the key/value mapping.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{FrequencyTable, OrderList};
use crate::error::CacheError;

// == Eviction Policy ==
/// Selects which entry a full cache gives up for a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Evicts the earliest inserted key; reads and updates never reorder.
    Fifo,
    /// Evicts the latest inserted or updated key; reads never reorder.
    Lifo,
    /// Evicts the least recently touched key.
    Lru,
    /// Evicts the most recently touched key.
    Mru,
    /// Evicts the least frequently touched key, least recent first on ties.
    Lfu,
}

impl EvictionPolicy {
    /// Every supported policy, in declaration order.
    pub const ALL: [EvictionPolicy; 5] = [
        EvictionPolicy::Fifo,
        EvictionPolicy::Lifo,
        EvictionPolicy::Lru,
        EvictionPolicy::Mru,
        EvictionPolicy::Lfu,
    ];

    /// Short lowercase name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Lifo => "lifo",
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Mru => "mru",
            EvictionPolicy::Lfu => "lfu",
        }
    }

    /// Whether a `get` hit counts as a touch under this policy.
    pub fn tracks_reads(self) -> bool {
        matches!(
            self,
            EvictionPolicy::Lru | EvictionPolicy::Mru | EvictionPolicy::Lfu
        )
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CacheError::UnknownPolicy(s.to_string()))
    }
}

// == Bookkeeping ==
/// Per-policy auxiliary state. Always tracks exactly the keys present in
/// the owning cache's mapping.
#[derive(Debug)]
pub(crate) enum Bookkeeping<K> {
    Fifo(OrderList<K>),
    Lifo(OrderList<K>),
    Lru(OrderList<K>),
    Mru(OrderList<K>),
    Lfu(FrequencyTable<K>),
}

impl<K: Hash + Eq + Clone> Bookkeeping<K> {
    pub(crate) fn new(policy: EvictionPolicy) -> Self {
        match policy {
            EvictionPolicy::Fifo => Bookkeeping::Fifo(OrderList::new()),
            EvictionPolicy::Lifo => Bookkeeping::Lifo(OrderList::new()),
            EvictionPolicy::Lru => Bookkeeping::Lru(OrderList::new()),
            EvictionPolicy::Mru => Bookkeeping::Mru(OrderList::new()),
            EvictionPolicy::Lfu => Bookkeeping::Lfu(FrequencyTable::new()),
        }
    }

    pub(crate) fn policy(&self) -> EvictionPolicy {
        match self {
            Bookkeeping::Fifo(_) => EvictionPolicy::Fifo,
            Bookkeeping::Lifo(_) => EvictionPolicy::Lifo,
            Bookkeeping::Lru(_) => EvictionPolicy::Lru,
            Bookkeeping::Mru(_) => EvictionPolicy::Mru,
            Bookkeeping::Lfu(_) => EvictionPolicy::Lfu,
        }
    }

    // == Insert ==
    /// A new key entered the mapping: it becomes the newest/most recent.
    pub(crate) fn on_insert(&mut self, key: K) {
        match self {
            Bookkeeping::Fifo(order)
            | Bookkeeping::Lifo(order)
            | Bookkeeping::Lru(order)
            | Bookkeeping::Mru(order) => {
                order.push_back(key);
            }
            Bookkeeping::Lfu(table) => table.insert(key),
        }
    }

    // == Update ==
    /// An existing key was overwritten by `put`.
    pub(crate) fn on_update(&mut self, key: &K) {
        match self {
            // overwrite keeps the original insertion position
            Bookkeeping::Fifo(_) => {}
            Bookkeeping::Lifo(order) | Bookkeeping::Lru(order) | Bookkeeping::Mru(order) => {
                order.touch(key)
            }
            Bookkeeping::Lfu(table) => {
                table.touch(key);
            }
        }
    }

    // == Hit ==
    /// An existing key was read by `get`.
    pub(crate) fn on_hit(&mut self, key: &K) {
        match self {
            Bookkeeping::Fifo(_) | Bookkeeping::Lifo(_) => {}
            Bookkeeping::Lru(order) | Bookkeeping::Mru(order) => order.touch(key),
            Bookkeeping::Lfu(table) => {
                table.touch(key);
            }
        }
    }

    // == Victim Selection ==
    /// Removes the victim from the bookkeeping and returns it.
    pub(crate) fn choose_victim(&mut self) -> Option<K> {
        match self {
            Bookkeeping::Fifo(order) | Bookkeeping::Lru(order) => order.pop_front(),
            Bookkeeping::Lifo(order) | Bookkeeping::Mru(order) => order.pop_back(),
            Bookkeeping::Lfu(table) => table.pop_min().map(|(key, _)| key),
        }
    }

    /// Returns the key `choose_victim` would remove.
    pub(crate) fn peek_victim(&self) -> Option<&K> {
        match self {
            Bookkeeping::Fifo(order) | Bookkeeping::Lru(order) => order.front(),
            Bookkeeping::Lifo(order) | Bookkeeping::Mru(order) => order.back(),
            Bookkeeping::Lfu(table) => table.peek_min(),
        }
    }

    pub(crate) fn remove(&mut self, key: &K) -> bool {
        match self {
            Bookkeeping::Fifo(order)
            | Bookkeeping::Lifo(order)
            | Bookkeeping::Lru(order)
            | Bookkeeping::Mru(order) => order.remove(key),
            Bookkeeping::Lfu(table) => table.remove(key).is_some(),
        }
    }

    pub(crate) fn frequency(&self, key: &K) -> Option<u64> {
        match self {
            Bookkeeping::Lfu(table) => table.frequency(key),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn contains(&self, key: &K) -> bool {
        match self {
            Bookkeeping::Fifo(order)
            | Bookkeeping::Lifo(order)
            | Bookkeeping::Lru(order)
            | Bookkeeping::Mru(order) => order.contains(key),
            Bookkeeping::Lfu(table) => table.contains(key),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        match self {
            Bookkeeping::Fifo(order)
            | Bookkeeping::Lifo(order)
            | Bookkeeping::Lru(order)
            | Bookkeeping::Mru(order) => order.len(),
            Bookkeeping::Lfu(table) => table.len(),
        }
    }
}
