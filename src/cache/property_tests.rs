//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against its invariants and against a
//! naive list-scanning model of each policy.

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::cache::{EvictionPolicy, FnListener, PolicyCache};

// == Test Configuration ==
const TEST_MAX_ITEMS: usize = 4;

// == Strategies ==
/// Small key space so that hits, updates and evictions all happen often
fn key_strategy() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![
        1 => Just(None),
        9 => (0u8..8).prop_map(Some),
    ]
}

fn value_strategy() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![
        1 => Just(None),
        9 => any::<u32>().prop_map(Some),
    ]
}

fn policy_strategy() -> impl Strategy<Value = EvictionPolicy> {
    prop::sample::select(EvictionPolicy::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: Option<u8>, value: Option<u32> },
    Get { key: Option<u8> },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

type Discards = Rc<RefCell<Vec<u8>>>;

fn recording_cache(policy: EvictionPolicy, max_items: usize) -> (PolicyCache<u8, u32>, Discards) {
    let discards: Discards = Rc::default();
    let sink = Rc::clone(&discards);
    let cache = PolicyCache::with_listener(
        policy,
        max_items,
        FnListener(move |key: &u8, _: &u32| sink.borrow_mut().push(*key)),
    )
    .unwrap();
    (cache, discards)
}

// == Reference Model ==
/// Straightforward list-and-scan rendition of every policy: linear
/// remove-then-append on the order list, min scan for LFU.
struct ModelCache {
    policy: EvictionPolicy,
    max_items: usize,
    data: HashMap<u8, u32>,
    order: Vec<u8>,
    frequency: HashMap<u8, u64>,
}

impl ModelCache {
    fn new(policy: EvictionPolicy, max_items: usize) -> Self {
        Self {
            policy,
            max_items,
            data: HashMap::new(),
            order: Vec::new(),
            frequency: HashMap::new(),
        }
    }

    fn move_to_back(&mut self, key: u8) {
        self.order.retain(|k| *k != key);
        self.order.push(key);
    }

    /// Returns the evicted key, if any.
    fn put(&mut self, key: u8, value: u32) -> Option<u8> {
        if self.data.contains_key(&key) {
            self.data.insert(key, value);
            match self.policy {
                EvictionPolicy::Fifo => {}
                EvictionPolicy::Lifo | EvictionPolicy::Lru | EvictionPolicy::Mru => {
                    self.move_to_back(key)
                }
                EvictionPolicy::Lfu => {
                    *self.frequency.entry(key).or_insert(0) += 1;
                    self.move_to_back(key);
                }
            }
            return None;
        }

        let mut evicted = None;
        if self.data.len() >= self.max_items {
            let victim = match self.policy {
                EvictionPolicy::Fifo | EvictionPolicy::Lru => self.order.remove(0),
                EvictionPolicy::Lifo | EvictionPolicy::Mru => self.order.pop().unwrap(),
                EvictionPolicy::Lfu => {
                    let min = *self.frequency.values().min().unwrap();
                    let victim = *self
                        .order
                        .iter()
                        .find(|k| self.frequency[*k] == min)
                        .unwrap();
                    self.order.retain(|k| *k != victim);
                    victim
                }
            };
            self.data.remove(&victim);
            self.frequency.remove(&victim);
            evicted = Some(victim);
        }

        self.data.insert(key, value);
        self.order.push(key);
        if self.policy == EvictionPolicy::Lfu {
            self.frequency.insert(key, 1);
        }
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let value = *self.data.get(&key)?;
        if self.policy.tracks_reads() {
            self.move_to_back(key);
            if self.policy == EvictionPolicy::Lfu {
                *self.frequency.entry(key).or_insert(0) += 1;
            }
        }
        Some(value)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any operation sequence, size never exceeds MAX_ITEMS and the
    // bookkeeping tracks exactly the keys in the mapping.
    #[test]
    fn prop_capacity_and_key_set_invariants(
        policy in policy_strategy(),
        max_items in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, _) = recording_cache(policy, max_items);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => { cache.get(key.as_ref()); }
            }
            prop_assert!(cache.len() <= max_items);
            cache.debug_validate_invariants();
        }
    }

    // Every policy evicts exactly the key the scanning model evicts, and
    // every read returns what the model returns.
    #[test]
    fn prop_matches_reference_model(
        policy in policy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let (mut cache, discards) = recording_cache(policy, TEST_MAX_ITEMS);
        let mut model = ModelCache::new(policy, TEST_MAX_ITEMS);
        let mut expected_discards = Vec::new();

        for op in ops {
            match op {
                CacheOp::Put { key: Some(key), value: Some(value) } => {
                    cache.put(key, value);
                    expected_discards.extend(model.put(key, value));
                }
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key: Some(key) } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                CacheOp::Get { key: None } => {
                    prop_assert_eq!(cache.get(None), None);
                }
            }
            prop_assert_eq!(&*discards.borrow(), &expected_discards);
        }

        if policy == EvictionPolicy::Lfu {
            for (key, freq) in &model.frequency {
                prop_assert_eq!(cache.frequency(key), Some(*freq));
            }
        }
    }

    // A value put and not yet evicted reads back as the latest value.
    #[test]
    fn prop_roundtrip_latest_value(
        policy in policy_strategy(),
        key in 0u8..8,
        value1 in any::<u32>(),
        value2 in any::<u32>()
    ) {
        let (mut cache, _) = recording_cache(policy, TEST_MAX_ITEMS);

        cache.put(key, value1);
        cache.put(key, value2);

        prop_assert_eq!(cache.get(&key), Some(&value2));
        prop_assert_eq!(cache.len(), 1);
    }

    // Absent keys or values never change the cache or notify the listener.
    #[test]
    fn prop_absent_inputs_are_noops(
        policy in policy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..40),
        value in any::<u32>()
    ) {
        let (mut cache, discards) = recording_cache(policy, TEST_MAX_ITEMS);
        for op in ops {
            if let CacheOp::Put { key, value } = op {
                cache.put(key, value);
            }
        }

        let before: HashMap<u8, u32> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        let victim_before = cache.next_victim().copied();
        let discards_before = discards.borrow().len();
        let stats_before = cache.stats();

        cache.put(None, value);
        cache.put(0u8, None);
        prop_assert_eq!(cache.get(None), None);

        let after: HashMap<u8, u32> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(cache.next_victim().copied(), victim_before);
        prop_assert_eq!(discards.borrow().len(), discards_before);
        prop_assert_eq!(cache.stats(), stats_before);
    }
}
