//! Order List Module
//!
//! Key ordering shared by every eviction policy: insertion order for
//! FIFO/LIFO, recency order for LRU/MRU, and per-frequency recency for LFU.

use std::collections::HashMap;
use std::hash::Hash;

// == Node ==
#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Order List ==
/// Doubly-linked key sequence with a key → slot index.
///
/// - Front = oldest / least recently touched
/// - Back = newest / most recently touched
///
/// Nodes live in a slot vector with a free list, so `push_back`, `touch`,
/// `remove`, `pop_front` and `pop_back` are all O(1) amortized.
#[derive(Debug)]
pub struct OrderList<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> Default for OrderList<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K: Hash + Eq + Clone> OrderList<K> {
    // == Constructor ==
    /// Creates a new empty order list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends a key at the back (newest end).
    ///
    /// Returns false and leaves the list untouched if the key is already tracked.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let node = Node {
            key: key.clone(),
            prev: self.tail,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|t| self.slots[t].as_mut()) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.index.insert(key, idx);
        true
    }

    // == Touch ==
    /// Moves a key to the back, inserting it if it is not tracked yet.
    ///
    /// Remove-then-append: the touched key always ends up strictly last.
    pub fn touch(&mut self, key: &K) {
        if let Some(&idx) = self.index.get(key) {
            if self.tail == Some(idx) {
                return;
            }
            if let Some(owned) = self.unlink(idx) {
                self.index.remove(&owned);
                self.push_back(owned);
            }
        } else {
            self.push_back(key.clone());
        }
    }

    // == Remove ==
    /// Removes a key from the list. Returns true if it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(idx) => self.unlink(idx).is_some(),
            None => false,
        }
    }

    // == Pop Front ==
    /// Removes and returns the oldest key.
    pub fn pop_front(&mut self) -> Option<K> {
        let key = self.unlink(self.head?)?;
        self.index.remove(&key);
        Some(key)
    }

    // == Pop Back ==
    /// Removes and returns the newest key.
    pub fn pop_back(&mut self) -> Option<K> {
        let key = self.unlink(self.tail?)?;
        self.index.remove(&key);
        Some(key)
    }

    // == Peek ==
    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Returns the newest key without removing it.
    pub fn back(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Iteration ==
    /// Iterates keys from front (oldest) to back (newest).
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // Detaches the node at `idx` and returns its key. The index map is the
    // caller's responsibility.
    fn unlink(&mut self, idx: usize) -> Option<K> {
        let node = self.slots.get_mut(idx).and_then(Option::take)?;

        match node.prev.and_then(|p| self.slots[p].as_mut()) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.slots[n].as_mut()) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(idx);
        Some(node.key)
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`OrderList`].
pub struct Iter<'a, K> {
    list: &'a OrderList<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slots[self.cursor?].as_ref()?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
