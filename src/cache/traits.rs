//! Cache Contract Module
//!
//! The operations every cache in this crate shares, plus the
//! `Current cache:` rendering of its contents.

use std::fmt::{Display, Write as _};

use crate::cache::CacheStats;

// == Cache Trait ==
/// Key/value cache contract.
///
/// `None` is the absent sentinel: `put` with an absent key or value is a
/// silent no-op, and `get` of an absent or missing key returns `None`.
/// Neither operation can fail.
pub trait Cache<K, V> {
    /// Inserts or overwrites an entry, evicting first if the cache is full.
    fn put(&mut self, key: Option<K>, value: Option<V>);

    /// Looks up an entry, counting it as a use where the policy cares.
    fn get(&mut self, key: Option<&K>) -> Option<&V>;

    /// Removes an entry without emitting a discard notification.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current entries, in no particular order.
    fn contents(&self) -> Vec<(&K, &V)>;

    fn stats(&self) -> CacheStats;
}

// == Rendering ==
/// Formats the cache as `Current cache:` followed by one `key: value` line
/// per entry, sorted by key.
pub fn render_contents<K, V, C>(cache: &C) -> String
where
    C: Cache<K, V> + ?Sized,
    K: Ord + Display,
    V: Display,
{
    let mut entries = cache.contents();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("Current cache:\n");
    for (key, value) in entries {
        // writing into a String cannot fail
        let _ = writeln!(out, "{}: {}", key, value);
    }
    out
}
