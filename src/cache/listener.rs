//! Discard Listener Module
//!
//! Side channel notified each time a policy evicts an entry. The observable
//! contract is one `DISCARD: <key>` line per eviction, in eviction order.

use std::fmt;

use tracing::info;

// == Discard Notice ==
/// Renders the literal `DISCARD: <key>` line for an evicted key.
#[derive(Debug, Clone, Copy)]
pub struct DiscardNotice<'a, K>(pub &'a K);

impl<K: fmt::Display> fmt::Display for DiscardNotice<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DISCARD: {}", self.0)
    }
}

// == Listener Trait ==
/// Receives every entry evicted to make room for a new key.
///
/// Called once per eviction, after the victim has already left the mapping
/// and the policy bookkeeping. Explicit removals and overwrites are not
/// reported.
pub trait DiscardListener<K, V> {
    fn on_discard(&mut self, key: &K, value: &V);
}

// == Stdout Listener ==
/// Prints the notice line to standard output. Default for new caches.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutListener;

impl<K: fmt::Display, V> DiscardListener<K, V> for StdoutListener {
    fn on_discard(&mut self, key: &K, _value: &V) {
        println!("{}", DiscardNotice(key));
    }
}

// == Log Listener ==
/// Emits the notice line as a `tracing` info event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl<K: fmt::Display, V> DiscardListener<K, V> for LogListener {
    fn on_discard(&mut self, key: &K, _value: &V) {
        info!("{}", DiscardNotice(key));
    }
}

// == Closure Listener ==
/// A [`DiscardListener`] backed by a closure.
pub struct FnListener<F>(pub F);

impl<K, V, F> DiscardListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V),
{
    fn on_discard(&mut self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}
