//! Time-bounded memoization for session-immutable game data.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A key/value memo whose entries expire after a fixed time-to-live.
///
/// Eviction is lazy: a stale entry is ignored on read and overwritten on the
/// next `set` for its key. There is no background eviction.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, (Instant, V)>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Create a cache whose entries are fresh for `ttl` after each `set`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Store `value` under `key`, stamped with the current time.
    pub fn set(&mut self, key: K, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Return the value for `key` if it is still fresh.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` under `key` with an explicit timestamp.
    pub fn set_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, (now, value));
    }

    /// Return the value for `key` if `now - stored_at < ttl`.
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let (stored_at, value) = self.entries.get(key)?;
        if now.duration_since(*stored_at) < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    /// Drop every entry regardless of freshness.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
