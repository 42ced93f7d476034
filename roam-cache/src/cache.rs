//! Keyed value store with lazy TTL expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Stored value plus its capture timestamp.
#[derive(Clone)]
struct Slot<T> {
    value: T,
    captured_at: Instant,
}

impl<T> Slot<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.captured_at.elapsed() <= ttl
    }
}

/// In-memory cache for catalog payloads.
///
/// Thread-safe; every entry is stamped with its capture time and freshness
/// is decided at read time against a caller-supplied TTL. The TTL is not
/// baked into entries because the policy comes from remote configuration
/// and may change between a write and a later read.
///
/// A stale entry is not deleted when a read misses it: a later read with a
/// larger TTL may still accept it, and the next `save` overwrites it anyway.
/// There is no background eviction and no capacity bound; growth is limited
/// in practice by the small set of catalog keys.
///
/// Keys are treated as opaque strings. Normalization happens in
/// [`RequestKey`](crate::RequestKey), not here.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, Slot<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// Unconditionally overwrites any prior entry, fresh or stale.
    pub fn save(&self, key: &str, value: T) {
        let mut entries = self.entries.write();
        entries.insert(
            key.to_owned(),
            Slot {
                value,
                captured_at: Instant::now(),
            },
        );
    }

    /// Returns the value under `key` if one exists and is no older than `ttl`.
    ///
    /// A miss leaves any stale entry in place.
    pub fn load(&self, key: &str, ttl: Duration) -> Option<T> {
        let entries = self.entries.read();
        entries.get(key).and_then(|slot| {
            if slot.is_fresh(ttl) {
                Some(slot.value.clone())
            } else {
                None
            }
        })
    }

    /// Removes the entry under `key`, if any.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes entries older than `ttl`.
    ///
    /// Expiry is otherwise lazy; this exists for callers that want to
    /// reclaim memory explicitly, e.g. on a memory-pressure signal.
    pub fn purge_stale(&self, ttl: Duration) {
        self.entries.write().retain(|_, slot| slot.is_fresh(ttl));
    }

    /// Returns the number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics, judging freshness against `ttl`.
    pub fn stats(&self, ttl: Duration) -> CacheStats {
        let entries = self.entries.read();
        let stale = entries.values().filter(|slot| !slot.is_fresh(ttl)).count();
        CacheStats {
            total_entries: entries.len(),
            stale_entries: stale,
            fresh_entries: entries.len().saturating_sub(stale),
        }
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Entries stored, fresh or stale.
    pub total_entries: usize,
    /// Entries still within the supplied TTL.
    pub fresh_entries: usize,
    /// Entries older than the supplied TTL.
    pub stale_entries: usize,
}
