//! In-memory TTL cache with hit/miss/eviction counters.
//!
//! Expiry is evaluated lazily: an entry is only dropped when a read finds it
//! stale, or when [`TtlCache::purge_expired`] is called. Expired entries that
//! are never read again keep occupying memory until one of those happens.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Point-in-time counters for one cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Stored entries, including expired ones nobody has read yet.
    pub size: usize,
}

/// Thread-safe expiring key/value store.
///
/// All state sits behind one mutex, so a read that discovers an expired entry
/// removes it and updates the counters in the same critical section as the
/// lookup.
pub struct TtlCache<V> {
    name: &'static str,
    default_ttl: Duration,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache. `name` labels log lines and stats.
    #[must_use]
    pub fn new(name: &'static str, default_ttl: Duration) -> Self {
        Self {
            name,
            default_ttl,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns a clone of the live value for `key`.
    ///
    /// A stale entry is removed and counted as both an eviction and a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        match state.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                state.hits += 1;
                tracing::debug!(cache = self.name, key, "cache hit");
                Some(value)
            }
            Some(_) => {
                state.entries.remove(key);
                state.evictions += 1;
                state.misses += 1;
                tracing::debug!(cache = self.name, key, "cache entry expired");
                None
            }
            None => {
                state.misses += 1;
                tracing::debug!(cache = self.name, key, "cache miss");
                None
            }
        }
    }

    /// Stores `value` under `key`, replacing any existing entry (last write wins).
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        };
        self.state.lock().entries.insert(key.into(), entry);
    }

    /// [`TtlCache::set`] with the cache's default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Removes `key`, returning whether an entry was present.
    pub fn remove(&self, key: &str) -> bool {
        self.state.lock().entries.remove(key).is_some()
    }

    /// Drops every entry and returns how many were removed. Counters are kept.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        removed
    }

    /// Removes all expired entries, counting each as an eviction.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before - state.entries.len();
        state.evictions += purged as u64;
        purged
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            size: state.entries.len(),
        }
    }
}
