//! Cache Store Module
//!
//! Unsynchronized map of entries plus counters. `TtlCache` wraps it in a
//! mutex and the sweep task drives its eviction methods.

use std::collections::HashMap;
use std::time::Instant;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Entry map with activity statistics.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry wholesale.
    pub fn insert(&mut self, key: String, value: Bytes) {
        self.insert_entry(key, CacheEntry::new(value));
    }

    /// Stores a prebuilt entry, replacing any previous entry wholesale.
    pub fn insert_entry(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
        self.stats.record_store();
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    ///
    /// Age is not checked here; stale entries stay visible until a sweep
    /// removes them.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Snapshot ==
    /// Returns a copy of every key and entry. Payloads are shared, not copied.
    pub fn snapshot(&self) -> Vec<(String, CacheEntry)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    // == Remove If Unchanged ==
    /// Removes `key` only if its entry still carries `created_at`.
    ///
    /// An entry refreshed after the snapshot was taken has a newer stamp and
    /// survives. Returns whether an entry was removed.
    pub fn remove_if_unchanged(&mut self, key: &str, created_at: Instant) -> bool {
        let unchanged = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.created_at() == created_at);

        if unchanged {
            self.entries.remove(key);
            self.stats.record_evictions(1);
        }
        unchanged
    }

    pub fn record_sweep(&mut self) {
        self.stats.record_sweep();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
