//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Cache Entry ==
/// A stored payload and the instant it was inserted.
///
/// Entries are never mutated; storing under an existing key replaces the
/// entry wholesale, creation stamp included.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    value: Bytes,
    /// Insertion instant
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation stamp.
    pub fn with_created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// The stored payload. Cloning `Bytes` is a reference-count bump.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    // == Age ==
    /// Age of the entry as observed at `now`.
    ///
    /// Saturates to zero when `now` precedes the creation stamp.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// fresh; it becomes eligible for eviction only once its age exceeds it.
    pub fn is_stale_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }
}
