//! Cache Module
//!
//! Provides an in-memory response cache with time-based eviction.

mod entry;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl::TtlCache;
