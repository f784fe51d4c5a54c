//! TTL Cache Handle
//!
//! Shared, cloneable front of the cache: a mutex-guarded [`CacheStore`] plus
//! the background sweep that evicts stale entries.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::{spawn_sweep_task, SweepState};

// == TTL Cache ==
/// Concurrent key/value cache whose entries are evicted once older than the TTL.
///
/// Clones share the same entries and the same sweep task. The sweep stops on
/// [`TtlCache::shutdown`], or on its own once the last clone is dropped.
///
/// # Example
/// ```ignore
/// let cache = TtlCache::new(Duration::from_secs(300))?;
/// cache.store("https://pokeapi.co/api/v2/pokemon/pikachu", body).await;
/// if let Some(bytes) = cache.lookup("https://pokeapi.co/api/v2/pokemon/pikachu").await {
///     // served without a network round-trip
/// }
/// cache.shutdown().await;
/// ```
#[derive(Debug, Clone)]
pub struct TtlCache {
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    sweeper: Arc<Sweeper>,
}

/// Control side of the sweep task, shared by every clone of a cache.
#[derive(Debug)]
struct Sweeper {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<SweepState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// # Errors
    /// [`PokedexError::InvalidTtl`] when `ttl` is zero.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(PokedexError::InvalidTtl(
                "TTL must be greater than zero".to_string(),
            ));
        }

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(SweepState::Sleeping);
        let task = spawn_sweep_task(store.clone(), ttl, shutdown_rx, state_tx);

        debug!(ttl_ms = ttl.as_millis() as u64, "Cache created");

        Ok(Self {
            store,
            ttl,
            sweeper: Arc::new(Sweeper {
                shutdown: shutdown_tx,
                state: state_rx,
                task: Mutex::new(Some(task)),
            }),
        })
    }

    // == Store ==
    /// Inserts `value` under `key`, replacing any existing entry and its stamp.
    pub async fn store(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        self.store.lock().await.insert(key, value);
    }

    // == Lookup ==
    /// Returns the payload stored under `key`, if present.
    ///
    /// Entries are served until the sweep removes them, so a hit may be up to
    /// roughly twice the TTL old.
    pub async fn lookup(&self, key: &str) -> Option<Bytes> {
        self.store.lock().await.get(key)
    }

    // == Shutdown ==
    /// Stops the sweep task and waits for it to exit.
    ///
    /// Idempotent. Entries remain readable afterward but are no longer evicted.
    pub async fn shutdown(&self) {
        // Fails only when the task has already exited
        let _ = self.sweeper.shutdown.send(true);

        let task = self.sweeper.task.lock().await.take();
        if let Some(handle) = task {
            if let Err(err) = handle.await {
                warn!("Cache sweep task ended abnormally: {}", err);
            }
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current lifecycle state of the sweep task.
    pub fn sweep_state(&self) -> SweepState {
        *self.sweeper.state.borrow()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_entry_expires_after_two_intervals() {
        let cache = TtlCache::new(Duration::from_millis(100)).unwrap();

        cache.store("a", vec![1u8, 2, 3]).await;
        assert_eq!(&cache.lookup("a").await.unwrap()[..], &[1u8, 2, 3]);

        sleep(Duration::from_millis(250)).await;
        assert!(cache.lookup("a").await.is_none());

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_entry_survives_half_ttl() {
        let cache = TtlCache::new(Duration::from_millis(200)).unwrap();

        cache.store("k", "v").await;
        sleep(Duration::from_millis(100)).await;

        assert_eq!(&cache.lookup("k").await.unwrap()[..], b"v");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let result = TtlCache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidTtl(_))));
    }

    #[tokio::test]
    async fn test_refresh_resets_age() {
        let cache = TtlCache::new(Duration::from_millis(150)).unwrap();

        cache.store("k", "first").await;
        sleep(Duration::from_millis(120)).await;
        cache.store("k", "second").await;
        sleep(Duration::from_millis(120)).await;

        // 240ms after the first store, 120ms after the refresh
        assert_eq!(&cache.lookup("k").await.unwrap()[..], b"second");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_sweep() {
        let cache = TtlCache::new(Duration::from_millis(50)).unwrap();
        assert_ne!(cache.sweep_state(), SweepState::Stopped);

        cache.shutdown().await;
        assert_eq!(cache.sweep_state(), SweepState::Stopped);

        // Idempotent, and entries are no longer evicted
        cache.shutdown().await;
        cache.store("kept", "value").await;
        sleep(Duration::from_millis(150)).await;
        assert!(cache.lookup("kept").await.is_some());
    }

    #[tokio::test]
    async fn test_dropping_last_handle_stops_sweep() {
        let cache = TtlCache::new(Duration::from_secs(3600)).unwrap();
        let mut state = cache.sweeper.state.clone();
        let clone = cache.clone();

        drop(cache);
        assert_ne!(clone.sweep_state(), SweepState::Stopped);
        drop(clone);

        tokio::time::timeout(
            Duration::from_secs(1),
            state.wait_for(|s| *s == SweepState::Stopped),
        )
        .await
        .expect("sweep should stop once every handle is dropped")
        .unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        let clone = cache.clone();

        clone.store("shared", "yes").await;
        assert_eq!(&cache.lookup("shared").await.unwrap()[..], b"yes");
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.ttl(), Duration::from_secs(60));

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_stats_track_activity() {
        let cache = TtlCache::new(Duration::from_millis(50)).unwrap();

        cache.store("a", "1").await;
        cache.lookup("a").await;
        cache.lookup("b").await;
        sleep(Duration::from_millis(180)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 1);
        assert_eq!(stats.evictions, 1);
        assert!(stats.sweeps >= 2);
        assert_eq!(stats.total_entries, 0);
        assert!(cache.is_empty().await);

        cache.shutdown().await;
    }
}
