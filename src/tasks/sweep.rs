//! TTL Sweep Task
//!
//! Background task that periodically evicts cache entries older than the TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Maximum number of removals performed per lock acquisition.
pub const SWEEP_BATCH_SIZE: usize = 64;

// == Sweep State ==
/// Lifecycle of the background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// Waiting for the next tick
    Sleeping,
    /// Running one pass over the entries
    Sweeping,
    /// Terminal; the task has exited
    Stopped,
}

/// Runs one sweep pass and returns the number of evicted entries.
///
/// Keys are snapshotted under the lock, ages are computed without it, and
/// stale keys are removed under the lock in batches of [`SWEEP_BATCH_SIZE`].
/// An entry refreshed after the snapshot keeps its newer stamp and survives.
pub async fn sweep_expired(store: &Mutex<CacheStore>, ttl: Duration) -> usize {
    let snapshot = store.lock().await.snapshot();

    let now = Instant::now();
    let stale: Vec<(String, Instant)> = snapshot
        .into_iter()
        .filter(|(_, entry)| entry.is_stale_at(now, ttl))
        .map(|(key, entry)| (key, entry.created_at()))
        .collect();

    let mut removed = 0;
    for batch in stale.chunks(SWEEP_BATCH_SIZE) {
        let mut guard = store.lock().await;
        for (key, created_at) in batch {
            if guard.remove_if_unchanged(key, *created_at) {
                removed += 1;
            }
        }
    }

    store.lock().await.record_sweep();
    removed
}

/// Spawns the background task that sweeps `store` once per `ttl`.
///
/// The task sleeps for `ttl`, runs [`sweep_expired`], and repeats. It exits
/// when `shutdown` receives a value or when its sender is dropped, and
/// reports its lifecycle through `state`.
///
/// # Arguments
/// * `store` - shared reference to the cache store
/// * `ttl` - entry time-to-live, also the sweep cadence
/// * `shutdown` - stop signal observed before every pass
/// * `state` - publishes the current [`SweepState`]
///
/// # Returns
/// A JoinHandle that resolves once the task reaches [`SweepState::Stopped`].
///
/// # Panics
/// Must be called from within a tokio runtime.
pub fn spawn_sweep_task(
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<SweepState>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(ttl_ms = ttl.as_millis() as u64, "Starting cache sweep task");

        loop {
            state.send_replace(SweepState::Sleeping);

            tokio::select! {
                biased;
                // Fires on an explicit stop and when every cache handle is gone
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(ttl) => {}
            }

            state.send_replace(SweepState::Sweeping);
            let removed = sweep_expired(&store, ttl).await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }

        state.send_replace(SweepState::Stopped);
        info!("Cache sweep task stopped");
    })
}
