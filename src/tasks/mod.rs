//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweep: evicts entries older than the cache TTL once per TTL interval

mod sweep;

pub use sweep::{spawn_sweep_task, sweep_expired, SweepState, SWEEP_BATCH_SIZE};
