//! Recorder, snapshot, and export traits for telemetry.
//!
//! ```text
//!   ┌───────────────────────────┐   ┌───────────────────────────┐
//!   │   CacheCounterRecorder    │   │    RingCounterRecorder    │
//!   │  set/get/hit/delete/      │   │      add/remove/get       │
//!   │  exists/evict             │   │                           │
//!   └────────────┬──────────────┘   └────────────┬──────────────┘
//!                ▼                               ▼
//!          CacheCounters                   RingCounters
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │   │ MetricsExporter<S>           │
//!   │ (tests, inspection)          │   │ (monitoring systems)         │
//!   └──────────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self` because cache segments record under read locks as
//! well as write locks; implementations use atomics.

/// Counter events emitted by cache operations.
pub trait CacheCounterRecorder {
    fn record_set(&self);
    fn record_get(&self);
    fn record_hit(&self);
    fn record_delete(&self);
    fn record_exists(&self);
    fn record_evict(&self);
}

/// Counter events emitted by ring operations.
pub trait RingCounterRecorder {
    fn record_add(&self);
    fn record_remove(&self);
    fn record_get(&self);
}

/// Produces a point-in-time copy of recorded counters plus gauges.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
