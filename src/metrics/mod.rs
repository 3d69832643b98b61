//! Telemetry counters for the cache and ring engines.
//!
//! Mirrors the cache/ring split with small, composable pieces: *recorders*
//! write counters, *snapshot providers* read them, *exporters* publish them.
//! Counters are monotonic, relaxed atomics, and strictly observational: they
//! never affect operation results, and a sink is owned per cache/ring
//! instance rather than held as process-wide state, so instances stay
//! independently testable.

pub mod counters;
pub mod exporter;
pub mod snapshot;
pub mod traits;

pub use counters::{CacheCounters, RingCounters};
pub use exporter::PrometheusTextExporter;
pub use snapshot::{CacheCountersSnapshot, RingCountersSnapshot};
pub use traits::{
    CacheCounterRecorder, MetricsExporter, MetricsSnapshotProvider, RingCounterRecorder,
};
