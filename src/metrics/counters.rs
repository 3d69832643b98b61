use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::traits::{CacheCounterRecorder, RingCounterRecorder};

/// Monotonic operation counters for one cache instance.
///
/// Shared by all segments of a [`ShardedLruCache`](crate::cache::ShardedLruCache)
/// via `Arc`. Increments are relaxed: counters are observational and carry no
/// ordering obligations.
#[derive(Debug, Default)]
pub struct CacheCounters {
    pub sets: AtomicU64,
    pub gets: AtomicU64,
    pub hits: AtomicU64,
    pub deletes: AtomicU64,
    pub exists: AtomicU64,
    pub evicts: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheCounterRecorder for CacheCounters {
    #[inline]
    fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_exists(&self) {
        self.exists.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_evict(&self) {
        self.evicts.fetch_add(1, Ordering::Relaxed);
    }
}

/// Monotonic operation counters for one ring instance.
#[derive(Debug, Default)]
pub struct RingCounters {
    pub adds: AtomicU64,
    pub removes: AtomicU64,
    pub gets: AtomicU64,
}

impl RingCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RingCounterRecorder for RingCounters {
    #[inline]
    fn record_add(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_remove(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }
}
