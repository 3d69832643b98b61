//! # Sharded Concurrent LRU Cache
//!
//! Partitions keys across a power-of-two array of [`Segment`]s so that
//! unrelated keys contend on different locks.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      ShardedLruCache<V>                          │
//!   │                                                                  │
//!   │   key ──► fnv1a32(key) ──► top log2(segments) bits ──► segment   │
//!   │                                                                  │
//!   │   ┌───────────┬───────────┬───────────┬───────────┐              │
//!   │   │ Segment 0 │ Segment 1 │ Segment 2 │ Segment 3 │  ...         │
//!   │   │  RwLock   │  RwLock   │  RwLock   │  RwLock   │              │
//!   │   │  LRU      │  LRU      │  LRU      │  LRU      │              │
//!   │   └───────────┴───────────┴───────────┴───────────┘              │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Properties
//!
//! - **Immutable shape**: segment count, routing shift/mask, and total
//!   capacity are fixed at construction; the only mutation afterwards is
//!   within owned segments.
//! - **Deterministic routing**: a key maps to exactly one segment for the
//!   cache's entire lifetime. The hash is recomputed on every call.
//! - **Parallel segments**: segments share no mutable state and no
//!   operation holds more than one segment lock.
//! - **Approximate `len`**: the total length is summed across segments on
//!   demand; under concurrent mutation it is a snapshot, not a
//!   linearizable count.
//!
//! ## Example Usage
//!
//! ```
//! use shardkit::cache::{CacheOptions, ShardedLruCache};
//!
//! let cache: ShardedLruCache<String> =
//!     ShardedLruCache::new(CacheOptions::new().capacity(1024)).unwrap();
//!
//! cache.insert("user:1", "alice".to_string());
//! assert_eq!(*cache.get("user:1").unwrap(), "alice");
//! assert!(cache.get("user:2").is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::cache::options::{normalize, CacheOptions};
use crate::cache::segment::Segment;
use crate::error::ConfigError;
use crate::hash::fnv1a32;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheCounters, CacheCountersSnapshot, MetricsSnapshotProvider};
use crate::traits::ConcurrentCache;

/// Concurrency-sharded LRU cache over string keys.
///
/// Values are stored as `Arc<V>`; [`insert`](Self::insert) wraps plain
/// values and [`insert_arc`](Self::insert_arc) accepts pre-wrapped ones.
pub struct ShardedLruCache<V> {
    segments: Vec<Segment<V>>,
    shift: u32,
    mask: usize,
    capacity: usize,
    #[cfg(feature = "metrics")]
    counters: Arc<CacheCounters>,
}

impl<V> ShardedLruCache<V> {
    /// Builds a cache from `options`.
    ///
    /// Fails with [`ConfigError`] when the requested concurrency or capacity
    /// is zero. Both are clamped to fixed maxima and rounded up to powers of
    /// two; read back [`capacity`](Self::capacity) for the advertised total.
    ///
    /// # Example
    ///
    /// ```
    /// use shardkit::cache::{CacheOptions, ShardedLruCache};
    ///
    /// // 129 entries over 16 segments round up to 256
    /// let cache: ShardedLruCache<i32> =
    ///     ShardedLruCache::new(CacheOptions::new().capacity(129)).unwrap();
    /// assert_eq!(cache.capacity(), 256);
    /// ```
    pub fn new(options: CacheOptions) -> Result<Self, ConfigError> {
        let shape = normalize(&options)?;

        #[cfg(feature = "metrics")]
        let counters = Arc::new(CacheCounters::new());

        #[cfg(feature = "metrics")]
        let segments = (0..shape.segments)
            .map(|_| Segment::new(shape.segment_capacity, Arc::clone(&counters)))
            .collect();
        #[cfg(not(feature = "metrics"))]
        let segments = (0..shape.segments)
            .map(|_| Segment::new(shape.segment_capacity))
            .collect();

        Ok(Self {
            segments,
            shift: shape.shift,
            mask: shape.mask,
            capacity: shape.total_capacity,
            #[cfg(feature = "metrics")]
            counters,
        })
    }

    /// Builds a cache with the default options (16 segments, 8192 entries).
    pub fn with_defaults() -> Self {
        Self::new(CacheOptions::default()).expect("default cache options are valid")
    }

    /// Stores `value` under `key`, returning the previous value if the key
    /// was present. The routed segment evicts its least-recently-used entry
    /// when the insert overflows it.
    pub fn insert(&self, key: &str, value: V) -> Option<Arc<V>> {
        self.segment_for(key).insert(key, Arc::new(value))
    }

    /// Stores a pre-wrapped `Arc<V>` directly.
    pub fn insert_arc(&self, key: &str, value: Arc<V>) -> Option<Arc<V>> {
        self.segment_for(key).insert(key, value)
    }

    /// Looks up `key`. A hit promotes the entry to most-recently-used in
    /// its segment.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.segment_for(key).get(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<Arc<V>> {
        self.segment_for(key).remove(key)
    }

    /// Returns `true` if `key` is present, without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.segment_for(key).contains(key)
    }

    /// Returns the total entry count, summed across segments on demand.
    ///
    /// Under concurrent mutation this is a snapshot approximation.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Returns `true` if no segment holds entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the advertised total capacity (segment capacity × segment
    /// count, both powers of two).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment_for(&self, key: &str) -> &Segment<V> {
        let hash = fnv1a32(key.as_bytes());
        // Widen before shifting: a single-segment cache shifts by 32.
        let idx = ((u64::from(hash)) >> self.shift) as usize & self.mask;
        &self.segments[idx]
    }

    #[cfg(test)]
    fn segment_lengths(&self) -> Vec<usize> {
        self.segments.iter().map(Segment::len).collect()
    }
}

#[cfg(feature = "metrics")]
impl<V> ShardedLruCache<V> {
    /// Returns a point-in-time copy of the cache's counter sink.
    pub fn counters_snapshot(&self) -> CacheCountersSnapshot {
        use std::sync::atomic::Ordering;
        CacheCountersSnapshot {
            sets: self.counters.sets.load(Ordering::Relaxed),
            gets: self.counters.gets.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            deletes: self.counters.deletes.load(Ordering::Relaxed),
            exists: self.counters.exists.load(Ordering::Relaxed),
            evicts: self.counters.evicts.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<V> MetricsSnapshotProvider<CacheCountersSnapshot> for ShardedLruCache<V> {
    fn snapshot(&self) -> CacheCountersSnapshot {
        self.counters_snapshot()
    }
}

impl<V: Send + Sync> ConcurrentCache<V> for ShardedLruCache<V> {
    fn insert(&self, key: &str, value: V) -> Option<Arc<V>> {
        ShardedLruCache::insert(self, key, value)
    }

    fn get(&self, key: &str) -> Option<Arc<V>> {
        ShardedLruCache::get(self, key)
    }

    fn remove(&self, key: &str) -> Option<Arc<V>> {
        ShardedLruCache::remove(self, key)
    }

    fn contains(&self, key: &str) -> bool {
        ShardedLruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        ShardedLruCache::len(self)
    }

    fn capacity(&self) -> usize {
        ShardedLruCache::capacity(self)
    }
}

impl<V> fmt::Debug for ShardedLruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("segments", &self.segments.len())
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_segment_cache(capacity: usize) -> ShardedLruCache<i64> {
        ShardedLruCache::new(CacheOptions::new().concurrency(1).capacity(capacity)).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn capacity_rounds_up_per_segment() {
            let tests = [(127, 128), (128, 128), (129, 256)];
            for (input, want) in tests {
                let cache: ShardedLruCache<i64> =
                    ShardedLruCache::new(CacheOptions::new().capacity(input)).unwrap();
                assert_eq!(cache.capacity(), want, "capacity {}", input);
            }
        }

        #[test]
        fn concurrency_rounds_up_to_power_of_two() {
            let tests = [(15, 16), (16, 16), (17, 32)];
            for (input, want) in tests {
                let cache: ShardedLruCache<i64> =
                    ShardedLruCache::new(CacheOptions::new().concurrency(input)).unwrap();
                assert_eq!(cache.segment_count(), want, "concurrency {}", input);
            }
        }

        #[test]
        fn capacity_clamps_to_the_maximum() {
            use crate::cache::options::MAX_CAPACITY;
            let cache: ShardedLruCache<i64> =
                ShardedLruCache::new(CacheOptions::new().capacity(MAX_CAPACITY + 1)).unwrap();
            assert_eq!(cache.capacity(), MAX_CAPACITY);
        }

        #[test]
        fn invalid_options_never_yield_an_instance() {
            assert!(ShardedLruCache::<i64>::new(CacheOptions::new().capacity(0)).is_err());
            assert!(ShardedLruCache::<i64>::new(CacheOptions::new().concurrency(0)).is_err());
        }

        #[test]
        fn defaults_advertise_requested_shape() {
            let cache: ShardedLruCache<i64> = ShardedLruCache::with_defaults();
            assert_eq!(cache.segment_count(), 16);
            assert_eq!(cache.capacity(), 8192);
        }
    }

    mod operations {
        use super::*;

        #[test]
        fn insert_get_roundtrip() {
            let cache = single_segment_cache(64);
            assert!(cache.insert("k", 7).is_none());
            assert_eq!(*cache.get("k").unwrap(), 7);
        }

        #[test]
        fn insert_returns_previous_value() {
            let cache = single_segment_cache(64);
            cache.insert("k", 1);
            let previous = cache.insert("k", 2).unwrap();
            assert_eq!(*previous, 1);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn insert_arc_shares_the_same_allocation() {
            let cache: ShardedLruCache<String> = ShardedLruCache::with_defaults();
            let shared = Arc::new("payload".to_string());
            cache.insert_arc("k", Arc::clone(&shared));
            let fetched = cache.get("k").unwrap();
            assert!(Arc::ptr_eq(&shared, &fetched));
        }

        #[test]
        fn remove_reports_presence() {
            let cache = single_segment_cache(64);
            cache.insert("k", 1);
            assert!(cache.remove("k").is_some());
            assert!(cache.remove("k").is_none());
            assert!(!cache.contains("k"));
        }

        #[test]
        fn len_sums_across_segments() {
            let cache: ShardedLruCache<i64> =
                ShardedLruCache::new(CacheOptions::new().concurrency(4).capacity(1024)).unwrap();
            for i in 0..100i64 {
                cache.insert(&i.to_string(), i);
            }
            assert_eq!(cache.len(), 100);
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn single_segment_keeps_exactly_the_most_recent_entries() {
            let capacity = 64i64;
            let cache = single_segment_cache(capacity as usize);
            for i in 0..2 * capacity {
                cache.insert(&i.to_string(), i);
            }

            assert_eq!(cache.len(), capacity as usize);
            for i in 0..capacity {
                assert!(!cache.contains(&i.to_string()), "should be evicted: {}", i);
            }
            for i in capacity..2 * capacity {
                assert_eq!(*cache.get(&i.to_string()).unwrap(), i);
            }
        }

        #[test]
        fn sharded_eviction_stays_within_fuzz_margin() {
            // With multiple segments the hash spreads keys unevenly, so only
            // the far ends of the insertion sequence are deterministic.
            let cache: ShardedLruCache<i64> =
                ShardedLruCache::new(CacheOptions::new().capacity(8192)).unwrap();
            for i in 0..2 * 8192i64 {
                cache.insert(&i.to_string(), i);
            }
            for i in 0..4096i64 {
                assert!(cache.get(&i.to_string()).is_none(), "should not exist: {}", i);
            }
            for i in 12288..16384i64 {
                assert!(cache.get(&i.to_string()).is_some(), "should exist: {}", i);
            }
        }

        #[test]
        fn read_promotes_entry_out_of_eviction_order() {
            let cache = single_segment_cache(4);
            for i in 0..4i64 {
                cache.insert(&i.to_string(), i);
            }

            // "0" is oldest; reading it shifts eviction onto "1"
            cache.get("0");
            cache.insert("4", 4);

            assert!(cache.contains("0"));
            assert!(!cache.contains("1"));
        }

        #[test]
        fn deleted_keys_stay_deleted() {
            let cache = single_segment_cache(1024);
            for i in 0..2048i64 {
                cache.insert(&i.to_string(), i);
            }
            for i in 1536..2048i64 {
                cache.remove(&i.to_string());
            }
            for i in 1536..2048i64 {
                assert!(cache.get(&i.to_string()).is_none(), "should not exist: {}", i);
            }
        }
    }

    mod routing {
        use super::*;

        #[test]
        fn segments_stay_balanced_for_sequential_keys() {
            let cache: ShardedLruCache<i64> =
                ShardedLruCache::new(CacheOptions::new().capacity(8192)).unwrap();
            for i in 0..8192i64 {
                cache.insert(&i.to_string(), i);
            }

            let total = cache.len() as f64;
            let segments = cache.segment_count() as f64;
            let threshold = 0.5;
            for (idx, len) in cache.segment_lengths().into_iter().enumerate() {
                let max_len = total * (1.0 + threshold) / segments;
                let min_len = total * (1.0 - threshold) / segments;
                let got = len as f64;
                assert!(
                    got >= min_len && got <= max_len,
                    "segment {} len {} outside [{}, {}]",
                    idx,
                    got,
                    min_len,
                    max_len
                );
            }
        }

        #[test]
        fn routing_is_deterministic() {
            let cache: ShardedLruCache<i64> =
                ShardedLruCache::new(CacheOptions::new().concurrency(8).capacity(1024)).unwrap();
            cache.insert("stable-key", 1);
            for _ in 0..10 {
                assert!(cache.contains("stable-key"));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod counters {
        use super::*;

        #[test]
        fn snapshot_reflects_operations_and_gauges() {
            let cache = single_segment_cache(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("c", 3); // evicts "a"
            cache.get("b"); // hit
            cache.get("a"); // miss
            cache.contains("b");
            cache.remove("b");

            let snapshot = cache.counters_snapshot();
            assert_eq!(snapshot.sets, 3);
            assert_eq!(snapshot.evicts, 1);
            assert_eq!(snapshot.gets, 2);
            assert_eq!(snapshot.hits, 1);
            assert_eq!(snapshot.exists, 1);
            assert_eq!(snapshot.deletes, 1);
            assert_eq!(snapshot.len, 1);
            assert_eq!(snapshot.capacity, 2);
        }
    }

    mod capability {
        use super::*;
        use crate::traits::ConcurrentCache;

        #[test]
        fn cache_trait_delegates_to_the_engine() {
            let cache = single_segment_cache(64);
            let capability: &dyn ConcurrentCache<i64> = &cache;

            capability.insert("k", 9);
            assert_eq!(*capability.get("k").unwrap(), 9);
            assert!(capability.contains("k"));
            assert_eq!(capability.len(), 1);
            assert_eq!(capability.capacity(), 64);
            assert!(capability.remove("k").is_some());
            assert!(capability.is_empty());
        }
    }
}
