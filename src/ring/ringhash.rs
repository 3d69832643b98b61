//! # Consistent Hash Ring
//!
//! Routes keys to a dynamic set of nodes. Each physical node occupies
//! `replicas` virtual points on a 32-bit hash circle; a key belongs to the
//! node owning the first point at or after the key's own hash, wrapping
//! around at the top.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          Ring<N>                                 │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │                  Mutex<RingState<N>>                     │   │
//!   │   │                                                          │   │
//!   │   │  vnodes: FxHashMap<u32, N>     point ─► owning node      │   │
//!   │   │  sorted: Vec<u32>              ascending point index     │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   │                                                                  │
//!   │   node "a", replicas 3  ─►  points fnv1a32("a_1"),               │
//!   │                             fnv1a32("a_2"), fnv1a32("a_3")       │
//!   │                                                                  │
//!   │   get(key):  h = fnv1a32(key)                                    │
//!   │              first sorted point ≥ h, else wrap to smallest       │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Properties
//!
//! - **Deterministic placement**: points derive from the node's `Display`
//!   projection alone; re-adding the same logical node always produces the
//!   same points, and independently built rings fed the same membership
//!   agree on every lookup.
//! - **All-or-nothing mutation**: `add` inserts either every replica point
//!   or none; `remove` deletes either every expected point or none. A
//!   single colliding point aborts the whole call: re-adding a present
//!   node is therefore an idempotent no-op, but an incidental hash
//!   collision with an unrelated node silently drops that add as well.
//! - **Single lock**: one mutex serializes `add`, `remove`, and `get`.
//!   Membership churn is expected to be rare relative to lookups, but
//!   lookups do serialize behind mutations.
//!
//! ## Complexity
//!
//! `get` is O(log points). `add`/`remove` pay an O(points · log points)
//! re-sort per call, acceptable at rare-mutation frequency.

use std::fmt::{self, Display};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::hash::fnv1a32;
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, RingCounterRecorder, RingCounters, RingCountersSnapshot,
};
use crate::traits::ConsistentHash;

/// Minimum virtual points per physical node.
pub const MIN_REPLICAS: usize = 1;

struct RingState<N> {
    vnodes: FxHashMap<u32, N>,
    sorted: Vec<u32>,
}

/// Consistent hash ring over nodes identified by their `Display` projection.
///
/// # Example
///
/// ```
/// use shardkit::ring::Ring;
///
/// let ring: Ring<String> = Ring::new(32).unwrap();
/// ring.add("cache-1.internal:6379".to_string());
/// ring.add("cache-2.internal:6379".to_string());
///
/// let owner = ring.get("user:42").unwrap();
/// assert!(owner.starts_with("cache-"));
/// ```
pub struct Ring<N> {
    replicas: usize,
    state: Mutex<RingState<N>>,
    #[cfg(feature = "metrics")]
    counters: RingCounters,
}

impl<N: Display + Clone> Ring<N> {
    /// Creates an empty ring placing `replicas` points per node.
    ///
    /// Fails with [`ConfigError`] when `replicas` is below [`MIN_REPLICAS`].
    /// The replica count is fixed for the ring's lifetime.
    pub fn new(replicas: usize) -> Result<Self, ConfigError> {
        if replicas < MIN_REPLICAS {
            return Err(ConfigError::new(format!(
                "ring replicas must be at least {}, got {}",
                MIN_REPLICAS, replicas
            )));
        }
        Ok(Self {
            replicas,
            state: Mutex::new(RingState {
                vnodes: FxHashMap::default(),
                sorted: Vec::new(),
            }),
            #[cfg(feature = "metrics")]
            counters: RingCounters::new(),
        })
    }

    /// Returns the configured points-per-node count.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Adds `node`, placing all of its replica points.
    ///
    /// If any candidate point is already present (or two candidates
    /// coincide), the entire add is aborted and the ring is unchanged.
    /// Re-adding a node that is already a member is therefore a no-op.
    pub fn add(&self, node: N) {
        #[cfg(feature = "metrics")]
        self.counters.record_add();

        let points = self.points_for(&node.to_string());
        let mut state = self.state.lock();

        let mut fresh = std::collections::HashSet::with_capacity(points.len());
        for &point in &points {
            if state.vnodes.contains_key(&point) || !fresh.insert(point) {
                return;
            }
        }

        for &point in &points {
            state.vnodes.insert(point, node.clone());
            state.sorted.push(point);
        }
        state.sorted.sort_unstable();
    }

    /// Removes `node` and all of its replica points.
    ///
    /// If any expected point is absent, the entire remove is aborted and the
    /// ring is unchanged.
    pub fn remove(&self, node: &N) {
        #[cfg(feature = "metrics")]
        self.counters.record_remove();

        let points = self.points_for(&node.to_string());
        let mut state = self.state.lock();

        if points.iter().any(|point| !state.vnodes.contains_key(point)) {
            return;
        }

        let state = &mut *state;
        for point in &points {
            state.vnodes.remove(point);
        }
        state.sorted.retain(|point| !points.contains(point));
    }

    /// Returns the node owning `key`, or `None` on an empty ring.
    ///
    /// The owner is the node holding the first point at or after the key's
    /// hash; a key hashing past every point wraps to the smallest one.
    pub fn get(&self, key: &str) -> Option<N> {
        #[cfg(feature = "metrics")]
        self.counters.record_get();

        let hash = fnv1a32(key.as_bytes());
        let state = self.state.lock();
        if state.sorted.is_empty() {
            return None;
        }

        let mut idx = state.sorted.partition_point(|&point| point < hash);
        // Past the last point means we have cycled back to the first.
        if idx == state.sorted.len() {
            idx = 0;
        }
        state.vnodes.get(&state.sorted[idx]).cloned()
    }

    /// Returns the current number of points on the ring.
    pub fn point_count(&self) -> usize {
        let state = self.state.lock();
        state.sorted.len()
    }

    /// Returns `true` if the ring holds no points.
    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    fn points_for(&self, name: &str) -> Vec<u32> {
        (1..=self.replicas)
            .map(|i| fnv1a32(format!("{}_{}", name, i).as_bytes()))
            .collect()
    }
}

#[cfg(feature = "metrics")]
impl<N> Ring<N> {
    /// Returns a point-in-time copy of the ring's counter sink.
    pub fn counters_snapshot(&self) -> RingCountersSnapshot {
        use std::sync::atomic::Ordering;
        RingCountersSnapshot {
            adds: self.counters.adds.load(Ordering::Relaxed),
            removes: self.counters.removes.load(Ordering::Relaxed),
            gets: self.counters.gets.load(Ordering::Relaxed),
            points: self.state.lock().sorted.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<N> MetricsSnapshotProvider<RingCountersSnapshot> for Ring<N> {
    fn snapshot(&self) -> RingCountersSnapshot {
        self.counters_snapshot()
    }
}

impl<N: Display + Clone> ConsistentHash for Ring<N> {
    type Node = N;

    fn add(&self, node: N) {
        Ring::add(self, node)
    }

    fn remove(&self, node: &N) {
        Ring::remove(self, node)
    }

    fn get(&self, key: &str) -> Option<N> {
        Ring::get(self, key)
    }
}

impl<N> fmt::Debug for Ring<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("points", &state.sorted.len())
            .finish_non_exhaustive()
    }
}
