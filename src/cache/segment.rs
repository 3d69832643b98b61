//! # Cache Segment
//!
//! One partition of the sharded cache: a single-lock bounded key/value store
//! with strict LRU eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        Segment<V>                             │
//!   │                                                               │
//!   │   ┌───────────────────────────────────────────────────────┐   │
//!   │   │               RwLock<SegmentCore<V>>                  │   │
//!   │   └───────────────────────────────────────────────────────┘   │
//!   │                           │                                   │
//!   │                           ▼                                   │
//!   │   ┌───────────────────────────────────────────────────────┐   │
//!   │   │  index: FxHashMap<Box<str>, SlotIndex>                │   │
//!   │   │  entries: RecencyList<V>   (MRU ◄──► LRU chain)       │   │
//!   │   │  cap: usize                                           │   │
//!   │   └───────────────────────────────────────────────────────┘   │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Discipline
//!
//! | Operation    | Lock  | Why                                        |
//! |--------------|-------|--------------------------------------------|
//! | `insert`     | Write | Mutates index, chain, may evict            |
//! | `get`        | Write | A hit promotes the entry to MRU            |
//! | `remove`     | Write | Mutates index and chain                    |
//! | `contains`   | Read  | Membership only, no promotion              |
//! | `len`        | Read  | Reads current size                         |
//!
//! No operation ever holds more than this segment's lock, so the sharded
//! cache is deadlock-free by construction.
//!
//! ## Invariants
//!
//! - `len <= cap` after every operation returns.
//! - Index keys and chain entries are in 1:1 correspondence.
//! - Chain head is the most-recently-touched key, tail the least.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::ds::{RecencyList, SlotIndex};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheCounterRecorder, CacheCounters};

struct SegmentCore<V> {
    index: FxHashMap<Box<str>, SlotIndex>,
    entries: RecencyList<V>,
    cap: usize,
}

/// One independently locked partition of the sharded cache.
pub struct Segment<V> {
    inner: RwLock<SegmentCore<V>>,
    #[cfg(feature = "metrics")]
    counters: Arc<CacheCounters>,
}

impl<V> Segment<V> {
    #[cfg(feature = "metrics")]
    pub(crate) fn new(cap: usize, counters: Arc<CacheCounters>) -> Self {
        Self {
            inner: RwLock::new(SegmentCore {
                index: FxHashMap::default(),
                entries: RecencyList::new(),
                cap,
            }),
            counters,
        }
    }

    #[cfg(not(feature = "metrics"))]
    pub(crate) fn new(cap: usize) -> Self {
        Self {
            inner: RwLock::new(SegmentCore {
                index: FxHashMap::default(),
                entries: RecencyList::new(),
                cap,
            }),
        }
    }

    /// Stores `value` under `key` at the most-recently-used position.
    ///
    /// Replaces and returns the previous value if the key exists. A fresh
    /// key that pushes the segment past its capacity evicts exactly one
    /// least-recently-used entry.
    pub fn insert(&self, key: &str, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.counters.record_set();

        let mut core = self.inner.write();

        if let Some(&idx) = core.index.get(key) {
            core.entries.move_to_front(idx);
            return core.entries.replace_value(idx, value);
        }

        let idx = core.entries.push_front(key.into(), value);
        core.index.insert(key.into(), idx);

        if core.entries.len() > core.cap {
            #[cfg(feature = "metrics")]
            self.counters.record_evict();
            if let Some((evicted_key, _)) = core.entries.pop_back() {
                core.index.remove(&evicted_key);
            }
        }
        None
    }

    /// Looks up `key`, promoting a hit to the most-recently-used position.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.counters.record_get();

        let mut core = self.inner.write();
        let idx = match core.index.get(key) {
            Some(&idx) => idx,
            None => return None,
        };

        #[cfg(feature = "metrics")]
        self.counters.record_hit();

        core.entries.move_to_front(idx);
        core.entries.value(idx).cloned()
    }

    /// Removes `key`, returning its value if present. Recency order of the
    /// remaining entries is untouched.
    pub fn remove(&self, key: &str) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.counters.record_delete();

        let mut core = self.inner.write();
        let idx = core.index.remove(key)?;
        core.entries.remove(idx).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present. Does not alter recency order.
    pub fn contains(&self, key: &str) -> bool {
        #[cfg(feature = "metrics")]
        self.counters.record_exists();

        let core = self.inner.read();
        core.index.contains_key(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let core = self.inner.read();
        core.entries.len()
    }

    /// Returns `true` if the segment holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed per-segment capacity.
    pub fn cap(&self) -> usize {
        let core = self.inner.read();
        core.cap
    }

    #[cfg(any(test, debug_assertions))]
    /// Verifies index/chain agreement and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let core = self.inner.read();
        core.entries.debug_validate_invariants();

        if core.entries.len() > core.cap {
            return Err(InvariantError::new(format!(
                "segment over capacity: len {} cap {}",
                core.entries.len(),
                core.cap
            )));
        }
        if core.index.len() != core.entries.len() {
            return Err(InvariantError::new(format!(
                "index and chain length mismatch: {} vs {}",
                core.index.len(),
                core.entries.len()
            )));
        }
        for (key, &idx) in &core.index {
            match core.entries.key(idx) {
                Some(entry_key) if entry_key == &**key => {}
                Some(entry_key) => {
                    return Err(InvariantError::new(format!(
                        "index entry {:?} points at chain entry {:?}",
                        key, entry_key
                    )));
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry {:?} points at a freed slot",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<V> std::fmt::Debug for Segment<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.inner.read();
        f.debug_struct("Segment")
            .field("len", &core.entries.len())
            .field("cap", &core.cap)
            .finish_non_exhaustive()
    }
}
