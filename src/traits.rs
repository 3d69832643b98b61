//! # Capability Traits
//!
//! This module defines the two capability contracts exposed by the crate,
//! keeping callers decoupled from the concrete engines.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────┐  ┌─────────────────────────────────────┐
//!   │        ConcurrentCache<V>           │  │          ConsistentHash             │
//!   │                                     │  │                                     │
//!   │  insert(&, &str, V) → Option<Arc>   │  │  type Node                          │
//!   │  get(&, &str) → Option<Arc<V>>      │  │  add(&, Node)                       │
//!   │  remove(&, &str) → Option<Arc<V>>   │  │  remove(&, &Node)                   │
//!   │  contains(&, &str) → bool           │  │  get(&, &str) → Option<Node>        │
//!   │  len(&) → usize                     │  │                                     │
//!   │  capacity(&) → usize                │  └──────────────────┬──────────────────┘
//!   └──────────────────┬──────────────────┘                     │
//!                      │                                        ▼
//!                      ▼                                   ring::Ring<N>
//!            cache::ShardedLruCache<V>
//! ```
//!
//! All methods take `&self`: implementations synchronize internally, and
//! every operation is total once construction has validated its inputs.
//! Absence is an `Option`/`bool` result, never an error.
//!
//! Node identity on the ring is a stable string projection: ring node types
//! implement [`std::fmt::Display`], and two values whose projections are
//! equal are the same ring member.

use std::sync::Arc;

/// A thread-safe bounded key/value cache.
///
/// Implemented by [`ShardedLruCache`](crate::cache::ShardedLruCache). Values
/// are shared as `Arc<V>` so callers can keep references past eviction
/// without requiring `V: Clone`.
pub trait ConcurrentCache<V>: Send + Sync {
    /// Stores `value` under `key`, returning the previous value if the key
    /// was already present.
    fn insert(&self, key: &str, value: V) -> Option<Arc<V>>;

    /// Looks up `key`. A hit counts as a use event and may reorder eviction
    /// candidates.
    fn get(&self, key: &str) -> Option<Arc<V>>;

    /// Removes `key`, returning its value if it was present.
    fn remove(&self, key: &str) -> Option<Arc<V>>;

    /// Returns `true` if `key` is present, without counting as a use event.
    fn contains(&self, key: &str) -> bool;

    /// Returns the current number of entries. Under concurrent mutation this
    /// is a snapshot approximation, not a linearizable count.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed total capacity established at construction.
    fn capacity(&self) -> usize;
}

/// Routes keys to members of a dynamic node set with minimal remapping on
/// membership change.
///
/// Implemented by [`Ring`](crate::ring::Ring).
pub trait ConsistentHash {
    /// The node type; identity is its `Display` projection.
    type Node;

    /// Adds a node to the member set.
    fn add(&self, node: Self::Node);

    /// Removes a node from the member set.
    fn remove(&self, node: &Self::Node);

    /// Returns the node owning `key`, or `None` if no nodes are present.
    fn get(&self, key: &str) -> Option<Self::Node>;
}
