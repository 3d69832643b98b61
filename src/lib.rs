//! shardkit: sharded LRU caching and consistent-hash routing primitives.
//!
//! Two independent engines: a concurrency-sharded bounded LRU cache
//! ([`cache::ShardedLruCache`]) and a consistent hash ring ([`ring::Ring`])
//! for routing keys across a dynamic node set with minimal remapping.

pub mod cache;
pub mod ds;
pub mod error;
pub mod hash;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod ring;
pub mod traits;
