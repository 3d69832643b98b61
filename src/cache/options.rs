//! Cache configuration and shape normalization.
//!
//! A [`CacheOptions`] carries the caller's requested `concurrency` (segment
//! count) and `capacity` (total entries). Both are requests, not guarantees:
//! construction clamps them to fixed maxima and rounds them up to powers of
//! two so that segment routing reduces to a shift and a mask.
//!
//! ```text
//!   requested                normalized
//!   ──────────               ──────────
//!   concurrency 17      ──►  segments 32        (next power of two)
//!   capacity 129        ──►  per-segment 8      (ceil(129/32)=5 → 8)
//!                            advertised 256     (8 × 32)
//! ```
//!
//! The advertised total may exceed the request; callers should read back
//! [`ShardedLruCache::capacity`](crate::cache::ShardedLruCache::capacity)
//! rather than assume their input is exact.

use crate::error::ConfigError;

/// Maximum number of segments a cache may be sharded into.
pub const MAX_SEGMENTS: usize = 1 << 16;

/// Maximum total entry capacity a cache may advertise.
pub const MAX_CAPACITY: usize = 1 << 30;

/// Default requested segment count.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Default requested total capacity.
pub const DEFAULT_CAPACITY: usize = 8192;

/// Construction-time configuration for a [`ShardedLruCache`](crate::cache::ShardedLruCache).
///
/// # Example
///
/// ```
/// use shardkit::cache::{CacheOptions, ShardedLruCache};
///
/// let cache: ShardedLruCache<String> =
///     ShardedLruCache::new(CacheOptions::new().concurrency(8).capacity(1024)).unwrap();
/// assert_eq!(cache.capacity(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    concurrency: usize,
    capacity: usize,
}

impl CacheOptions {
    /// Creates options with the default concurrency and capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the desired segment count. Rounded up to the next power of two
    /// and clamped to [`MAX_SEGMENTS`] during construction.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the desired total entry capacity. Clamped to [`MAX_CAPACITY`]
    /// during construction; the advertised capacity may round up.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn requested_concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn requested_capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Normalized cache shape: immutable routing and sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shape {
    pub segments: usize,
    pub segment_capacity: usize,
    pub shift: u32,
    pub mask: usize,
    pub total_capacity: usize,
}

/// Validates options and derives power-of-two sizes best matching them.
pub(crate) fn normalize(options: &CacheOptions) -> Result<Shape, ConfigError> {
    if options.capacity == 0 {
        return Err(ConfigError::new("lru capacity must be greater than zero"));
    }
    if options.concurrency == 0 {
        return Err(ConfigError::new(
            "lru concurrency must be greater than zero",
        ));
    }

    let concurrency = options.concurrency.min(MAX_SEGMENTS);
    let capacity = options.capacity.min(MAX_CAPACITY);

    let mut shift_bits = 0u32;
    let mut segments = 1usize;
    while segments < concurrency {
        shift_bits += 1;
        segments <<= 1;
    }

    let mut per_segment = capacity / segments;
    if per_segment * segments < capacity {
        per_segment += 1;
    }
    let mut segment_capacity = 1usize;
    while segment_capacity < per_segment {
        segment_capacity <<= 1;
    }

    Ok(Shape {
        segments,
        segment_capacity,
        shift: 32 - shift_bits,
        mask: segments - 1,
        total_capacity: segment_capacity * segments,
    })
}
