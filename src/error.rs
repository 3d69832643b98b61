//! Error types for the shardkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero cache capacity or concurrency, ring replicas below the minimum).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! Construction is the only fallible surface. Every runtime operation is
//! total: "key not found" and "ring empty" are expressed as `Option`/`bool`
//! results, never as errors.
//!
//! ## Example Usage
//!
//! ```
//! use shardkit::cache::{CacheOptions, ShardedLruCache};
//! use shardkit::error::ConfigError;
//!
//! let cache: Result<ShardedLruCache<i32>, ConfigError> =
//!     ShardedLruCache::new(CacheOptions::new().capacity(1024));
//! assert!(cache.is_ok());
//!
//! // Invalid configuration is caught without panicking
//! let bad = ShardedLruCache::<i32>::new(CacheOptions::new().capacity(0));
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ShardedLruCache::new`](crate::cache::ShardedLruCache::new) and
/// [`Ring::new`](crate::ring::Ring::new). Carries a human-readable
/// description of which parameter failed validation. A failed construction
/// never yields a partial instance.
///
/// # Example
///
/// ```
/// use shardkit::ring::Ring;
///
/// let err = Ring::<String>::new(0).unwrap_err();
/// assert!(err.to_string().contains("replicas"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by debug-only `check_invariants` methods (e.g.
/// [`Segment::check_invariants`](crate::cache::Segment::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
