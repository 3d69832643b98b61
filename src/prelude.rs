pub use crate::cache::{CacheOptions, Segment, ShardedLruCache};
pub use crate::ds::{RecencyList, SlotIndex};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::hash::fnv1a32;
pub use crate::ring::Ring;
pub use crate::traits::{ConcurrentCache, ConsistentHash};

#[cfg(feature = "metrics")]
pub use crate::metrics::{CacheCountersSnapshot, PrometheusTextExporter, RingCountersSnapshot};
