//! Consistent hash ring.
//!
//! Maintains an ordered set of virtual-node hash points mapping to physical
//! nodes and answers "which node owns this key" in logarithmic time, with
//! minimal remapping when membership changes.

pub mod ringhash;

pub use ringhash::{Ring, MIN_REPLICAS};
