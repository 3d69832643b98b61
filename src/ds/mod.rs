pub mod recency_list;

pub use recency_list::{RecencyList, SlotIndex};
