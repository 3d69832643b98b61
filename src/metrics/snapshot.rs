/// Point-in-time copy of one cache instance's counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheCountersSnapshot {
    pub sets: u64,
    pub gets: u64,
    pub hits: u64,
    pub deletes: u64,
    pub exists: u64,
    pub evicts: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

/// Point-in-time copy of one ring instance's counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingCountersSnapshot {
    pub adds: u64,
    pub removes: u64,
    pub gets: u64,

    // gauge captured at snapshot time
    pub points: usize,
}
