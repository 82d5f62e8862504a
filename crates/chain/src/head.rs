use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Monotonic view of the latest canonical block number.
///
/// Handles are cheap to clone and share one atomic scalar. Readers never
/// lock; every reader sees a value at least as large as any value it has
/// read before. Writes go through [`ChainHead::advance`], which discards
/// decreases so shallow reorgs cannot move the view backwards.
#[derive(Debug, Clone, Default)]
pub struct ChainHead {
    latest: Arc<AtomicU64>,
}

impl ChainHead {
    /// Create a head tracker starting at `latest`.
    pub fn new(latest: u64) -> Self {
        Self { latest: Arc::new(AtomicU64::new(latest)) }
    }

    /// The latest observed block number.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Record a newly observed head. Returns `false` if `number` does not
    /// exceed the current view, in which case the write is discarded.
    pub fn advance(&self, number: u64) -> bool {
        self.latest.fetch_max(number, Ordering::AcqRel) < number
    }
}
