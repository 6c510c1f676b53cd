//! Pool statistics tracking

/// Counters for a [`PoolAllocator`](super::PoolAllocator).
///
/// Only maintained when [`PoolConfig::track_stats`](super::PoolConfig) is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Successful allocations
    pub allocation_count: usize,
    /// Successful frees
    pub deallocation_count: usize,
    /// Resizes that moved a region
    pub relocation_count: usize,
    /// Resizes satisfied in place
    pub in_place_resize_count: usize,
    /// Allocations that failed for lack of space or metadata
    pub failed_allocations: usize,
    /// Descriptor splits
    pub split_count: usize,
    /// Descriptor merges
    pub coalesce_count: usize,
    /// Bytes currently allocated
    pub allocated_bytes: usize,
    /// High-water mark of `allocated_bytes`
    pub peak_allocated_bytes: usize,
}

impl PoolStats {
    /// Creates a new empty stats object
    pub const fn new() -> Self {
        Self {
            allocation_count: 0,
            deallocation_count: 0,
            relocation_count: 0,
            in_place_resize_count: 0,
            failed_allocations: 0,
            split_count: 0,
            coalesce_count: 0,
            allocated_bytes: 0,
            peak_allocated_bytes: 0,
        }
    }

    /// Reset all statistics to zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fraction of allocation attempts that succeeded (1.0 when none were made)
    pub fn allocation_efficiency(&self) -> f64 {
        let total_attempts = self.allocation_count + self.failed_allocations;
        if total_attempts > 0 {
            self.allocation_count as f64 / total_attempts as f64
        } else {
            1.0
        }
    }

    pub(super) fn record_alloc(&mut self, size: usize) {
        self.allocation_count += 1;
        self.allocated_bytes += size;
        self.peak_allocated_bytes = self.peak_allocated_bytes.max(self.allocated_bytes);
    }

    pub(super) fn record_free(&mut self, size: usize) {
        self.deallocation_count += 1;
        self.allocated_bytes = self.allocated_bytes.saturating_sub(size);
    }
}
