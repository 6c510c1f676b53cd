//! Main pool allocator implementation
//!
//! One owned byte buffer plus a descriptor chain describing it:
//!
//! ```text
//!   offset 0                                                capacity
//!   ├── 16 used ──┼──── 32 free ────┼── 8 used ─┼──── 8 free ────┤
//!        ▲                ▲               ▲            ▲
//!      desc ─────────▶  desc ─────────▶ desc ─────▶  desc ──▶ none
//! ```
//!
//! ## Invariants
//!
//! - Descriptors partition `[0, capacity)` exactly, in chain order
//! - Every descriptor has `size > 0`
//! - No two neighbouring descriptors are both free once an operation returns
//! - A [`Location`] is only honoured if it is the start of a live descriptor

use std::fmt;
use std::ops::Range;

use super::config::{PoolConfig, ZeroSizePolicy};
use super::descriptor::{BlockId, DESCRIPTOR_SIZE, Descriptor, DescriptorArena};
use super::stats::PoolStats;
use super::status::{BlockStatus, PoolStatus};
use crate::core::Location;
use crate::error::{MemoryError, MemoryResult};

/// First-fit allocator over a single fixed-size pool
///
/// Starts uninitialized when built with [`PoolAllocator::new`]; every
/// operation other than [`init`](Self::init) fails with
/// [`MemoryError::UninitializedUse`] until the pool exists.
pub struct PoolAllocator {
    /// Backing buffer, `None` while uninitialized
    memory: Option<Box<[u8]>>,

    /// Address-ordered block chain
    blocks: DescriptorArena,

    /// Configuration
    config: PoolConfig,

    /// Statistics (only updated if enabled)
    stats: PoolStats,
}

impl PoolAllocator {
    /// Creates an uninitialized allocator
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            memory: None,
            blocks: DescriptorArena::new(),
            config,
            stats: PoolStats::new(),
        }
    }

    /// Creates and initializes a pool with the default configuration
    pub fn with_capacity(capacity: usize) -> MemoryResult<Self> {
        Self::with_config(capacity, PoolConfig::default())
    }

    /// Creates and initializes a pool with custom configuration
    pub fn with_config(capacity: usize, config: PoolConfig) -> MemoryResult<Self> {
        let mut pool = Self::new(config);
        pool.init(capacity)?;
        Ok(pool)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Allocate the backing buffer and cover it with one free block
    ///
    /// # Errors
    /// - [`MemoryError::AlreadyInitialized`] if the pool already exists
    ///   (the existing pool is left untouched)
    /// - [`MemoryError::InvalidConfig`] for a zero capacity or bad config
    pub fn init(&mut self, capacity: usize) -> MemoryResult<()> {
        if self.memory.is_some() {
            return Err(MemoryError::already_initialized(self.capacity()));
        }
        self.config.validate()?;
        if capacity == 0 {
            return Err(MemoryError::invalid_config("pool capacity must be non-zero"));
        }

        let mut buffer = vec![0u8; capacity].into_boxed_slice();
        if let Some(pattern) = self.config.free_pattern {
            buffer.fill(pattern);
        }

        self.memory = Some(buffer);
        self.blocks.reset(capacity);
        self.stats.reset();

        #[cfg(feature = "logging")]
        poolkit_log::debug!(capacity, "pool initialized");
        Ok(())
    }

    /// Release the backing buffer and every descriptor
    ///
    /// The allocator returns to the uninitialized state and may be
    /// initialized again.
    pub fn deinit(&mut self) -> MemoryResult<()> {
        let Some(memory) = self.memory.take() else {
            return Err(MemoryError::uninitialized("deinit"));
        };
        self.blocks.clear();

        #[cfg(feature = "logging")]
        poolkit_log::debug!(capacity = memory.len(), "pool deinitialized");
        drop(memory);
        Ok(())
    }

    /// Whether the pool currently exists
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.memory.is_some()
    }

    /// Total pool bytes (0 while uninitialized)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.memory.as_ref().map_or(0, |memory| memory.len())
    }

    /// Active configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Reserve `size` bytes from the first free block large enough
    ///
    /// A larger block is split: the front `size` bytes become the allocated
    /// region and the rest stays free right after it.
    ///
    /// `size == 0` follows [`PoolConfig::zero_size`]: rejected by default,
    /// or under [`ZeroSizePolicy::Peek`] the first free block's location is
    /// returned *without* reserving anything.
    ///
    /// # Errors
    /// - [`MemoryError::AllocationExhausted`] if no free block is big
    ///   enough; the chain is unchanged
    /// - [`MemoryError::MetadataLimitExceeded`] if the split would need more
    ///   descriptor memory than allowed
    pub fn alloc(&mut self, size: usize) -> MemoryResult<Location> {
        self.ensure_initialized("alloc")?;
        if size == 0 {
            return self.alloc_zero_sized();
        }

        let Some(id) = self.find_first_fit(size) else {
            self.record(|stats| stats.failed_allocations += 1);
            return Err(MemoryError::exhausted(size, self.largest_free_block()));
        };
        let block = self.descriptor(id)?;

        if block.size > size {
            if let Err(error) = self.ensure_metadata_budget() {
                self.record(|stats| stats.failed_allocations += 1);
                return Err(error);
            }
            self.blocks.split(id, size).ok_or_else(|| {
                MemoryError::corruption(format!("cannot split block at offset {}", block.offset))
            })?;
            self.record(|stats| stats.split_count += 1);
        }

        self.descriptor_mut(id)?.is_free = false;
        if let Some(pattern) = self.config.alloc_pattern {
            self.fill(block.offset..block.offset + size, pattern)?;
        }
        self.record(|stats| stats.record_alloc(size));

        #[cfg(feature = "logging")]
        poolkit_log::trace!(offset = block.offset, size, "allocated region");
        Ok(Location::new(block.offset))
    }

    /// Location of the first free block, without reserving it
    pub fn peek_free(&self) -> MemoryResult<Option<Location>> {
        self.ensure_initialized("peek_free")?;
        Ok(self
            .blocks
            .iter()
            .find(|(_, block)| block.is_free)
            .map(|(_, block)| Location::new(block.offset)))
    }

    fn alloc_zero_sized(&mut self) -> MemoryResult<Location> {
        match self.config.zero_size {
            ZeroSizePolicy::Reject => Err(MemoryError::ZeroSizedRequest),
            ZeroSizePolicy::Peek => self
                .peek_free()?
                .ok_or_else(|| MemoryError::exhausted(0, 0)),
        }
    }

    /// Return the region starting at `location` to the pool
    ///
    /// The freed block is merged with a free successor and a free
    /// predecessor, so no two adjacent free blocks survive the call.
    ///
    /// # Errors
    /// [`MemoryError::InvalidHandle`] if no allocated region starts at
    /// `location`; nothing changes in that case.
    pub fn free(&mut self, location: Location) -> MemoryResult<()> {
        self.ensure_initialized("free")?;
        let (previous, id) = self.locate(location)?;
        let block = self.descriptor(id)?;
        if block.is_free {
            return Err(MemoryError::invalid_handle(location, "region is already free"));
        }

        if let Some(pattern) = self.config.free_pattern {
            self.fill(self.checked_range(&block)?, pattern)?;
        }
        self.descriptor_mut(id)?.is_free = true;

        if let Some(next) = block.next
            && self.descriptor(next)?.is_free
        {
            self.merge_with_next(id)?;
        }
        if let Some(previous) = previous
            && self.descriptor(previous)?.is_free
        {
            self.merge_with_next(previous)?;
        }
        self.record(|stats| stats.record_free(block.size));

        #[cfg(feature = "logging")]
        poolkit_log::trace!(offset = block.offset, size = block.size, "freed region");
        Ok(())
    }

    /// Grow the region at `location` to at least `new_size` bytes
    ///
    /// - `None` behaves as [`alloc`](Self::alloc)
    /// - A region already `>= new_size` is returned unchanged (no shrinking)
    /// - Otherwise a fresh region is allocated, the old contents copied over
    ///   and the old region freed
    ///
    /// # Errors
    /// [`MemoryError::InvalidHandle`] for unknown locations, or the
    /// allocation error if no fresh region fits; the original region is
    /// intact in both cases.
    pub fn resize(&mut self, location: Option<Location>, new_size: usize) -> MemoryResult<Location> {
        self.ensure_initialized("resize")?;
        let Some(location) = location else {
            return self.alloc(new_size);
        };

        let (_, id) = self.locate(location)?;
        let block = self.descriptor(id)?;
        if block.is_free {
            return Err(MemoryError::invalid_handle(location, "region is not allocated"));
        }
        if block.size >= new_size {
            self.record(|stats| stats.in_place_resize_count += 1);
            return Ok(location);
        }

        let fresh = self.alloc(new_size)?;
        let copied = block.size.min(new_size);
        self.memory_mut("resize")?
            .copy_within(block.offset..block.offset + copied, fresh.offset());
        self.free(location)?;
        self.record(|stats| stats.relocation_count += 1);

        #[cfg(feature = "logging")]
        poolkit_log::trace!(from = %location, to = %fresh, new_size, "relocated region");
        Ok(fresh)
    }

    // ------------------------------------------------------------------
    // Region access
    // ------------------------------------------------------------------

    /// Bytes of the allocated region starting at `location`
    pub fn region(&self, location: Location) -> MemoryResult<&[u8]> {
        let range = self.allocated_range(location)?;
        let memory = self.memory.as_deref().ok_or(MemoryError::uninitialized("region"))?;
        memory
            .get(range)
            .ok_or_else(|| MemoryError::corruption("region outside pool bounds"))
    }

    /// Mutable bytes of the allocated region starting at `location`
    pub fn region_mut(&mut self, location: Location) -> MemoryResult<&mut [u8]> {
        let range = self.allocated_range(location)?;
        self.memory_mut("region_mut")?
            .get_mut(range)
            .ok_or_else(|| MemoryError::corruption("region outside pool bounds"))
    }

    /// Size of the allocated region starting at `location`
    pub fn region_size(&self, location: Location) -> MemoryResult<usize> {
        Ok(self.allocated_range(location)?.len())
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Read-only snapshot of every block
    pub fn status(&self) -> MemoryResult<PoolStatus> {
        self.ensure_initialized("status")?;
        Ok(PoolStatus {
            capacity: self.capacity(),
            metadata_bytes: self.blocks.metadata_bytes(),
            blocks: self
                .blocks
                .iter()
                .map(|(_, block)| BlockStatus {
                    location: Location::new(block.offset),
                    size: block.size,
                    is_free: block.is_free,
                })
                .collect(),
        })
    }

    /// Bytes in free blocks
    pub fn free_bytes(&self) -> usize {
        self.blocks
            .iter()
            .filter(|(_, block)| block.is_free)
            .map(|(_, block)| block.size)
            .sum()
    }

    /// Bytes in allocated blocks
    pub fn allocated_bytes(&self) -> usize {
        self.capacity() - self.free_bytes()
    }

    /// Size of the largest free block, the biggest request that can succeed
    pub fn largest_free_block(&self) -> usize {
        self.blocks
            .iter()
            .filter(|(_, block)| block.is_free)
            .map(|(_, block)| block.size)
            .max()
            .unwrap_or(0)
    }

    /// Number of descriptors in the chain
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of separate free blocks free space is split into
    pub fn fragment_count(&self) -> usize {
        self.blocks.iter().filter(|(_, block)| block.is_free).count()
    }

    /// Bytes of descriptor bookkeeping
    pub fn metadata_bytes(&self) -> usize {
        self.blocks.metadata_bytes()
    }

    /// Check every chain invariant
    ///
    /// # Errors
    /// [`MemoryError::Corruption`] naming the first violation found.
    pub fn verify(&self) -> MemoryResult<()> {
        self.ensure_initialized("verify")?;
        let capacity = self.capacity();
        let mut expected = 0;
        let mut previous_free = false;
        let mut visited = 0;

        for (_, block) in self.blocks.iter() {
            visited += 1;
            if visited > self.blocks.len() {
                return Err(MemoryError::corruption("descriptor chain contains a cycle"));
            }
            if block.size == 0 {
                return Err(MemoryError::corruption(format!(
                    "empty block at offset {}",
                    block.offset
                )));
            }
            if block.offset != expected {
                return Err(MemoryError::corruption(format!(
                    "block at offset {} should start at {expected}",
                    block.offset
                )));
            }
            if block.is_free && previous_free {
                return Err(MemoryError::corruption(format!(
                    "adjacent free blocks at offset {}",
                    block.offset
                )));
            }
            expected = block.end();
            previous_free = block.is_free;
        }

        if expected != capacity {
            return Err(MemoryError::corruption(format!(
                "blocks cover {expected} of {capacity} bytes"
            )));
        }
        if visited != self.blocks.len() {
            return Err(MemoryError::corruption(format!(
                "{} descriptors unreachable from the chain",
                self.blocks.len() - visited
            )));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    #[inline]
    fn ensure_initialized(&self, operation: &'static str) -> MemoryResult<()> {
        if self.memory.is_some() {
            Ok(())
        } else {
            Err(MemoryError::uninitialized(operation))
        }
    }

    fn memory_mut(&mut self, operation: &'static str) -> MemoryResult<&mut [u8]> {
        self.memory
            .as_deref_mut()
            .ok_or(MemoryError::uninitialized(operation))
    }

    fn record(&mut self, update: impl FnOnce(&mut PoolStats)) {
        if self.config.track_stats {
            update(&mut self.stats);
        }
    }

    fn descriptor(&self, id: BlockId) -> MemoryResult<Descriptor> {
        self.blocks
            .get(id)
            .copied()
            .ok_or_else(|| MemoryError::corruption("dangling descriptor index"))
    }

    fn descriptor_mut(&mut self, id: BlockId) -> MemoryResult<&mut Descriptor> {
        self.blocks
            .get_mut(id)
            .ok_or_else(|| MemoryError::corruption("dangling descriptor index"))
    }

    fn find_first_fit(&self, size: usize) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|(_, block)| block.is_free && block.size >= size)
            .map(|(id, _)| id)
    }

    /// Find the descriptor starting at `location` and its predecessor
    fn locate(&self, location: Location) -> MemoryResult<(Option<BlockId>, BlockId)> {
        if location.offset() >= self.capacity() {
            return Err(MemoryError::invalid_handle(location, "outside the pool"));
        }

        let mut previous = None;
        for (id, block) in self.blocks.iter() {
            if block.offset == location.offset() {
                return Ok((previous, id));
            }
            if block.offset > location.offset() {
                break;
            }
            previous = Some(id);
        }
        Err(MemoryError::invalid_handle(location, "no region starts here"))
    }

    fn allocated_range(&self, location: Location) -> MemoryResult<Range<usize>> {
        self.ensure_initialized("region")?;
        let (_, id) = self.locate(location)?;
        let block = self.descriptor(id)?;
        if block.is_free {
            return Err(MemoryError::invalid_handle(location, "region is not allocated"));
        }
        self.checked_range(&block)
    }

    /// Byte range of `block`, validated against the pool bounds
    fn checked_range(&self, block: &Descriptor) -> MemoryResult<Range<usize>> {
        let end = block.offset.checked_add(block.size);
        match end {
            Some(end) if end <= self.capacity() => Ok(block.offset..end),
            _ => Err(MemoryError::corruption(format!(
                "block at offset {} ({} bytes) exceeds capacity {}",
                block.offset,
                block.size,
                self.capacity()
            ))),
        }
    }

    fn fill(&mut self, range: Range<usize>, pattern: u8) -> MemoryResult<()> {
        self.memory_mut("fill")?
            .get_mut(range)
            .ok_or_else(|| MemoryError::corruption("fill outside pool bounds"))?
            .fill(pattern);
        Ok(())
    }

    fn merge_with_next(&mut self, id: BlockId) -> MemoryResult<()> {
        #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
        let absorbed = self
            .blocks
            .absorb_next(id)
            .ok_or_else(|| MemoryError::corruption("merge without a successor"))?;
        self.record(|stats| stats.coalesce_count += 1);
        #[cfg(feature = "logging")]
        poolkit_log::trace!(absorbed, "coalesced free blocks");
        Ok(())
    }

    fn ensure_metadata_budget(&self) -> MemoryResult<()> {
        let Some(fraction) = self.config.metadata_limit else {
            return Ok(());
        };
        let limit = (self.capacity() as f64 * fraction) as usize;
        let used = self.blocks.metadata_bytes() + DESCRIPTOR_SIZE;
        if used > limit {
            return Err(MemoryError::metadata_limit(used, limit));
        }
        Ok(())
    }
}

impl Default for PoolAllocator {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl fmt::Debug for PoolAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolAllocator")
            .field("capacity", &self.capacity())
            .field("blocks", &self.blocks.len())
            .field("free_bytes", &self.free_bytes())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn shape(pool: &PoolAllocator) -> Vec<(usize, usize, bool)> {
        pool.status()
            .unwrap()
            .blocks
            .iter()
            .map(|b| (b.location.offset(), b.size, b.is_free))
            .collect()
    }

    fn pool(capacity: usize) -> PoolAllocator {
        PoolAllocator::with_config(capacity, PoolConfig::debug()).unwrap()
    }

    #[test]
    fn test_init_covers_pool_with_one_free_block() {
        let pool = pool(128);
        assert_eq!(shape(&pool), vec![(0, 128, true)]);
        assert_eq!(pool.free_bytes(), 128);
        pool.verify().unwrap();
    }

    #[test]
    fn test_double_init_leaves_pool_untouched() {
        let mut pool = pool(64);
        let a = pool.alloc(16).unwrap();

        let error = pool.init(256).unwrap_err();
        assert_eq!(error, MemoryError::AlreadyInitialized { capacity: 64 });
        assert_eq!(pool.capacity(), 64);
        assert_eq!(pool.region_size(a).unwrap(), 16);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut pool = PoolAllocator::default();
        assert!(matches!(pool.init(0), Err(MemoryError::InvalidConfig { .. })));
        assert!(!pool.is_initialized());
    }

    #[test]
    fn test_use_before_init_and_after_deinit() {
        let mut pool = PoolAllocator::default();
        assert_eq!(
            pool.alloc(8),
            Err(MemoryError::UninitializedUse { operation: "alloc" })
        );
        assert!(matches!(pool.deinit(), Err(MemoryError::UninitializedUse { .. })));

        pool.init(32).unwrap();
        let a = pool.alloc(8).unwrap();
        pool.deinit().unwrap();

        assert!(matches!(pool.free(a), Err(MemoryError::UninitializedUse { .. })));
        assert!(matches!(pool.status(), Err(MemoryError::UninitializedUse { .. })));
        assert_eq!(pool.capacity(), 0);
        assert_eq!(pool.block_count(), 0);

        // a torn-down pool can be brought back
        pool.init(16).unwrap();
        assert_eq!(shape(&pool), vec![(0, 16, true)]);
    }

    #[test]
    fn test_alloc_splits_first_fit_block() {
        let mut pool = pool(64);
        let a = pool.alloc(16).unwrap();
        let b = pool.alloc(8).unwrap();

        assert_eq!(a, Location::new(0));
        assert_eq!(b, Location::new(16));
        assert_eq!(shape(&pool), vec![(0, 16, false), (16, 8, false), (24, 40, true)]);
        pool.verify().unwrap();
    }

    #[test]
    fn test_exact_fit_does_not_split() {
        let mut pool = pool(32);
        pool.alloc(32).unwrap();
        assert_eq!(shape(&pool), vec![(0, 32, false)]);
        assert_eq!(pool.block_count(), 1);
    }

    #[test]
    fn test_first_fit_determinism() {
        // free regions of 10, 30 and 5 bytes separated by 4-byte allocations
        let mut pool = pool(53);
        let a = pool.alloc(10).unwrap();
        pool.alloc(4).unwrap();
        let b = pool.alloc(30).unwrap();
        pool.alloc(4).unwrap();
        let c = pool.alloc(5).unwrap();
        pool.free(a).unwrap();
        pool.free(b).unwrap();
        pool.free(c).unwrap();

        let first = pool.alloc(8).unwrap();
        assert_eq!(first, Location::new(0));
        assert_eq!(&shape(&pool)[..2], &[(0, 8, false), (8, 2, true)]);

        let second = pool.alloc(30).unwrap();
        assert_eq!(second, Location::new(14));
        assert_eq!(shape(&pool)[3], (14, 30, false));
        pool.verify().unwrap();
    }

    #[test]
    fn test_exhaustion_leaves_chain_unchanged() {
        let mut pool = pool(16);
        let before = shape(&pool);

        let error = pool.alloc(17).unwrap_err();
        assert_eq!(
            error,
            MemoryError::AllocationExhausted {
                requested: 17,
                largest_free: 16
            }
        );
        assert_eq!(shape(&pool), before);
        assert_eq!(pool.stats().failed_allocations, 1);
    }

    #[test]
    fn test_fragmentation_exhausts_despite_free_total() {
        let mut pool = pool(30);
        let a = pool.alloc(10).unwrap();
        pool.alloc(10).unwrap();
        let c = pool.alloc(10).unwrap();
        pool.free(a).unwrap();
        pool.free(c).unwrap();

        assert_eq!(pool.free_bytes(), 20);
        assert_eq!(pool.fragment_count(), 2);
        assert!(matches!(
            pool.alloc(15),
            Err(MemoryError::AllocationExhausted { requested: 15, largest_free: 10 })
        ));
    }

    #[test]
    fn test_alloc_free_round_trip_restores_shape() {
        let mut pool = pool(100);
        pool.alloc(20).unwrap();
        let before = shape(&pool);

        let a = pool.alloc(33).unwrap();
        pool.free(a).unwrap();

        assert_eq!(shape(&pool), before);
    }

    #[test]
    fn test_free_coalesces_both_directions() {
        let mut pool = pool(30);
        let a = pool.alloc(10).unwrap();
        let b = pool.alloc(10).unwrap();
        let c = pool.alloc(10).unwrap();

        pool.free(a).unwrap();
        pool.free(c).unwrap();
        assert_eq!(shape(&pool), vec![(0, 10, true), (10, 10, false), (20, 10, true)]);

        pool.free(b).unwrap();
        assert_eq!(shape(&pool), vec![(0, 30, true)]);
        assert_eq!(pool.stats().coalesce_count, 2);
        pool.verify().unwrap();
    }

    #[test]
    fn test_invalid_frees_change_nothing() {
        let mut pool = pool(64);
        let a = pool.alloc(16).unwrap();
        pool.alloc(16).unwrap();
        let before = shape(&pool);

        assert!(matches!(
            pool.free(Location::new(4)),
            Err(MemoryError::InvalidHandle { reason: "no region starts here", .. })
        ));
        assert!(matches!(
            pool.free(Location::new(640)),
            Err(MemoryError::InvalidHandle { reason: "outside the pool", .. })
        ));
        assert_eq!(shape(&pool), before);

        pool.free(a).unwrap();
        assert!(matches!(
            pool.free(a),
            Err(MemoryError::InvalidHandle { reason: "region is already free", .. })
        ));
    }

    #[test]
    fn test_zero_size_rejected_by_default() {
        let mut pool = pool(16);
        assert_eq!(pool.alloc(0), Err(MemoryError::ZeroSizedRequest));
    }

    #[test]
    fn test_zero_size_peek_does_not_reserve() {
        let mut pool = PoolAllocator::with_config(32, PoolConfig::compat()).unwrap();
        pool.alloc(8).unwrap();
        let before = shape(&pool);

        let peeked = pool.alloc(0).unwrap();
        assert_eq!(peeked, Location::new(8));
        assert_eq!(shape(&pool), before);
        assert!(pool.region(peeked).is_err());

        // the peeked block is still handed out by a real allocation
        assert_eq!(pool.alloc(24).unwrap(), peeked);
        assert!(matches!(
            pool.alloc(0),
            Err(MemoryError::AllocationExhausted { .. })
        ));
        assert_eq!(pool.peek_free().unwrap(), None);
    }

    #[test]
    fn test_resize_growth_copies_data_and_frees_old_region() {
        let mut pool = pool(64);
        let a = pool.alloc(10).unwrap();
        let pattern: Vec<u8> = (1..=10).collect();
        pool.region_mut(a).unwrap().copy_from_slice(&pattern);

        let b = pool.resize(Some(a), 20).unwrap();
        assert_eq!(b, Location::new(10));
        assert_eq!(&pool.region(b).unwrap()[..10], pattern.as_slice());
        assert_eq!(shape(&pool), vec![(0, 10, true), (10, 20, false), (30, 34, true)]);
        assert!(matches!(pool.region(a), Err(MemoryError::InvalidHandle { .. })));
        assert_eq!(pool.stats().relocation_count, 1);
    }

    #[test]
    fn test_resize_within_size_keeps_location() {
        let mut pool = pool(64);
        let a = pool.alloc(24).unwrap();
        let before = shape(&pool);

        assert_eq!(pool.resize(Some(a), 24).unwrap(), a);
        assert_eq!(pool.resize(Some(a), 4).unwrap(), a);
        assert_eq!(shape(&pool), before);
    }

    #[test]
    fn test_resize_none_allocates() {
        let mut pool = pool(64);
        let a = pool.resize(None, 12).unwrap();
        assert_eq!(pool.region_size(a).unwrap(), 12);
    }

    #[test]
    fn test_failed_resize_keeps_original() {
        let mut pool = pool(32);
        let a = pool.alloc(20).unwrap();
        pool.region_mut(a).unwrap().fill(7);

        assert!(matches!(
            pool.resize(Some(a), 24),
            Err(MemoryError::AllocationExhausted { .. })
        ));
        assert!(pool.region(a).unwrap().iter().all(|&byte| byte == 7));
        pool.verify().unwrap();
    }

    #[test]
    fn test_debug_patterns() {
        let mut pool = pool(16);
        let a = pool.alloc(8).unwrap();
        assert!(pool.region(a).unwrap().iter().all(|&byte| byte == 0xBB));
        pool.region_mut(a).unwrap().fill(1);
        pool.free(a).unwrap();

        let b = pool.alloc(16).unwrap();
        assert!(pool.region(b).unwrap().iter().all(|&byte| byte == 0xBB));
    }

    #[test]
    fn test_metadata_limit_blocks_further_splits() {
        let config = PoolConfig::production().with_metadata_limit(1.0);
        let capacity = DESCRIPTOR_SIZE * 2;
        let mut pool = PoolAllocator::with_config(capacity, config).unwrap();

        // second descriptor fits the budget
        pool.alloc(1).unwrap();
        // a third would exceed it, an exact fit needs none
        assert!(matches!(
            pool.alloc(1),
            Err(MemoryError::MetadataLimitExceeded { .. })
        ));
        assert!(pool.alloc(capacity - 1).is_ok());
        pool.verify().unwrap();
    }

    #[test]
    fn test_stats_disabled_in_production() {
        let mut pool = PoolAllocator::with_config(32, PoolConfig::production()).unwrap();
        let a = pool.alloc(8).unwrap();
        pool.free(a).unwrap();
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn test_status_does_not_mutate() {
        let mut pool = pool(48);
        pool.alloc(16).unwrap();
        let first = pool.status().unwrap();
        let second = pool.status().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.allocated_bytes(), 16);
        assert_eq!(first.metadata_bytes, 2 * DESCRIPTOR_SIZE);
    }
}
