//! Allocator implementations
//!
//! Currently a single strategy: [`PoolAllocator`], a first-fit allocator with
//! splitting and bidirectional coalescing over one fixed-size pool.

pub mod pool;

pub use pool::{BlockStatus, PoolAllocator, PoolConfig, PoolStats, PoolStatus, ZeroSizePolicy};
