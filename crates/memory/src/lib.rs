//! # poolkit-memory
//!
//! A first-fit pool allocator that carves variable-sized regions out of one
//! contiguous, fixed-size byte buffer.
//!
//! ```text
//!   pool (capacity = 64)
//!   ┌──────────┬────────────────┬──────┬───────────────────────────┐
//!   │ A (16)   │ free (24)      │ B (8)│ free (16)                 │
//!   └──────────┴────────────────┴──────┴───────────────────────────┘
//!        ▲            ▲             ▲            ▲
//!   descriptor → descriptor → descriptor → descriptor → none
//! ```
//!
//! Block descriptors live in their own slot arena, outside the pool, and
//! form a singly-linked chain in ascending address order. Together they
//! partition the pool exactly; adjacent free blocks are always merged.
//!
//! ## Quick Start
//!
//! ```rust
//! use poolkit_memory::prelude::*;
//!
//! fn main() -> MemoryResult<()> {
//!     let mut pool = PoolAllocator::with_capacity(256)?;
//!
//!     let location = pool.alloc(16)?;
//!     pool.region_mut(location)?.copy_from_slice(&[7; 16]);
//!
//!     let grown = pool.resize(Some(location), 32)?;
//!     assert_eq!(&pool.region(grown)?[..16], &[7; 16]);
//!
//!     pool.free(grown)?;
//!     pool.deinit()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `sync` (default): [`SharedPool`], a mutex-guarded handle for sharing
//!   one pool between threads
//! - `logging` (default): lifecycle and error events through `poolkit-log`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod core;
pub mod error;
#[cfg(feature = "sync")]
#[cfg_attr(docsrs, doc(cfg(feature = "sync")))]
pub mod sync;

pub use crate::allocator::{
    BlockStatus, PoolAllocator, PoolConfig, PoolStats, PoolStatus, ZeroSizePolicy,
};
pub use crate::core::Location;
pub use crate::error::{MemoryError, MemoryResult};
#[cfg(feature = "sync")]
pub use crate::sync::SharedPool;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::allocator::{PoolAllocator, PoolConfig, PoolStatus, ZeroSizePolicy};
    pub use crate::core::Location;
    pub use crate::error::{MemoryError, MemoryResult};
    #[cfg(feature = "sync")]
    pub use crate::sync::SharedPool;
}
