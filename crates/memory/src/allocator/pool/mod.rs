//! First-fit pool allocator
//!
//! - `allocator`: the allocator itself
//! - `config`: behaviour knobs and presets
//! - `descriptor`: slot arena holding the address-ordered block chain
//! - `stats`: optional counters
//! - `status`: read-only diagnostic snapshot

mod allocator;
mod config;
mod descriptor;
mod stats;
mod status;

pub use allocator::PoolAllocator;
pub use config::{PoolConfig, ZeroSizePolicy};
pub use stats::PoolStats;
pub use status::{BlockStatus, PoolStatus};
