//! # poolkit-list
//!
//! A singly-linked list of `u16` values whose nodes are allocated from a
//! [`poolkit_memory::PoolAllocator`]. The list holds only its head handle;
//! the pool is passed explicitly to every operation.
//!
//! ```rust
//! use poolkit_list::{ListResult, PoolList};
//! use poolkit_memory::PoolAllocator;
//!
//! fn main() -> ListResult<()> {
//!     let mut pool = PoolAllocator::default();
//!     let mut list = PoolList::init(&mut pool, 1024)?;
//!
//!     list.insert(&mut pool, 1)?;
//!     let three = list.insert(&mut pool, 3)?;
//!     list.insert_before(&mut pool, Some(three), 2)?;
//!     assert_eq!(list.values(&pool)?, vec![1, 2, 3]);
//!
//!     list.delete(&mut pool, 2)?;
//!     assert_eq!(list.count(&pool)?, 2);
//!
//!     list.teardown(&mut pool)?;
//!     assert!(!pool.is_initialized());
//!     Ok(())
//! }
//! ```

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod error;
pub mod list;
pub mod node;

pub use error::{ListError, ListResult};
pub use list::{Iter, PoolList};
pub use node::{NODE_SIZE, NodeHandle};
