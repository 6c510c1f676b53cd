//! Core types shared by the allocator and its clients
//!
//! - [`Location`]: the handle returned by every allocating operation
//! - [`size`]: byte size constants

pub mod types;

pub use types::*;
