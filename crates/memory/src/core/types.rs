//! Common types and constants for pool management

use std::fmt;

use serde::{Deserialize, Serialize};

/// Memory size constants
pub mod size {
    /// 1 Kilobyte
    pub const KB: usize = 1024;

    /// 1 Megabyte
    pub const MB: usize = 1024 * KB;
}

/// Start of a region inside a pool, as a byte offset from the pool base.
///
/// Locations are plain offsets: they stay meaningful while the pool is
/// alive and are validated against the descriptor chain on every use, so a
/// stale or foreign location yields an error instead of touching memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(usize);

impl Location {
    /// Wrap a raw pool offset
    #[inline]
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Byte offset from the start of the pool
    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl From<Location> for usize {
    fn from(location: Location) -> Self {
        location.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{:#06x}", self.0)
    }
}
