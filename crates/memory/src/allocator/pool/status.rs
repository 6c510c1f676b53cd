//! Read-only diagnostic snapshot of a pool

use std::fmt;

use crate::core::Location;

/// One block of the descriptor chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStatus {
    /// Start of the block
    pub location: Location,
    /// Length in bytes
    pub size: usize,
    /// Whether the block is available
    pub is_free: bool,
}

/// Snapshot returned by [`PoolAllocator::status`](super::PoolAllocator::status)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStatus {
    /// Total pool bytes
    pub capacity: usize,
    /// Bytes of descriptor bookkeeping
    pub metadata_bytes: usize,
    /// Blocks in address order
    pub blocks: Vec<BlockStatus>,
}

impl PoolStatus {
    /// Bytes in free blocks
    pub fn free_bytes(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free).map(|b| b.size).sum()
    }

    /// Bytes in allocated blocks
    pub fn allocated_bytes(&self) -> usize {
        self.capacity - self.free_bytes()
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Pool Size: {} bytes", self.capacity)?;
        writeln!(f, "Used Metadata: {} bytes", self.metadata_bytes)?;
        writeln!(
            f,
            "Allocated: {} bytes, Free: {} bytes",
            self.allocated_bytes(),
            self.free_bytes()
        )?;
        writeln!(f, "Blocks:")?;
        for block in &self.blocks {
            writeln!(
                f,
                "  Block at {} - Size: {} bytes - {}",
                block.location,
                block.size,
                if block.is_free { "Free" } else { "Allocated" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let status = PoolStatus {
            capacity: 32,
            metadata_bytes: 64,
            blocks: vec![
                BlockStatus {
                    location: Location::new(0),
                    size: 8,
                    is_free: false,
                },
                BlockStatus {
                    location: Location::new(8),
                    size: 24,
                    is_free: true,
                },
            ],
        };

        let text = status.to_string();
        assert!(text.contains("Memory Pool Size: 32 bytes"));
        assert!(text.contains("Allocated: 8 bytes, Free: 24 bytes"));
        assert!(text.contains("Block at +0x0008 - Size: 24 bytes - Free"));
    }
}
