//! Node records stored in pool memory
//!
//! ```text
//!   byte  0      2                8                        16
//!         ├ value ┼──── unused ───┼──── next offset (LE) ───┤
//!           u16 LE                  u64, u64::MAX = none
//! ```

use std::fmt;

use poolkit_memory::{Location, PoolAllocator};

use crate::error::{ListError, ListResult};

/// Bytes reserved from the pool per node
pub const NODE_SIZE: usize = 16;

const NEXT_OFFSET: usize = 8;
const NO_NEXT: u64 = u64::MAX;

/// Handle to one list node, valid while the node is linked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(Location);

impl NodeHandle {
    /// Treat a pool location as a node handle
    ///
    /// Nothing is checked here; list operations validate handles against
    /// the pool and the chain before using them.
    pub const fn from_location(location: Location) -> Self {
        Self(location)
    }

    /// Pool location of the node record
    pub const fn location(self) -> Location {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Decoded node record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) value: u16,
    pub(crate) next: Option<NodeHandle>,
}

impl Node {
    pub(crate) fn read(pool: &PoolAllocator, handle: NodeHandle) -> ListResult<Self> {
        let bytes = pool.region(handle.location())?;
        let corrupted = || ListError::Corrupted { node: handle };

        let value = bytes.get(..2).ok_or_else(corrupted)?;
        let next = bytes
            .get(NEXT_OFFSET..NODE_SIZE)
            .ok_or_else(corrupted)?;

        let value = u16::from_le_bytes([value[0], value[1]]);
        let next = u64::from_le_bytes(next.try_into().map_err(|_| corrupted())?);
        let next = match next {
            NO_NEXT => None,
            offset => {
                let offset = usize::try_from(offset).map_err(|_| corrupted())?;
                Some(NodeHandle(Location::new(offset)))
            }
        };
        Ok(Self { value, next })
    }

    pub(crate) fn write(self, pool: &mut PoolAllocator, handle: NodeHandle) -> ListResult<()> {
        let bytes = pool.region_mut(handle.location())?;
        let record = bytes
            .get_mut(..NODE_SIZE)
            .ok_or(ListError::Corrupted { node: handle })?;

        let next = self
            .next
            .map_or(NO_NEXT, |next| next.location().offset() as u64);
        record.fill(0);
        record[..2].copy_from_slice(&self.value.to_le_bytes());
        record[NEXT_OFFSET..].copy_from_slice(&next.to_le_bytes());
        Ok(())
    }

    /// Rewrite only the link of an existing node
    pub(crate) fn relink(
        pool: &mut PoolAllocator,
        handle: NodeHandle,
        next: Option<NodeHandle>,
    ) -> ListResult<()> {
        let node = Self::read(pool, handle)?;
        Self { next, ..node }.write(pool, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        let mut pool = PoolAllocator::with_capacity(64).unwrap();
        let a = NodeHandle::from_location(pool.alloc(NODE_SIZE).unwrap());
        let b = NodeHandle::from_location(pool.alloc(NODE_SIZE).unwrap());

        Node {
            value: 0x1234,
            next: Some(b),
        }
        .write(&mut pool, a)
        .unwrap();

        let bytes = pool.region(a.location()).unwrap();
        assert_eq!(&bytes[..2], &[0x34, 0x12]);
        assert_eq!(&bytes[8..], &16u64.to_le_bytes());
        assert_eq!(
            Node::read(&pool, a).unwrap(),
            Node {
                value: 0x1234,
                next: Some(b)
            }
        );
    }

    #[test]
    fn test_relink_to_none() {
        let mut pool = PoolAllocator::with_capacity(32).unwrap();
        let a = NodeHandle::from_location(pool.alloc(NODE_SIZE).unwrap());
        Node {
            value: 9,
            next: Some(a),
        }
        .write(&mut pool, a)
        .unwrap();

        Node::relink(&mut pool, a, None).unwrap();
        let node = Node::read(&pool, a).unwrap();
        assert_eq!(node.value, 9);
        assert_eq!(node.next, None);
        assert_eq!(&pool.region(a.location()).unwrap()[8..], &[0xFF; 8]);
    }

    #[test]
    fn test_short_region_is_corrupted() {
        let mut pool = PoolAllocator::with_capacity(32).unwrap();
        let small = NodeHandle::from_location(pool.alloc(4).unwrap());
        assert_eq!(
            Node::read(&pool, small),
            Err(ListError::Corrupted { node: small })
        );
    }

    #[test]
    fn test_free_region_is_not_a_node() {
        let pool = PoolAllocator::with_capacity(32).unwrap();
        let stray = NodeHandle::from_location(Location::new(0));
        assert!(matches!(Node::read(&pool, stray), Err(ListError::Memory(_))));
    }
}
