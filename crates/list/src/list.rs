//! Singly-linked list over pool-backed nodes

use poolkit_memory::PoolAllocator;

use crate::error::{ListError, ListResult};
use crate::node::{NODE_SIZE, Node, NodeHandle};

/// A singly-linked list whose nodes are pool regions
///
/// The list only remembers its head; node storage belongs to the pool that
/// is passed to every call. Mixing pools between calls on one list is a
/// caller error and surfaces as handle errors from the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolList {
    head: Option<NodeHandle>,
}

impl PoolList {
    /// Creates an empty list
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Initialize `pool` with `capacity` bytes and return an empty list
    pub fn init(pool: &mut PoolAllocator, capacity: usize) -> ListResult<Self> {
        pool.init(capacity)?;
        #[cfg(feature = "logging")]
        poolkit_log::debug!(capacity, "list pool initialized");
        Ok(Self::new())
    }

    /// First node, if any
    pub const fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    /// Whether the list has no nodes
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walk the nodes from the head
    pub fn iter<'p>(&self, pool: &'p PoolAllocator) -> Iter<'p> {
        Iter {
            pool,
            cursor: self.head,
            remaining: pool.capacity() / NODE_SIZE,
        }
    }

    /// Every value in list order
    pub fn values(&self, pool: &PoolAllocator) -> ListResult<Vec<u16>> {
        self.iter(pool).map(|entry| entry.map(|(_, value)| value)).collect()
    }

    /// Values from `start` (head if `None`) up to but excluding `end`
    ///
    /// An `end` that is never reached runs to the tail.
    pub fn range_values(
        &self,
        pool: &PoolAllocator,
        start: Option<NodeHandle>,
        end: Option<NodeHandle>,
    ) -> ListResult<Vec<u16>> {
        let mut values = Vec::new();
        let mut started = start.is_none();

        for entry in self.iter(pool) {
            let (handle, value) = entry?;
            if !started {
                if Some(handle) != start {
                    continue;
                }
                started = true;
            }
            if Some(handle) == end {
                break;
            }
            values.push(value);
        }

        match start {
            Some(node) if !started => Err(ListError::Unreachable { node }),
            _ => Ok(values),
        }
    }

    /// Number of nodes, counted by walking the list
    pub fn count(&self, pool: &PoolAllocator) -> ListResult<usize> {
        self.iter(pool).try_fold(0, |count, entry| entry.map(|_| count + 1))
    }

    /// First node holding `value`
    pub fn search(&self, pool: &PoolAllocator, value: u16) -> ListResult<Option<NodeHandle>> {
        for entry in self.iter(pool) {
            let (handle, candidate) = entry?;
            if candidate == value {
                return Ok(Some(handle));
            }
        }
        Ok(None)
    }

    /// Value stored in `node`
    pub fn value(&self, pool: &PoolAllocator, node: NodeHandle) -> ListResult<u16> {
        Ok(Node::read(pool, node)?.value)
    }

    /// Append `value` at the tail
    pub fn insert(&mut self, pool: &mut PoolAllocator, value: u16) -> ListResult<NodeHandle> {
        let tail = self.tail(pool)?;
        let fresh = allocate(pool, value, None)?;
        match tail {
            None => self.head = Some(fresh),
            Some(tail) => Node::relink(pool, tail, Some(fresh))?,
        }

        #[cfg(feature = "logging")]
        poolkit_log::trace!(value, node = %fresh, "inserted at tail");
        Ok(fresh)
    }

    /// Splice `value` in right after `node`
    ///
    /// O(n): the anchor is first confirmed to be on this list.
    pub fn insert_after(
        &mut self,
        pool: &mut PoolAllocator,
        node: Option<NodeHandle>,
        value: u16,
    ) -> ListResult<NodeHandle> {
        let node = node.ok_or(ListError::MissingNode)?;
        self.predecessor(pool, node)?;

        let anchor = Node::read(pool, node)?;
        let fresh = allocate(pool, value, anchor.next)?;
        Node::relink(pool, node, Some(fresh))?;

        #[cfg(feature = "logging")]
        poolkit_log::trace!(value, after = %node, node = %fresh, "inserted after");
        Ok(fresh)
    }

    /// Splice `value` in right before `node`, which may be the head
    ///
    /// The predecessor is located before anything is allocated, so an
    /// unknown handle costs nothing.
    pub fn insert_before(
        &mut self,
        pool: &mut PoolAllocator,
        node: Option<NodeHandle>,
        value: u16,
    ) -> ListResult<NodeHandle> {
        let node = node.ok_or(ListError::MissingNode)?;
        let previous = self.predecessor(pool, node)?;

        let fresh = allocate(pool, value, Some(node))?;
        match previous {
            None => self.head = Some(fresh),
            Some(previous) => Node::relink(pool, previous, Some(fresh))?,
        }

        #[cfg(feature = "logging")]
        poolkit_log::trace!(value, before = %node, node = %fresh, "inserted before");
        Ok(fresh)
    }

    /// Unlink the first node holding `value` and return it to the pool
    pub fn delete(&mut self, pool: &mut PoolAllocator, value: u16) -> ListResult<()> {
        let mut previous = None;
        let mut target = None;
        for entry in self.iter(pool) {
            let (handle, candidate) = entry?;
            if candidate == value {
                target = Some(handle);
                break;
            }
            previous = Some(handle);
        }
        let target = target.ok_or(ListError::NotFound { value })?;

        let next = Node::read(pool, target)?.next;
        match previous {
            None => self.head = next,
            Some(previous) => Node::relink(pool, previous, next)?,
        }
        pool.free(target.location())?;

        #[cfg(feature = "logging")]
        poolkit_log::trace!(value, node = %target, "deleted");
        Ok(())
    }

    /// Free every node, then tear down the pool itself
    pub fn teardown(&mut self, pool: &mut PoolAllocator) -> ListResult<()> {
        let nodes = self
            .iter(pool)
            .map(|entry| entry.map(|(handle, _)| handle))
            .collect::<ListResult<Vec<_>>>()?;

        for node in &nodes {
            pool.free(node.location())?;
        }
        self.head = None;
        pool.deinit()?;

        #[cfg(feature = "logging")]
        poolkit_log::debug!(freed = nodes.len(), "list torn down");
        Ok(())
    }

    fn tail(&self, pool: &PoolAllocator) -> ListResult<Option<NodeHandle>> {
        let mut tail = None;
        for entry in self.iter(pool) {
            tail = Some(entry?.0);
        }
        Ok(tail)
    }

    /// `Ok(None)` if `node` is the head, `Ok(Some(p))` if `p` links to it
    fn predecessor(&self, pool: &PoolAllocator, node: NodeHandle) -> ListResult<Option<NodeHandle>> {
        let mut previous = None;
        for entry in self.iter(pool) {
            let (handle, _) = entry?;
            if handle == node {
                return Ok(previous);
            }
            previous = Some(handle);
        }
        Err(ListError::Unreachable { node })
    }
}

fn allocate(pool: &mut PoolAllocator, value: u16, next: Option<NodeHandle>) -> ListResult<NodeHandle> {
    let handle = NodeHandle::from_location(pool.alloc(NODE_SIZE)?);
    Node { value, next }.write(pool, handle)?;
    Ok(handle)
}

/// Iterator over `(handle, value)` pairs in list order
///
/// Stops after the first error. A walk longer than the pool could hold is
/// reported as a corrupted (cyclic) chain.
#[derive(Debug)]
pub struct Iter<'p> {
    pool: &'p PoolAllocator,
    cursor: Option<NodeHandle>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = ListResult<(NodeHandle, u16)>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor.take()?;
        if self.remaining == 0 {
            return Some(Err(ListError::Corrupted { node: handle }));
        }
        self.remaining -= 1;

        Some(Node::read(self.pool, handle).map(|node| {
            self.cursor = node.next;
            (handle, node.value)
        }))
    }
}
