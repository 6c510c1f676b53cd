//! Slot arena for block descriptors
//!
//! Descriptors are addressed by stable [`BlockId`] indices rather than
//! pointers. Released slots are threaded onto a vacant list and reused by
//! later splits, so the arena never grows past the peak block count.
//!
//! ```text
//!   slots:  [0: Occupied] [1: Vacant ─┐] [2: Occupied] [3: Vacant ─> none]
//!                                     └──────────────────────^
//!   chain:  head ─> 0 ─> 2 ─> none        (ascending pool offsets)
//! ```

use std::mem;

/// Stable index of a descriptor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BlockId(usize);

/// Metadata for one contiguous region of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Descriptor {
    pub(crate) offset: usize,
    pub(crate) size: usize,
    pub(crate) is_free: bool,
    pub(crate) next: Option<BlockId>,
}

impl Descriptor {
    /// One past the last byte covered
    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Bytes of bookkeeping per live descriptor
pub(crate) const DESCRIPTOR_SIZE: usize = mem::size_of::<Descriptor>();

#[derive(Debug)]
enum Slot {
    Occupied(Descriptor),
    Vacant { next: Option<BlockId> },
}

/// Address-ordered descriptor chain stored in a slot arena
#[derive(Debug, Default)]
pub(crate) struct DescriptorArena {
    slots: Vec<Slot>,
    head: Option<BlockId>,
    vacant: Option<BlockId>,
    live: usize,
}

impl DescriptorArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop every descriptor and start over with one free block `[0, capacity)`
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.clear();
        let id = self.occupy(Descriptor {
            offset: 0,
            size: capacity,
            is_free: true,
            next: None,
        });
        self.head = Some(id);
    }

    /// Drop every descriptor
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.vacant = None;
        self.live = 0;
    }

    /// Number of live descriptors
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Bytes of descriptor metadata currently in use
    #[inline]
    pub(crate) fn metadata_bytes(&self) -> usize {
        self.live * DESCRIPTOR_SIZE
    }

    pub(crate) fn get(&self, id: BlockId) -> Option<&Descriptor> {
        match self.slots.get(id.0)? {
            Slot::Occupied(descriptor) => Some(descriptor),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> Option<&mut Descriptor> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(descriptor) => Some(descriptor),
            Slot::Vacant { .. } => None,
        }
    }

    /// Walk the chain in address order
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            arena: self,
            cursor: self.head,
        }
    }

    /// Shrink `id` to `size` bytes and link a new free descriptor covering
    /// the remainder right after it.
    ///
    /// Returns `None` (and changes nothing) if `id` is vacant or `size` does
    /// not leave a non-empty remainder.
    pub(crate) fn split(&mut self, id: BlockId, size: usize) -> Option<BlockId> {
        let descriptor = *self.get(id)?;
        if size == 0 || size >= descriptor.size {
            return None;
        }

        let remainder = self.occupy(Descriptor {
            offset: descriptor.offset + size,
            size: descriptor.size - size,
            is_free: true,
            next: descriptor.next,
        });

        let descriptor = self.get_mut(id)?;
        descriptor.size = size;
        descriptor.next = Some(remainder);
        Some(remainder)
    }

    /// Fold the successor of `id` into `id` and release its slot.
    ///
    /// Returns the number of bytes absorbed, or `None` if there is no
    /// successor.
    pub(crate) fn absorb_next(&mut self, id: BlockId) -> Option<usize> {
        let next_id = self.get(id)?.next?;
        let next = *self.get(next_id)?;

        let descriptor = self.get_mut(id)?;
        descriptor.size += next.size;
        descriptor.next = next.next;
        self.release(next_id);
        Some(next.size)
    }

    fn occupy(&mut self, descriptor: Descriptor) -> BlockId {
        self.live += 1;
        if let Some(id) = self.vacant {
            if let Slot::Vacant { next } = self.slots[id.0] {
                self.vacant = next;
            }
            self.slots[id.0] = Slot::Occupied(descriptor);
            id
        } else {
            self.slots.push(Slot::Occupied(descriptor));
            BlockId(self.slots.len() - 1)
        }
    }

    fn release(&mut self, id: BlockId) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return;
        };
        if matches!(slot, Slot::Occupied(_)) {
            *slot = Slot::Vacant { next: self.vacant };
            self.vacant = Some(id);
            self.live -= 1;
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Iterator over `(BlockId, &Descriptor)` in ascending address order
pub(crate) struct Iter<'a> {
    arena: &'a DescriptorArena,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BlockId, &'a Descriptor);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        // a dangling link ends the walk; `verify` reports the missing bytes
        let descriptor = self.arena.get(id)?;
        self.cursor = descriptor.next;
        Some((id, descriptor))
    }
}
