//! Shared access to one pool from several threads
//!
//! A [`PoolAllocator`] is a single-owner value. [`SharedPool`] puts it
//! behind one coarse [`parking_lot::Mutex`] so every operation is
//! serialized; the allocator itself holds no locks.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::allocator::PoolAllocator;

/// Cloneable, thread-safe handle to a [`PoolAllocator`]
#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<Mutex<PoolAllocator>>,
}

impl SharedPool {
    /// Wrap an allocator for sharing
    pub fn new(pool: PoolAllocator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Lock the pool for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, PoolAllocator> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the pool
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolAllocator) -> R) -> R {
        let mut pool = self.inner.lock();
        f(&mut pool)
    }

    /// Number of handles sharing this pool
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl From<PoolAllocator> for SharedPool {
    fn from(pool: PoolAllocator) -> Self {
        Self::new(pool)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::allocator::PoolConfig;

    #[test]
    fn test_concurrent_alloc_free() {
        let shared = SharedPool::new(PoolAllocator::with_config(4096, PoolConfig::debug()).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for round in 0..50 {
                        let size = 8 + (worker * 7 + round) % 24;
                        let location = shared.with(|pool| pool.alloc(size)).unwrap();
                        shared.with(|pool| pool.free(location)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let pool = shared.lock();
        pool.verify().unwrap();
        assert_eq!(pool.free_bytes(), 4096);
        assert_eq!(pool.stats().allocation_count, 200);
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedPool::from(PoolAllocator::with_capacity(64).unwrap());
        let other = shared.clone();
        assert_eq!(shared.handle_count(), 2);

        let location = shared.with(|pool| pool.alloc(16)).unwrap();
        assert_eq!(other.lock().region_size(location).unwrap(), 16);
    }
}
