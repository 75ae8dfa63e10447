//! Reusable scratch buffers for rendering.
//!
//! A render borrows a `Vec<u8>` from a [`BufferPool`] through a
//! [`PooledBuffer`] guard. The guard clears the buffer and hands it back when
//! dropped, on every exit path.
//!
//! ```rust
//! use gridline::pool::BufferPool;
//!
//! let pool = BufferPool::new();
//! {
//!     let mut buf = pool.checkout();
//!     buf.extend_from_slice(b"scratch");
//! }
//! assert_eq!(pool.idle(), 1);
//! assert!(pool.checkout().is_empty());
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

/// Buffers kept idle by a pool created with [`BufferPool::new`].
pub const DEFAULT_MAX_IDLE: usize = 16;

/// Buffers that grew beyond this capacity are dropped instead of retained.
pub const DEFAULT_MAX_CAPACITY: usize = 1 << 20;

static GLOBAL: Lazy<BufferPool> = Lazy::new(BufferPool::new);

/// The process-wide pool used by [`Table`](crate::Table) renders.
pub fn global() -> &'static BufferPool {
    &GLOBAL
}

/// A bounded pool of byte buffers.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    max_idle: usize,
    max_capacity: usize,
}

impl BufferPool {
    /// A pool with the default bounds.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_IDLE, DEFAULT_MAX_CAPACITY)
    }

    /// A pool retaining at most `max_idle` buffers of at most `max_capacity`
    /// bytes each.
    pub fn with_limits(max_idle: usize, max_capacity: usize) -> Self {
        BufferPool {
            idle: Mutex::new(Vec::new()),
            max_idle,
            max_capacity,
        }
    }

    /// Borrows an empty buffer.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let buf = self.lock().pop().unwrap_or_default();
        PooledBuffer {
            pool: self,
            buf: Some(buf),
        }
    }

    /// Borrows an empty buffer with room for at least `capacity` bytes.
    pub fn checkout_with_capacity(&self, capacity: usize) -> PooledBuffer<'_> {
        let mut guard = self.checkout();
        guard.reserve(capacity);
        guard
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // A panic while holding the lock cannot leave the list inconsistent.
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.max_capacity {
            return;
        }
        buf.clear();
        let mut idle = self.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer checked out of a [`BufferPool`].
///
/// Dereferences to `Vec<u8>`. Use [`PooledBuffer::take`] to keep the bytes
/// instead of returning them.
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Option<Vec<u8>>,
}

impl PooledBuffer<'_> {
    /// Detaches the buffer from the pool.
    pub fn take(mut self) -> Vec<u8> {
        self.buf.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        // Only `take` and `drop` empty the option, and both consume the guard.
        self.buf.as_ref().unwrap_or(&EMPTY)
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.get_or_insert_with(Vec::new)
    }
}

static EMPTY: Vec<u8> = Vec::new();

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.give_back(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_come_back_cleared() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.checkout();
            buf.extend_from_slice(b"abc");
        }
        assert_eq!(pool.idle(), 1);
        let buf = pool.checkout();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 3);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn returned_on_early_error() {
        fn flush(_: &[u8]) -> Result<(), &'static str> {
            Err("sink closed")
        }
        fn fails(pool: &BufferPool) -> Result<(), &'static str> {
            let mut buf = pool.checkout();
            buf.push(b'x');
            flush(&buf)?;
            buf.clear();
            Ok(())
        }

        let pool = BufferPool::new();
        assert!(fails(&pool).is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn returned_on_panic() {
        let pool = BufferPool::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _buf = pool.checkout();
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn take_detaches() {
        let pool = BufferPool::new();
        let mut buf = pool.checkout();
        buf.extend_from_slice(b"keep");
        assert_eq!(buf.take(), b"keep");
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn idle_count_is_bounded() {
        let pool = BufferPool::with_limits(2, DEFAULT_MAX_CAPACITY);
        let guards: Vec<_> = (0..5).map(|_| pool.checkout()).collect();
        drop(guards);
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn oversized_buffers_are_dropped() {
        let pool = BufferPool::with_limits(4, 64);
        {
            let mut buf = pool.checkout();
            buf.reserve(1024);
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn global_pool_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}
