//! Reusable read buffers shared by the worker threads.

use std::ops::{Deref, DerefMut};

use crossbeam_channel::{Receiver, Sender};

/// Bounded free list of byte buffers.
///
/// Buffers come back through [`PooledBuffer`]'s `Drop`, so every exit path
/// of a scan returns its buffer. When the free list is full the buffer is
/// simply dropped.
#[derive(Debug)]
pub struct BufferPool {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    capacity: usize,
}

impl BufferPool {
    /// `max_idle` buffers are kept; each starts at `capacity` bytes and is
    /// shrunk back to it before reuse.
    pub fn new(max_idle: usize, capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(max_idle.max(1));
        Self { tx, rx, capacity }
    }

    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(self.capacity));
        PooledBuffer { pool: self, buf }
    }

    /// Buffers currently waiting on the free list.
    pub fn idle(&self) -> usize {
        self.rx.len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        if buf.capacity() > self.capacity {
            buf.shrink_to(self.capacity);
        }
        let _ = self.tx.try_send(buf);
    }
}

/// A buffer on loan from a [`BufferPool`].
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_returns_on_drop() {
        let pool = BufferPool::new(2, 16);
        assert_eq!(pool.idle(), 0);
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"hello");
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 16);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_oversized_buffer_is_shrunk() {
        let pool = BufferPool::new(1, 16);
        {
            let mut buf = pool.acquire();
            buf.resize(4096, b'x');
        }
        let buf = pool.acquire();
        assert!(buf.capacity() < 4096);
    }

    #[test]
    fn test_free_list_is_bounded() {
        let pool = BufferPool::new(1, 8);
        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let pool = BufferPool::new(4, 8);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let mut buf = pool.acquire();
                        buf.push(1);
                    }
                });
            }
        });
        assert!(pool.idle() <= 4);
    }
}
