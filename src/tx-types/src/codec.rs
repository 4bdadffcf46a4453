use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::BytesMut;
use rlp::RlpStream;

/// A bounded pool of reusable buffers for the canonical (RLP) encoder.
///
/// The pool is an explicit object: callers share it through an `Arc` and
/// pass it to every encode call. A buffer is used by exactly one encode at a
/// time and goes back to the pool when its [`PooledBuffer`] guard drops.
#[derive(Debug)]
pub struct RlpBufferPool {
    idle: Mutex<Vec<BytesMut>>,
    max_idle: usize,
    buffer_capacity: usize,
}

impl RlpBufferPool {
    pub const DEFAULT_MAX_IDLE: usize = 16;
    pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

    pub fn new(max_idle: usize, buffer_capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            buffer_capacity,
        }
    }

    /// Takes a cleared buffer out of the pool, allocating one if the pool is empty.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buffer = self
            .lock_idle()
            .pop()
            .unwrap_or_else(|| BytesMut::with_capacity(self.buffer_capacity));

        PooledBuffer { pool: self, buffer }
    }

    /// Number of buffers currently waiting in the pool.
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    /// Encodes an RLP list of `len` items written by `append`, and passes the
    /// encoded bytes to `consume`. The buffer is returned to the pool afterwards.
    ///
    /// Panics if `append` does not write exactly `len` items.
    pub fn encode_list<R>(
        &self,
        len: usize,
        append: impl FnOnce(&mut RlpStream),
        consume: impl FnOnce(&[u8]) -> R,
    ) -> R {
        let mut guard = self.acquire();
        let mut stream = RlpStream::new_list_with_buffer(guard.take(), len);
        append(&mut stream);

        let encoded = stream.out();
        let result = consume(&encoded[..]);
        guard.restore(encoded);

        result
    }

    /// Same as [`RlpBufferPool::encode_list`], returning an owned copy of the encoding.
    pub fn encode_list_to_vec(&self, len: usize, append: impl FnOnce(&mut RlpStream)) -> Vec<u8> {
        self.encode_list(len, append, <[u8]>::to_vec)
    }

    fn release(&self, mut buffer: BytesMut) {
        buffer.clear();
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(buffer);
        } else {
            log::trace!("rlp buffer pool is full, dropping buffer");
        }
    }

    fn lock_idle(&self) -> MutexGuard<'_, Vec<BytesMut>> {
        // The idle list stays consistent even if a holder panicked.
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RlpBufferPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_IDLE, Self::DEFAULT_BUFFER_CAPACITY)
    }
}

/// Exclusive use of one pooled buffer; the buffer goes back to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a RlpBufferPool,
    buffer: BytesMut,
}

impl PooledBuffer<'_> {
    fn take(&mut self) -> BytesMut {
        std::mem::take(&mut self.buffer)
    }

    fn restore(&mut self, buffer: BytesMut) {
        self.buffer = buffer;
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = BytesMut;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        // A buffer lost to a panicking encode leaves an empty placeholder behind.
        if buffer.capacity() > 0 {
            self.pool.release(buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_buffer_returns_to_pool_on_drop() {
        let pool = RlpBufferPool::new(2, 64);
        assert_eq!(pool.idle_count(), 0);

        {
            let mut buffer = pool.acquire();
            buffer.extend_from_slice(&[1, 2, 3]);
            assert_eq!(pool.idle_count(), 0);
        }
        assert_eq!(pool.idle_count(), 1);

        // reused buffers come back cleared
        let buffer = pool.acquire();
        assert!(buffer.is_empty());
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn test_pool_keeps_at_most_max_idle_buffers() {
        let pool = RlpBufferPool::new(2, 64);
        let buffers = (0..5).map(|_| pool.acquire()).collect::<Vec<_>>();
        drop(buffers);

        assert_eq!(pool.idle_count(), 2);
    }

    #[test]
    fn test_encode_list_matches_plain_stream() {
        let pool = RlpBufferPool::default();

        let mut expected = RlpStream::new_list(3);
        expected
            .append(&1u64)
            .append(&vec![0xcau8, 0xfe])
            .append_empty_data();
        let expected = expected.out().to_vec();

        for _ in 0..3 {
            let encoded = pool.encode_list_to_vec(3, |s| {
                s.append(&1u64)
                    .append(&vec![0xcau8, 0xfe])
                    .append_empty_data();
            });
            assert_eq!(encoded, expected);
        }

        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_encode_list_releases_buffer_before_returning() {
        let pool = RlpBufferPool::default();
        let len = pool.encode_list(
            1,
            |s| {
                s.append(&42u64);
            },
            |bytes| bytes.len(),
        );

        assert_eq!(len, 2);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn test_pool_is_shared_across_threads() {
        let pool = Arc::new(RlpBufferPool::new(4, 64));

        let handles = (0..8u64)
            .map(|i| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    (0..100u64)
                        .map(|j| {
                            pool.encode_list_to_vec(2, |s| {
                                s.append(&i).append(&j);
                            })
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        for (i, handle) in handles.into_iter().enumerate() {
            let encodings = handle.join().unwrap();
            for (j, encoded) in encodings.into_iter().enumerate() {
                let rlp = rlp::Rlp::new(&encoded);
                assert_eq!(rlp.val_at::<u64>(0).unwrap(), i as u64);
                assert_eq!(rlp.val_at::<u64>(1).unwrap(), j as u64);
            }
        }

        assert!(pool.idle_count() <= 4);
    }
}
