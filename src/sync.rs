//! A mutex-guarded ring buffer for concurrent producers and consumers.

use std::fmt;

use parking_lot::Mutex;

use crate::error::RingError;
use crate::raw::RawRing;

/// A fixed capacity ring buffer safe for concurrent use.
///
/// Every operation locks one internal mutex and delegates to the same
/// core engine as [`RingBuffer`], so the two types share one contract;
/// this one merely serializes it. Operations are totally ordered by lock
/// acquisition, and each critical section is a slot write plus a few
/// cursor updates — nothing ever blocks waiting for buffer *state*:
/// a push into a full buffer overwrites and a pop from an empty buffer
/// fails immediately.
///
/// The emptiness check in [`pop`] happens under the same lock
/// acquisition as the removal, so `pop` is linearizable: two concurrent
/// calls can never hand out the same element, and whichever acquires the
/// lock after a completed [`push`] observes that push's effect.
///
/// `SyncRingBuffer<T>` is `Send` and `Sync` whenever `T: Send`; share it
/// between threads behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use wrapring::SyncRingBuffer;
///
/// let buffer = Arc::new(SyncRingBuffer::new(8).unwrap());
///
/// let producer = {
///     let buffer = Arc::clone(&buffer);
///     thread::spawn(move || {
///         for i in 0..4 {
///             buffer.push(i);
///         }
///     })
/// };
/// producer.join().unwrap();
///
/// assert_eq!(buffer.len(), 4);
/// assert_eq!(buffer.pop(), Ok(0));
/// ```
///
/// [`RingBuffer`]: crate::RingBuffer
/// [`push`]: SyncRingBuffer::push
/// [`pop`]: SyncRingBuffer::pop
/// [`Arc`]: std::sync::Arc
pub struct SyncRingBuffer<T> {
    inner: Mutex<RawRing<T>>,
    // duplicated outside the lock: immutable after construction
    capacity: usize,
}

impl<T> SyncRingBuffer<T> {
    /// Creates an empty `SyncRingBuffer` with room for `capacity`
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        let ring = RawRing::new(capacity)?;
        Ok(SyncRingBuffer {
            inner: Mutex::new(ring),
            capacity,
        })
    }

    /// Adds an element to the back of the buffer.
    ///
    /// Never fails and never waits for space. Returns `None` while the
    /// buffer still has room, or `Some(oldest)` if the buffer was full,
    /// where `oldest` is the element that was overwritten to make room.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapring::SyncRingBuffer;
    ///
    /// let buffer = SyncRingBuffer::new(2).unwrap();
    /// assert_eq!(buffer.push(1), None);
    /// assert_eq!(buffer.push(2), None);
    /// assert_eq!(buffer.push(3), Some(1));
    /// ```
    pub fn push(&self, element: T) -> Option<T> {
        self.inner.lock().insert(element)
    }

    /// Removes and returns the oldest live element.
    ///
    /// The emptiness check and the removal run under one lock
    /// acquisition; there is no window in which another thread can steal
    /// the element this call observed.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Empty`] if no live element exists at the
    /// time the lock is held.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapring::{RingError, SyncRingBuffer};
    ///
    /// let buffer = SyncRingBuffer::new(2).unwrap();
    /// buffer.push("x");
    ///
    /// assert_eq!(buffer.pop(), Ok("x"));
    /// assert_eq!(buffer.pop(), Err(RingError::Empty));
    /// ```
    pub fn pop(&self) -> Result<T, RingError> {
        self.inner.lock().remove().ok_or(RingError::Empty)
    }

    /// Returns the number of live elements.
    ///
    /// Takes the lock, so the count is a consistent snapshot serialized
    /// with concurrent `push`/`pop` calls — though it may be stale by
    /// the time the caller acts on it.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the buffer contains no live elements.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if the buffer is full.
    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    /// Returns the capacity of the buffer.
    ///
    /// Does not lock: the capacity never changes after construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.lock().live()).finish()
    }
}
