//! A fixed capacity ring buffer that overwrites its oldest element when
//! full.
//!
//! The buffer holds at most `capacity` elements, allocated once at
//! construction. Pushing past capacity silently discards the oldest
//! unconsumed element instead of failing, which makes it a building
//! block for telemetry sampling windows and bounded producer/consumer
//! queues where bounded memory matters more than retaining every item.
//! Pushes and pops are `O(1)`, and the contained elements are not
//! required to be copyable.
//!
//! Two variants share one contract:
//!
//! - [`RingBuffer`] for exclusive single-threaded ownership, with zero
//!   synchronization overhead
//! - [`SyncRingBuffer`] for concurrent use, serializing every operation
//!   behind one mutex
//!
//! No operation ever waits for space or data: a push into a full buffer
//! overwrites, and a pop from an empty buffer fails immediately with
//! [`RingError::Empty`].
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! wrapring = "0.1"
//! ```
//!
//! # Examples
//!
//! ```
//! use wrapring::RingBuffer;
//!
//! let mut buffer: RingBuffer<u32> = RingBuffer::new(3).unwrap();
//! assert_eq!(buffer.capacity(), 3);
//! assert_eq!(buffer.len(), 0);
//!
//! buffer.push(1);
//! buffer.push(2);
//! assert_eq!(buffer.len(), 2);
//!
//! assert_eq!(buffer.pop(), Ok(1));
//! assert_eq!(buffer.pop(), Ok(2));
//! assert!(buffer.pop().is_err());
//! ```
//!
//! # Overwrite semantics
//!
//! ```
//! use wrapring::RingBuffer;
//!
//! let mut window: RingBuffer<&str> = RingBuffer::new(2).unwrap();
//!
//! window.push("a");
//! window.push("b");
//!
//! // full: the oldest element is displaced and handed back
//! assert_eq!(window.push("c"), Some("a"));
//!
//! assert_eq!(window.pop(), Ok("b"));
//! assert_eq!(window.pop(), Ok("c"));
//! ```

#![deny(missing_docs)]

use std::fmt;

mod raw;
mod sync;

pub mod error;

pub use error::RingError;
pub use sync::SyncRingBuffer;

use raw::RawRing;

/// A fixed capacity ring buffer for exclusive single-threaded ownership.
///
/// The "default" usage of this type as a queue is to use [`push`] to add
/// to it and [`pop`] to remove from it in first-in first-out order. Once
/// the buffer is full, a push discards the oldest element to make room;
/// elements discarded this way never surface through `pop`.
///
/// All mutating methods take `&mut self`, so exclusive ownership is
/// enforced at compile time. For a buffer shared between threads, use
/// [`SyncRingBuffer`].
///
/// [`push`]: RingBuffer::push
/// [`pop`]: RingBuffer::pop
#[derive(Clone)]
pub struct RingBuffer<T> {
    ring: RawRing<T>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty `RingBuffer` with room for `capacity` elements.
    ///
    /// The storage is allocated up front and never resized.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapring::{RingBuffer, RingError};
    ///
    /// let buffer: RingBuffer<u8> = RingBuffer::new(16).unwrap();
    /// assert_eq!(buffer.capacity(), 16);
    ///
    /// assert_eq!(RingBuffer::<u8>::new(0).unwrap_err(), RingError::InvalidCapacity);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Ok(RingBuffer {
            ring: RawRing::new(capacity)?,
        })
    }

    /// Adds an element to the back of the buffer.
    ///
    /// Never fails. Returns `None` while the buffer still has room, or
    /// `Some(oldest)` if the buffer was full, where `oldest` is the
    /// element that was overwritten to make room.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _, _] <-(+)- 1 => [1, _, _] -> None
    /// [1, _, _] <-(+)- 2 => [1, 2, _] -> None
    /// [1, 2, _] <-(+)- 3 => [1, 2, 3] -> None
    /// [1, 2, 3] <-(+)- 4 => [2, 3, 4] -> Some(1)
    /// ```
    ///
    /// ```
    /// use wrapring::RingBuffer;
    ///
    /// let mut buffer: RingBuffer<u32> = RingBuffer::new(3).unwrap();
    /// buffer.push(1);
    /// buffer.push(2);
    /// buffer.push(3);
    /// let displaced = buffer.push(4);
    ///
    /// assert_eq!(displaced, Some(1));
    /// assert_eq!(buffer.len(), 3);
    /// ```
    pub fn push(&mut self, element: T) -> Option<T> {
        self.ring.insert(element)
    }

    /// Removes and returns the oldest live element.
    ///
    /// Elements come out strictly in the order they were pushed;
    /// elements lost to an overwrite are skipped. The buffer is left
    /// unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Empty`] if no live element exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapring::{RingBuffer, RingError};
    ///
    /// let mut buffer: RingBuffer<u32> = RingBuffer::new(3).unwrap();
    /// buffer.push(1);
    ///
    /// assert_eq!(buffer.pop(), Ok(1));
    /// assert_eq!(buffer.pop(), Err(RingError::Empty));
    /// ```
    pub fn pop(&mut self) -> Result<T, RingError> {
        self.ring.remove().ok_or(RingError::Empty)
    }

    /// Returns the number of live elements in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapring::RingBuffer;
    ///
    /// let mut buffer: RingBuffer<u32> = RingBuffer::new(4).unwrap();
    /// assert_eq!(buffer.len(), 0);
    /// buffer.push(1);
    /// assert_eq!(buffer.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns the capacity of the buffer. Fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns `true` if the buffer contains no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if the buffer is full.
    ///
    /// The next push into a full buffer overwrites the oldest element.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ring.live()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ring.live().eq(other.ring.live())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(RingBuffer::<u8>::new(0).unwrap_err(), RingError::InvalidCapacity);
    }

    #[test]
    fn fresh_buffer_is_empty() {
        for capacity in [1, 5, 100] {
            let buffer: RingBuffer<u8> = RingBuffer::new(capacity).unwrap();
            assert_eq!(buffer.len(), 0);
            assert_eq!(buffer.capacity(), capacity);
            assert!(buffer.is_empty());
            assert!(!buffer.is_full());
        }
    }

    #[test]
    fn fifo_within_capacity() {
        let mut buffer = RingBuffer::new(8).unwrap();
        for i in 0..8 {
            assert_eq!(buffer.push(i), None);
        }
        assert!(buffer.is_full());
        for i in 0..8 {
            assert_eq!(buffer.pop(), Ok(i));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn overwrite_on_full_keeps_newest() {
        let mut buffer = RingBuffer::new(3).unwrap();
        for i in 0..7 {
            buffer.push(i);
        }
        // only the last `capacity` values survive, oldest first
        assert_eq!(buffer.pop(), Ok(4));
        assert_eq!(buffer.pop(), Ok(5));
        assert_eq!(buffer.pop(), Ok(6));
        assert_eq!(buffer.pop(), Err(RingError::Empty));
    }

    #[test]
    fn displaced_element_returned() {
        let mut buffer = RingBuffer::new(2).unwrap();
        assert_eq!(buffer.push(1), None);
        assert_eq!(buffer.push(2), None);
        assert_eq!(buffer.push(3), Some(1));
        assert_eq!(buffer.push(4), Some(2));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn capacity_one_always_replaces() {
        let mut buffer = RingBuffer::new(1).unwrap();
        assert_eq!(buffer.push("a"), None);
        assert_eq!(buffer.push("b"), Some("a"));
        assert_eq!(buffer.push("c"), Some("b"));
        assert_eq!(buffer.pop(), Ok("c"));
        assert_eq!(buffer.pop(), Err(RingError::Empty));
    }

    #[test]
    fn empty_after_drain() {
        let mut buffer = RingBuffer::new(4).unwrap();
        buffer.push(1);
        buffer.push(2);
        buffer.pop().unwrap();
        buffer.pop().unwrap();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.pop(), Err(RingError::Empty));

        // usable again after the next push
        buffer.push(3);
        assert_eq!(buffer.pop(), Ok(3));
    }

    #[test]
    fn interleaved_pushes_pops_and_overwrites() {
        let mut buffer = RingBuffer::new(5).unwrap();
        assert_eq!(buffer.push("A"), None);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 5);

        buffer.push("B");
        buffer.push("C");
        buffer.push("D");
        assert_eq!(buffer.len(), 4);

        assert_eq!(buffer.push("E"), None);
        assert_eq!(buffer.push("F"), Some("A"));
        assert_eq!(buffer.len(), 5);

        assert_eq!(buffer.pop(), Ok("B"));
        assert_eq!(buffer.pop(), Ok("C"));
        assert_eq!(buffer.pop(), Ok("D"));

        buffer.push("G");
        buffer.push("H");

        assert_eq!(buffer.pop(), Ok("E"));
        assert_eq!(buffer.pop(), Ok("F"));
        assert_eq!(buffer.pop(), Ok("G"));
        assert_eq!(buffer.pop(), Ok("H"));
        assert_eq!(buffer.pop(), Err(RingError::Empty));
    }

    #[test]
    fn overwritten_payloads_dropped() {
        use std::cell::Cell;

        let flag = &Cell::new(0);

        struct Bump<'a>(&'a Cell<i32>);

        impl<'a> Drop for Bump<'a> {
            fn drop(&mut self) {
                let n = self.0.get();
                self.0.set(n + 1);
            }
        }

        let mut buffer = RingBuffer::new(2).unwrap();
        buffer.push(Bump(flag));
        buffer.push(Bump(flag));
        assert_eq!(flag.get(), 0);

        // the displaced element is handed back; dropping it releases it
        drop(buffer.push(Bump(flag)));
        assert_eq!(flag.get(), 1);

        drop(buffer.pop());
        assert_eq!(flag.get(), 2);

        drop(buffer);
        assert_eq!(flag.get(), 3);
    }

    #[test]
    fn debug_lists_live_elements_oldest_first() {
        let mut buffer = RingBuffer::new(3).unwrap();
        buffer.push(1);
        buffer.push(2);
        buffer.push(3);
        buffer.push(4);
        buffer.pop().unwrap();
        assert_eq!(format!("{:?}", buffer), "[3, 4]");
    }

    #[test]
    fn equality_ignores_cursor_positions() {
        let mut a = RingBuffer::new(4).unwrap();
        a.push(1);
        a.push(2);

        // same live contents, reached through a wrapped cursor
        let mut b = RingBuffer::new(4).unwrap();
        for _ in 0..3 {
            b.push(9);
        }
        for _ in 0..3 {
            b.pop().unwrap();
        }
        b.push(1);
        b.push(2);

        assert_eq!(a, b);

        b.pop().unwrap();
        assert_ne!(a, b);

        let cloned = a.clone();
        assert_eq!(a, cloned);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Pop,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![any::<u8>().prop_map(Op::Push), Just(Op::Pop)]
    }

    proptest! {
        #[test]
        fn matches_vecdeque_model(
            capacity in 1usize..=100,
            ops in proptest::collection::vec(op_strategy(), 0..256),
        ) {
            let mut buffer = RingBuffer::new(capacity).unwrap();
            let mut model: VecDeque<u8> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Push(value) => {
                        let expected = if model.len() == capacity {
                            model.pop_front()
                        } else {
                            None
                        };
                        model.push_back(value);
                        prop_assert_eq!(buffer.push(value), expected);
                    }
                    Op::Pop => {
                        prop_assert_eq!(buffer.pop().ok(), model.pop_front());
                    }
                }
                prop_assert_eq!(buffer.len(), model.len());
                prop_assert!(buffer.len() <= capacity);
            }

            for expected in model {
                prop_assert_eq!(buffer.pop(), Ok(expected));
            }
            prop_assert_eq!(buffer.pop(), Err(RingError::Empty));
        }
    }
}
