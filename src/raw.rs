//! The core buffer engine: slot storage, cursors and the insert/remove
//! primitives. The facades in the crate root and in `sync` own exactly
//! one `RawRing` each and never touch its fields directly.

use crate::error::RingError;

/// Fixed capacity ring storage with overwrite-on-full insertion.
///
/// Each slot is an `Option<T>`; a vacated slot is reset to `None` so the
/// removed value's storage is released the moment it leaves the buffer.
#[derive(Clone)]
pub(crate) struct RawRing<T> {
    buf: Box<[Option<T>]>,
    /// Index of the oldest live element. Meaningless while `len == 0`.
    head: usize,
    /// Index the next inserted element lands in.
    write: usize,
    len: usize,
}

impl<T> RawRing<T> {
    /// Allocates `capacity` empty slots. The allocation happens once;
    /// the ring never resizes.
    pub(crate) fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity);
        }
        let mut buf = Vec::new();
        buf.resize_with(capacity, || None);
        Ok(RawRing {
            buf: buf.into_boxed_slice(),
            head: 0,
            write: 0,
            len: 0,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Inserts `element`, discarding the oldest live element when full.
    ///
    /// Returns the displaced element if an overwrite happened. When the
    /// ring is full, `head == write`, so removing first both frees the
    /// target slot and advances `head` past the discarded element.
    pub(crate) fn insert(&mut self, element: T) -> Option<T> {
        let existing = if self.is_full() { self.remove() } else { None };
        let write = self.write;
        debug_assert!(self.buf[write].is_none());
        self.buf[write] = Some(element);
        self.write = wrap_add(write, 1, self.capacity());
        self.len += 1;
        existing
    }

    /// Removes and returns the oldest live element, or `None` when the
    /// ring is empty. `take` leaves the vacated slot `None`.
    pub(crate) fn remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.head;
        let element = self.buf[head].take();
        debug_assert!(element.is_some());
        self.head = wrap_add(head, 1, self.capacity());
        self.len -= 1;
        element
    }

    /// Visits the live elements oldest-first. Crate-internal: the public
    /// surface exposes no iteration, but `Debug` and `PartialEq` need
    /// one.
    pub(crate) fn live(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len)
            .filter_map(move |offset| self.buf[wrap_add(self.head, offset, self.capacity())].as_ref())
    }
}

#[inline]
fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}
