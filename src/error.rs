//! Error values for `wrapring`.

use thiserror::Error;

/// Errors reported by the ring buffer constructors and by `pop`.
///
/// Both variants are ordinary outcomes the caller is expected to branch
/// on; neither leaves a buffer in a partially mutated state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// A buffer was requested with zero capacity.
    #[error("capacity must be greater than zero")]
    InvalidCapacity,

    /// `pop` was called while the buffer held no live element.
    #[error("buffer is empty")]
    Empty,
}
