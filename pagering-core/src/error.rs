//! Ring error types

use core::fmt;

/// Errors returned by page ring operations
///
/// Every operation checks its inputs before touching the links, so an error
/// always leaves the ring exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingError {
    /// No free page slot, or the chunk size does not fit a slot buffer
    AllocationError,
    /// Chunk length differs from the ring's configured chunk size
    InvalidChunkSize,
    /// Handle does not refer to a live page of this ring
    NotFound,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::AllocationError => f.write_str("no page memory available"),
            RingError::InvalidChunkSize => f.write_str("chunk length does not match ring chunk size"),
            RingError::NotFound => f.write_str("page not found in ring"),
        }
    }
}
