//! Error types for matrix construction and extractor creation

use thiserror::Error;

/// Errors raised when a matrix or extractor is constructed with invalid parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TesseraError {
    /// Contiguous block extends past the non-target extent
    #[error("block [{start}, {start} + {length}) exceeds extent {extent}")]
    BlockOutOfRange {
        start: usize,
        length: usize,
        extent: usize,
    },
    /// Index lies outside its dimension
    #[error("index {index} out of range for extent {extent}")]
    IndexOutOfRange { index: usize, extent: usize },
    /// Indices are required to be strictly increasing
    #[error("indices are not strictly increasing at position {position}")]
    UnsortedSubset { position: usize },
    /// Storage length disagrees with the declared shape
    #[error("{what} has length {observed}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        observed: usize,
    },
    /// Compressed pointer array is malformed
    #[error("invalid pointers: {reason}")]
    InvalidPointers { reason: &'static str },
}

/// Result type for tessera operations
pub type Result<T> = core::result::Result<T, TesseraError>;
