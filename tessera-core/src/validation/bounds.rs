//! Bounds validation for extraction scopes
//!
//! Pure checks on block and index-subset requests against the extent of the
//! non-target dimension. No allocation, no I/O.

use crate::TesseraError;

/// Validate that a contiguous block fits inside `extent`
///
/// Uses checked arithmetic so that huge `start + length` values are
/// rejected rather than wrapping.
pub const fn validate_block(start: usize, length: usize, extent: usize) -> Result<(), TesseraError> {
    match start.checked_add(length) {
        Some(end) if end <= extent => Ok(()),
        _ => Err(TesseraError::BlockOutOfRange {
            start,
            length,
            extent,
        }),
    }
}

/// Validate a single index against `extent`
pub const fn validate_index(index: usize, extent: usize) -> Result<(), TesseraError> {
    if index >= extent {
        return Err(TesseraError::IndexOutOfRange { index, extent });
    }
    Ok(())
}

/// Validate that `indices` is strictly increasing and lies within `extent`
///
/// Strict monotonicity also rules out duplicates.
pub fn validate_subset(indices: &[usize], extent: usize) -> Result<(), TesseraError> {
    validate_strictly_increasing(indices)?;
    if let Some(&last) = indices.last() {
        validate_index(last, extent)?;
    }
    Ok(())
}

/// Validate that `indices` is strictly increasing
///
/// The reported position is that of the first offending element.
pub fn validate_strictly_increasing(indices: &[usize]) -> Result<(), TesseraError> {
    match indices.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(position) => Err(TesseraError::UnsortedSubset {
            position: position + 1,
        }),
        None => Ok(()),
    }
}
