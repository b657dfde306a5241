//! Layout validation for compressed sparse storage
//!
//! Pure checks on the (values, indices, pointers) triple that backs a
//! compressed sparse matrix.

use super::bounds::{validate_index, validate_strictly_increasing};
use crate::TesseraError;

/// Validate a pointer array for `primary` slices over `nnz` stored entries
///
/// Pointers must have length `primary + 1`, start at zero, never decrease and
/// end at `nnz`.
pub fn validate_pointers(pointers: &[usize], primary: usize, nnz: usize) -> Result<(), TesseraError> {
    if pointers.len() != primary + 1 {
        return Err(TesseraError::LengthMismatch {
            what: "pointers",
            expected: primary + 1,
            observed: pointers.len(),
        });
    }
    if pointers[0] != 0 {
        return Err(TesseraError::InvalidPointers {
            reason: "first pointer must be zero",
        });
    }
    if pointers.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(TesseraError::InvalidPointers {
            reason: "pointers must be non-decreasing",
        });
    }
    if pointers[primary] != nnz {
        return Err(TesseraError::InvalidPointers {
            reason: "last pointer must equal the number of stored entries",
        });
    }
    Ok(())
}

/// Validate a complete compressed layout
///
/// Within every primary slice the secondary indices must be strictly
/// increasing and below `secondary`.
pub fn validate_compressed(
    values_len: usize,
    indices: &[usize],
    pointers: &[usize],
    primary: usize,
    secondary: usize,
) -> Result<(), TesseraError> {
    if values_len != indices.len() {
        return Err(TesseraError::LengthMismatch {
            what: "indices",
            expected: values_len,
            observed: indices.len(),
        });
    }
    validate_pointers(pointers, primary, values_len)?;

    for pair in pointers.windows(2) {
        let slice = &indices[pair[0]..pair[1]];
        validate_strictly_increasing(slice).map_err(|err| match err {
            TesseraError::UnsortedSubset { position } => TesseraError::UnsortedSubset {
                position: pair[0] + position,
            },
            other => other,
        })?;
        if let Some(&last) = slice.last() {
            validate_index(last, secondary)?;
        }
    }
    Ok(())
}
