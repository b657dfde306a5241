//! Result of a single sparse fetch

/// Non-zero elements of one row or column
///
/// `value` and `index` are `None` when the corresponding channel was disabled
/// in [`Options`](crate::Options); `number` is the true non-zero count either way.
/// Present slices hold exactly `number` elements. They may borrow the caller's
/// buffers or the backend's own storage, and stay valid until the next fetch
/// on the same extractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseRange<'a, T> {
    /// Number of non-zero elements
    pub number: usize,
    /// Values of the non-zero elements
    pub value: Option<&'a [T]>,
    /// Positions of the non-zero elements on the non-target dimension
    pub index: Option<&'a [usize]>,
}

impl<'a, T> SparseRange<'a, T> {
    /// Create a range from its parts
    pub const fn new(number: usize, value: Option<&'a [T]>, index: Option<&'a [usize]>) -> Self {
        Self {
            number,
            value,
            index,
        }
    }

    /// A range with no non-zero elements
    ///
    /// Enabled channels are reported as present but empty.
    pub fn empty(extract_value: bool, extract_index: bool) -> Self {
        Self {
            number: 0,
            value: extract_value.then(<&[T]>::default),
            index: extract_index.then(<&[usize]>::default),
        }
    }
}
