//! Owned snapshots of extractor output
//!
//! Extractor views only live until the next fetch, so the harness copies each
//! result out before fetching from a second extractor.

use tessera_core::{DenseWork, MatrixElement, SparseRange, SparseWork};

/// Owned copy of a [`SparseRange`]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T> {
    pub number: usize,
    pub value: Option<Vec<T>>,
    pub index: Option<Vec<usize>>,
}

impl<T: Copy> From<SparseRange<'_, T>> for SparseVector<T> {
    fn from(range: SparseRange<'_, T>) -> Self {
        Self {
            number: range.number,
            value: range.value.map(<[T]>::to_vec),
            index: range.index.map(<[usize]>::to_vec),
        }
    }
}

/// Fetch row/column `i` (or the next prediction) into a new vector of `extent` elements
pub fn fetch_dense<T: MatrixElement>(extractor: &mut DenseWork<'_, T>, i: usize, extent: usize) -> Vec<T> {
    let mut buffer = vec![T::zero(); extent];
    extractor.fetch(i, &mut buffer).to_vec()
}

/// Fetch row/column `i` (or the next prediction) as an owned sparse vector
///
/// Both buffers are sized to `extent` regardless of which channels the
/// extractor was created with.
pub fn fetch_sparse<T: MatrixElement>(extractor: &mut SparseWork<'_, T>, i: usize, extent: usize) -> SparseVector<T> {
    let mut vbuffer = vec![T::zero(); extent];
    let mut ibuffer = vec![0; extent];
    extractor.fetch(i, &mut vbuffer, &mut ibuffer).into()
}
