//! Runtime choice between myopic and oracular extraction
//!
//! Consumers that decide at runtime whether to supply an oracle can hold a
//! [`DenseWork`] or [`SparseWork`] and call a single `fetch`. The index
//! argument is ignored by the oracular variants, which follow their oracle.

use alloc::sync::Arc;

use crate::traits::{BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, Matrix};
use crate::{Options, Oracle, Result, Scope, SparseRange};

/// Dense extractor of either kind
pub enum DenseWork<'a, T> {
    Myopic(BoxedMyopicDense<'a, T>),
    Oracular(BoxedOracularDense<'a, T>),
}

impl<T> DenseWork<'_, T> {
    /// Fetch row/column `i`, or the next predicted one when oracular
    pub fn fetch<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T] {
        match self {
            DenseWork::Myopic(extractor) => extractor.fetch(i, buffer),
            DenseWork::Oracular(extractor) => extractor.fetch(buffer),
        }
    }
}

/// Sparse extractor of either kind
pub enum SparseWork<'a, T> {
    Myopic(BoxedMyopicSparse<'a, T>),
    Oracular(BoxedOracularSparse<'a, T>),
}

impl<T> SparseWork<'_, T> {
    /// Fetch row/column `i`, or the next predicted one when oracular
    pub fn fetch<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        match self {
            SparseWork::Myopic(extractor) => extractor.fetch(i, vbuffer, ibuffer),
            SparseWork::Oracular(extractor) => extractor.fetch(vbuffer, ibuffer),
        }
    }
}

/// Create a dense extractor, oracular if an oracle is supplied
pub fn new_dense_extractor<'a, M: Matrix + ?Sized>(
    matrix: &'a M,
    row: bool,
    oracle: Option<Arc<dyn Oracle>>,
    scope: Scope,
    options: &Options,
) -> Result<DenseWork<'a, M::Element>> {
    Ok(match oracle {
        Some(oracle) => DenseWork::Oracular(matrix.dense_oracular(row, oracle, scope, options)?),
        None => DenseWork::Myopic(matrix.dense(row, scope, options)?),
    })
}

/// Create a sparse extractor, oracular if an oracle is supplied
pub fn new_sparse_extractor<'a, M: Matrix + ?Sized>(
    matrix: &'a M,
    row: bool,
    oracle: Option<Arc<dyn Oracle>>,
    scope: Scope,
    options: &Options,
) -> Result<SparseWork<'a, M::Element>> {
    Ok(match oracle {
        Some(oracle) => SparseWork::Oracular(matrix.sparse_oracular(row, oracle, scope, options)?),
        None => SparseWork::Myopic(matrix.sparse(row, scope, options)?),
    })
}
