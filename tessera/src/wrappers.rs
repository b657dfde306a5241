//! Matrix adapters for exercising consumer code paths
//!
//! Both wrappers share their inner matrix through an [`Arc`] and forward
//! every query to it, changing exactly one aspect of its behavior.

use std::sync::Arc;

use tessera_core::{
    BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, Matrix, MatrixElement,
    MyopicSparseExtractor, Options, Oracle, Result, Scope, SparseRange,
};

/// Reports that an oracle is always worth supplying
///
/// Lets a consumer's oracle-driven path be tested against storage that gains
/// nothing from predictions.
#[derive(Debug)]
pub struct ForcedOracleWrapper<M: ?Sized> {
    inner: Arc<M>,
}

impl<M: ?Sized> ForcedOracleWrapper<M> {
    pub fn new(inner: Arc<M>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<M> {
        &self.inner
    }
}

impl<M: Matrix + ?Sized> Matrix for ForcedOracleWrapper<M> {
    type Element = M::Element;

    fn nrow(&self) -> usize {
        self.inner.nrow()
    }

    fn ncol(&self) -> usize {
        self.inner.ncol()
    }

    fn is_sparse(&self) -> bool {
        self.inner.is_sparse()
    }

    fn is_sparse_proportion(&self) -> f64 {
        self.inner.is_sparse_proportion()
    }

    fn prefer_rows(&self) -> bool {
        self.inner.prefer_rows()
    }

    fn prefer_rows_proportion(&self) -> f64 {
        self.inner.prefer_rows_proportion()
    }

    fn uses_oracle(&self, _row: bool) -> bool {
        true
    }

    fn dense<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicDense<'a, M::Element>> {
        self.inner.dense(row, scope, options)
    }

    fn sparse<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicSparse<'a, M::Element>> {
        self.inner.sparse(row, scope, options)
    }

    fn dense_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularDense<'a, M::Element>> {
        self.inner.dense_oracular(row, oracle, scope, options)
    }

    fn sparse_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularSparse<'a, M::Element>> {
        self.inner.sparse_oracular(row, oracle, scope, options)
    }
}

/// Emits myopic sparse output in reverse index order when order is not required
///
/// Ordered requests, dense extraction and oracular extraction are forwarded
/// untouched.
#[derive(Debug)]
pub struct ReversedIndicesWrapper<M: ?Sized> {
    inner: Arc<M>,
}

impl<M: ?Sized> ReversedIndicesWrapper<M> {
    pub fn new(inner: Arc<M>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<M> {
        &self.inner
    }
}

/// Reverses the inner extractor's output into the caller's buffers
struct ReversedSparse<'a, T> {
    inner: BoxedMyopicSparse<'a, T>,
    vscratch: Vec<T>,
    iscratch: Vec<usize>,
}

impl<T: MatrixElement> MyopicSparseExtractor<T> for ReversedSparse<'_, T> {
    fn fetch<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        let range = self.inner.fetch(i, &mut self.vscratch, &mut self.iscratch);
        let number = range.number;

        let value = match range.value {
            Some(source) => {
                let output = &mut vbuffer[..number];
                output.copy_from_slice(source);
                output.reverse();
                Some(&*output)
            }
            None => None,
        };
        let index = match range.index {
            Some(source) => {
                let output = &mut ibuffer[..number];
                output.copy_from_slice(source);
                output.reverse();
                Some(&*output)
            }
            None => None,
        };

        SparseRange::new(number, value, index)
    }
}

impl<M: Matrix + ?Sized> Matrix for ReversedIndicesWrapper<M> {
    type Element = M::Element;

    fn nrow(&self) -> usize {
        self.inner.nrow()
    }

    fn ncol(&self) -> usize {
        self.inner.ncol()
    }

    fn is_sparse(&self) -> bool {
        self.inner.is_sparse()
    }

    fn is_sparse_proportion(&self) -> f64 {
        self.inner.is_sparse_proportion()
    }

    fn prefer_rows(&self) -> bool {
        self.inner.prefer_rows()
    }

    fn prefer_rows_proportion(&self) -> f64 {
        self.inner.prefer_rows_proportion()
    }

    fn uses_oracle(&self, row: bool) -> bool {
        self.inner.uses_oracle(row)
    }

    fn dense<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicDense<'a, M::Element>> {
        self.inner.dense(row, scope, options)
    }

    fn sparse<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicSparse<'a, M::Element>> {
        if options.sparse_ordered_index {
            return self.inner.sparse(row, scope, options);
        }

        let extent = scope.extent(self.inner.secondary_extent(row));
        let vscratch = if options.sparse_extract_value {
            vec![<M::Element as MatrixElement>::zero(); extent]
        } else {
            Vec::new()
        };
        let iscratch = if options.sparse_extract_index {
            vec![0; extent]
        } else {
            Vec::new()
        };
        let inner = self.inner.sparse(row, scope, options)?;
        Ok(Box::new(ReversedSparse {
            inner,
            vscratch,
            iscratch,
        }))
    }

    fn dense_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularDense<'a, M::Element>> {
        self.inner.dense_oracular(row, oracle, scope, options)
    }

    fn sparse_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularSparse<'a, M::Element>> {
        self.inner.sparse_oracular(row, oracle, scope, options)
    }
}
