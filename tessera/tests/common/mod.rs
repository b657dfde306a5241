//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use tessera::simulate::{
    simulate_compressed_sparse, simulate_vector, SimulateCompressedSparseOptions, SimulateVectorOptions,
};
use tessera::{
    BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, CompressedSparseMatrix,
    DenseMatrix, Matrix, MatrixElement, MyopicSparseExtractor, Options, Oracle, Result, Scope, SparseRange,
};

/// Transpose a row-major `nrow` x `ncol` buffer into column-major order
pub fn to_column_major<T: Copy>(values: &[T], nrow: usize, ncol: usize) -> Vec<T> {
    let mut output = Vec::with_capacity(values.len());
    for c in 0..ncol {
        for r in 0..nrow {
            output.push(values[r * ncol + c]);
        }
    }
    output
}

/// Row-major candidate and column-major reference with the same simulated content
pub fn dense_pair(nrow: usize, ncol: usize, options: &SimulateVectorOptions) -> (DenseMatrix<f64>, DenseMatrix<f64>) {
    let values: Vec<f64> = simulate_vector(nrow * ncol, options);
    let transposed = to_column_major(&values, nrow, ncol);
    (
        DenseMatrix::new(nrow, ncol, values, true).unwrap(),
        DenseMatrix::new(nrow, ncol, transposed, false).unwrap(),
    )
}

/// Compressed candidate and dense row-major reference with the same simulated content
pub fn sparse_pair(
    nrow: usize,
    ncol: usize,
    csr: bool,
    options: &SimulateCompressedSparseOptions,
) -> (CompressedSparseMatrix<f64>, DenseMatrix<f64>) {
    let (primary, secondary) = if csr { (nrow, ncol) } else { (ncol, nrow) };
    let triple = simulate_compressed_sparse::<f64>(primary, secondary, options);

    let mut dense = vec![0.0; nrow * ncol];
    for p in 0..primary {
        for k in triple.pointers[p]..triple.pointers[p + 1] {
            let s = triple.index[k];
            let (r, c) = if csr { (p, s) } else { (s, p) };
            dense[r * ncol + c] = triple.data[k];
        }
    }

    (
        CompressedSparseMatrix::new(nrow, ncol, triple.data, triple.index, triple.pointers, csr).unwrap(),
        DenseMatrix::new(nrow, ncol, dense, true).unwrap(),
    )
}

/// Deliberately faulty matrix for checking that the harness notices
pub struct Tampered<M> {
    pub inner: Arc<M>,
    /// Claim to be sparse whatever the inner matrix says
    pub claim_sparse: bool,
    /// Rewrites the options of every sparse extractor
    pub sparse_options: fn(Options) -> Options,
    /// Corrupts myopic sparse output whenever index order is not required
    pub unordered_fault: Option<Fault>,
}

impl<M: Matrix> Tampered<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner: Arc::new(inner),
            claim_sparse: false,
            sparse_options: |options| options,
            unordered_fault: None,
        }
    }
}

/// Corruption applied to each non-empty sparse fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Report one non-zero fewer than stored
    DropLast,
    /// Overwrite the last non-zero with a copy of the first
    DuplicateFirst,
}

struct FaultySparse<'a, T> {
    inner: BoxedMyopicSparse<'a, T>,
    fault: Fault,
    vscratch: Vec<T>,
    iscratch: Vec<usize>,
}

impl<T: MatrixElement> MyopicSparseExtractor<T> for FaultySparse<'_, T> {
    fn fetch<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        let range = self.inner.fetch(i, &mut self.vscratch, &mut self.iscratch);
        let mut number = range.number;
        let value = match range.value {
            Some(source) => {
                let output = &mut vbuffer[..number];
                output.copy_from_slice(source);
                Some(output)
            }
            None => None,
        };
        let index = match range.index {
            Some(source) => {
                let output = &mut ibuffer[..number];
                output.copy_from_slice(source);
                Some(output)
            }
            None => None,
        };

        if number == 0 {
            return SparseRange::new(0, value.map(|v| &*v), index.map(|x| &*x));
        }
        match self.fault {
            Fault::DropLast => {
                number -= 1;
                SparseRange::new(number, value.map(|v| &v[..number]), index.map(|x| &x[..number]))
            }
            Fault::DuplicateFirst => {
                let value = value.map(|v| {
                    v[number - 1] = v[0];
                    &*v
                });
                let index = index.map(|x| {
                    x[number - 1] = x[0];
                    &*x
                });
                SparseRange::new(number, value, index)
            }
        }
    }
}

impl<M: Matrix> Matrix for Tampered<M> {
    type Element = M::Element;

    fn nrow(&self) -> usize {
        self.inner.nrow()
    }

    fn ncol(&self) -> usize {
        self.inner.ncol()
    }

    fn is_sparse(&self) -> bool {
        self.claim_sparse || self.inner.is_sparse()
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
        let options = (self.sparse_options)(*options);
        let fault = match self.unordered_fault {
            Some(fault) if !options.sparse_ordered_index => fault,
            _ => return self.inner.sparse(row, scope, &options),
        };

        let extent = scope.extent(self.inner.secondary_extent(row));
        let inner = self.inner.sparse(row, scope, &options)?;
        Ok(Box::new(FaultySparse {
            inner,
            fault,
            vscratch: vec![<M::Element as MatrixElement>::zero(); extent],
            iscratch: vec![0; extent],
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
        self.inner
            .sparse_oracular(row, oracle, scope, &(self.sparse_options)(*options))
    }
}
