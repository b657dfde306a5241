//! Dense in-memory backend
//!
//! Stores every element contiguously in row-major or column-major order.
//! Traversing along the storage orientation returns direct views into the
//! backing vector; traversing across it gathers with a stride.

use std::sync::Arc;

use tessera_core::{
    BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, DenseFetch, Matrix,
    MatrixElement, Myopic, Options, Oracle, Oracular, Result, Scope, SparseFetch, SparseRange, TesseraError,
};

/// Dense matrix held in a single vector
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    nrow: usize,
    ncol: usize,
    values: Vec<T>,
    row_major: bool,
}

impl<T: MatrixElement> DenseMatrix<T> {
    /// Wrap `values` as an `nrow` x `ncol` matrix
    ///
    /// With `row_major`, element (r, c) is at `r * ncol + c`; otherwise it is
    /// at `c * nrow + r`.
    pub fn new(nrow: usize, ncol: usize, values: Vec<T>, row_major: bool) -> Result<Self> {
        let expected = nrow
            .checked_mul(ncol)
            .ok_or(TesseraError::LengthMismatch {
                what: "values",
                expected: usize::MAX,
                observed: values.len(),
            })?;
        if values.len() != expected {
            return Err(TesseraError::LengthMismatch {
                what: "values",
                expected,
                observed: values.len(),
            });
        }
        Ok(Self {
            nrow,
            ncol,
            values,
            row_major,
        })
    }

    /// Element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrow || col >= self.ncol {
            return None;
        }
        let offset = if self.row_major {
            row * self.ncol + col
        } else {
            col * self.nrow + row
        };
        self.values.get(offset).copied()
    }

    /// Length of each contiguous run in storage
    fn stride(&self) -> usize {
        if self.row_major {
            self.ncol
        } else {
            self.nrow
        }
    }

    fn core(&self, row: bool, scope: Scope, options: &Options) -> Result<DenseCore<'_, T>> {
        let full = self.secondary_extent(row);
        scope.validate(full)?;
        tracing::trace!(
            row,
            extent = scope.extent(full),
            primary = row == self.row_major,
            "creating dense matrix extractor"
        );
        Ok(DenseCore {
            matrix: self,
            contiguous: row == self.row_major,
            scope,
            full,
            options: *options,
        })
    }
}

/// Fetch primitive shared by all four extractor roles
struct DenseCore<'a, T> {
    matrix: &'a DenseMatrix<T>,
    /// Traversal follows the storage orientation
    contiguous: bool,
    scope: Scope,
    full: usize,
    options: Options,
}

impl<'a, T: MatrixElement> DenseCore<'a, T> {
    fn extract<'b>(&'b self, i: usize, buffer: &'b mut [T]) -> &'b [T] {
        let stride = self.matrix.stride();
        let values = &self.matrix.values;

        if self.contiguous {
            let run = &values[i * stride..(i + 1) * stride];
            return match &self.scope {
                Scope::Full => run,
                Scope::Block { start, length } => &run[*start..*start + *length],
                Scope::Indexed(indices) => {
                    for (slot, &x) in buffer.iter_mut().zip(indices.iter()) {
                        *slot = run[x];
                    }
                    &buffer[..indices.len()]
                }
            };
        }

        let extent = self.scope.extent(self.full);
        for (slot, p) in buffer.iter_mut().zip(self.scope.iter(self.full)) {
            *slot = values[p * stride + i];
        }
        &buffer[..extent]
    }

    fn positions<'b>(&'b self, ibuffer: &'b mut [usize]) -> &'b [usize] {
        match &self.scope {
            Scope::Indexed(indices) => &indices[..],
            scope => scope.fill_positions(self.full, ibuffer),
        }
    }
}

impl<T: MatrixElement> DenseFetch<T> for DenseCore<'_, T> {
    fn fetch_dense<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T] {
        self.extract(i, buffer)
    }
}

impl<T: MatrixElement> SparseFetch<T> for DenseCore<'_, T> {
    // Dense storage has no structural zeros, so every scoped element is reported.
    fn fetch_sparse<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        let this: &'b Self = self;
        let number = this.scope.extent(this.full);
        let value = if this.options.sparse_extract_value {
            Some(this.extract(i, vbuffer))
        } else {
            None
        };
        let index = if this.options.sparse_extract_index {
            Some(this.positions(ibuffer))
        } else {
            None
        };
        SparseRange::new(number, value, index)
    }
}

impl<T: MatrixElement> Matrix for DenseMatrix<T> {
    type Element = T;

    fn nrow(&self) -> usize {
        self.nrow
    }

    fn ncol(&self) -> usize {
        self.ncol
    }

    fn is_sparse(&self) -> bool {
        false
    }

    fn is_sparse_proportion(&self) -> f64 {
        0.0
    }

    fn prefer_rows(&self) -> bool {
        self.row_major
    }

    fn prefer_rows_proportion(&self) -> f64 {
        if self.row_major {
            1.0
        } else {
            0.0
        }
    }

    fn uses_oracle(&self, _row: bool) -> bool {
        false
    }

    fn dense<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicDense<'a, T>> {
        Ok(Box::new(Myopic::new(self.core(row, scope, options)?)))
    }

    fn sparse<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicSparse<'a, T>> {
        Ok(Box::new(Myopic::new(self.core(row, scope, options)?)))
    }

    fn dense_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularDense<'a, T>> {
        Ok(Box::new(Oracular::new(self.core(row, scope, options)?, oracle)))
    }

    fn sparse_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularSparse<'a, T>> {
        Ok(Box::new(Oracular::new(self.core(row, scope, options)?, oracle)))
    }
}
