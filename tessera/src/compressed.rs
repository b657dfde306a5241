//! Compressed sparse backend (CSR or CSC)
//!
//! Non-zero elements are grouped by the primary dimension (rows for CSR,
//! columns for CSC). Along the primary dimension, sparse extraction returns
//! direct views of the stored slices. Across it, each scoped primary slice is
//! searched for the requested secondary index; a per-extractor cursor makes
//! increasing access sequences cost a linear scan instead of a binary search.

use std::sync::Arc;

use tessera_core::validation::validate_compressed;
use tessera_core::{
    BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, DenseFetch, Matrix,
    MatrixElement, Myopic, Options, Oracle, Oracular, Result, Scope, SparseFetch, SparseRange,
};

/// Compressed sparse matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedSparseMatrix<T> {
    nrow: usize,
    ncol: usize,
    values: Vec<T>,
    indices: Vec<usize>,
    pointers: Vec<usize>,
    csr: bool,
}

impl<T: MatrixElement> CompressedSparseMatrix<T> {
    /// Build from a compressed triple
    ///
    /// With `csr`, `pointers` has `nrow + 1` entries and `indices` are column
    /// positions; otherwise `pointers` has `ncol + 1` entries and `indices` are
    /// row positions. Indices must be strictly increasing within each slice.
    pub fn new(
        nrow: usize,
        ncol: usize,
        values: Vec<T>,
        indices: Vec<usize>,
        pointers: Vec<usize>,
        csr: bool,
    ) -> Result<Self> {
        let (primary, secondary) = if csr { (nrow, ncol) } else { (ncol, nrow) };
        validate_compressed(values.len(), &indices, &pointers, primary, secondary)?;
        Ok(Self {
            nrow,
            ncol,
            values,
            indices,
            pointers,
            csr,
        })
    }

    /// Number of stored non-zero elements
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored indices and values of primary slice `p`
    pub fn primary_slice(&self, p: usize) -> (&[usize], &[T]) {
        let range = self.pointers[p]..self.pointers[p + 1];
        (&self.indices[range.clone()], &self.values[range])
    }

    fn core(&self, row: bool, scope: Scope, options: &Options) -> Result<CompressedCore<'_, T>> {
        let full = self.secondary_extent(row);
        scope.validate(full)?;
        let primary = row == self.csr;
        tracing::trace!(
            row,
            primary,
            nnz = self.nnz(),
            extent = scope.extent(full),
            "creating compressed matrix extractor"
        );

        let cursor = if primary {
            SecondaryCursor::default()
        } else {
            SecondaryCursor::with_capacity(scope.extent(full))
        };
        Ok(CompressedCore {
            matrix: self,
            primary,
            scope,
            full,
            options: *options,
            cursor,
        })
    }
}

/// Per-extractor positions inside each scoped primary slice
#[derive(Debug, Default)]
struct SecondaryCursor {
    positions: Vec<usize>,
    last: Option<usize>,
}

impl SecondaryCursor {
    fn with_capacity(extent: usize) -> Self {
        Self {
            positions: vec![0; extent],
            last: None,
        }
    }
}

struct CompressedCore<'a, T> {
    matrix: &'a CompressedSparseMatrix<T>,
    /// Traversal is along the compressed dimension
    primary: bool,
    scope: Scope,
    full: usize,
    options: Options,
    cursor: SecondaryCursor,
}

impl<'a, T: MatrixElement> CompressedCore<'a, T> {
    /// Visit the non-zeros of primary slice `p` that fall inside the scope
    ///
    /// `visit` receives the output position within the scope, the secondary
    /// index and the value.
    fn visit_primary(&self, p: usize, mut visit: impl FnMut(usize, usize, T)) {
        let (indices, values) = self.matrix.primary_slice(p);
        match &self.scope {
            Scope::Full => {
                for (&x, &v) in indices.iter().zip(values) {
                    visit(x, x, v);
                }
            }
            Scope::Block { start, length } => {
                let (lo, hi) = block_bounds(indices, *start, *length);
                for (&x, &v) in indices[lo..hi].iter().zip(&values[lo..hi]) {
                    visit(x - start, x, v);
                }
            }
            Scope::Indexed(subset) => {
                let (mut j, mut k) = (0, 0);
                while j < indices.len() && k < subset.len() {
                    if indices[j] < subset[k] {
                        j += 1;
                    } else if indices[j] > subset[k] {
                        k += 1;
                    } else {
                        visit(k, indices[j], values[j]);
                        j += 1;
                        k += 1;
                    }
                }
            }
        }
    }

    /// Visit every scoped primary slice holding a non-zero at secondary index `s`
    fn visit_secondary(&mut self, s: usize, mut visit: impl FnMut(usize, usize, T)) {
        let Self {
            matrix,
            scope,
            full,
            cursor,
            ..
        } = self;
        let forward = matches!(cursor.last, Some(last) if s >= last);

        for ((k, p), position) in scope.iter(*full).enumerate().zip(cursor.positions.iter_mut()) {
            let (indices, values) = matrix.primary_slice(p);
            if forward {
                while *position < indices.len() && indices[*position] < s {
                    *position += 1;
                }
            } else {
                *position = indices.partition_point(|&x| x < s);
            }
            if *position < indices.len() && indices[*position] == s {
                visit(k, p, values[*position]);
            }
        }
        cursor.last = Some(s);
    }
}

/// Offsets of the first and one-past-last stored index inside `[start, start + length)`
fn block_bounds(indices: &[usize], start: usize, length: usize) -> (usize, usize) {
    let lo = indices.partition_point(|&x| x < start);
    let hi = lo + indices[lo..].partition_point(|&x| x < start + length);
    (lo, hi)
}

impl<T: MatrixElement> DenseFetch<T> for CompressedCore<'_, T> {
    fn fetch_dense<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T] {
        let extent = self.scope.extent(self.full);
        let output = &mut buffer[..extent];
        output.fill(T::zero());
        if self.primary {
            self.visit_primary(i, |k, _, v| output[k] = v);
        } else {
            self.visit_secondary(i, |k, _, v| output[k] = v);
        }
        output
    }
}

impl<T: MatrixElement> SparseFetch<T> for CompressedCore<'_, T> {
    fn fetch_sparse<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        let extract_value = self.options.sparse_extract_value;
        let extract_index = self.options.sparse_extract_index;

        // Contiguous stretches of a primary slice can be handed out without copying.
        if self.primary {
            let direct = match &self.scope {
                Scope::Full => {
                    let (indices, values) = self.matrix.primary_slice(i);
                    Some((indices, values))
                }
                Scope::Block { start, length } => {
                    let (indices, values) = self.matrix.primary_slice(i);
                    let (lo, hi) = block_bounds(indices, *start, *length);
                    Some((&indices[lo..hi], &values[lo..hi]))
                }
                Scope::Indexed(_) => None,
            };
            if let Some((indices, values)) = direct {
                return SparseRange::new(
                    indices.len(),
                    extract_value.then_some(values),
                    extract_index.then_some(indices),
                );
            }
        }

        let mut count = 0;
        {
            let mut record = |_: usize, x: usize, v: T| {
                if extract_value {
                    vbuffer[count] = v;
                }
                if extract_index {
                    ibuffer[count] = x;
                }
                count += 1;
            };
            if self.primary {
                self.visit_primary(i, &mut record);
            } else {
                self.visit_secondary(i, &mut record);
            }
        }

        let value = if extract_value { Some(&vbuffer[..count]) } else { None };
        let index = if extract_index { Some(&ibuffer[..count]) } else { None };
        SparseRange::new(count, value, index)
    }
}

impl<T: MatrixElement> Matrix for CompressedSparseMatrix<T> {
    type Element = T;

    fn nrow(&self) -> usize {
        self.nrow
    }

    fn ncol(&self) -> usize {
        self.ncol
    }

    fn is_sparse(&self) -> bool {
        true
    }

    fn is_sparse_proportion(&self) -> f64 {
        1.0
    }

    fn prefer_rows(&self) -> bool {
        self.csr
    }

    fn prefer_rows_proportion(&self) -> f64 {
        if self.csr {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::TesseraError;

    // [1 0 2 0]
    // [0 0 0 3]
    // [4 5 0 0]
    fn small() -> CompressedSparseMatrix<f64> {
        CompressedSparseMatrix::new(
            3,
            4,
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0, 2, 3, 0, 1],
            vec![0, 2, 3, 5],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_malformed_layout() {
        let err = CompressedSparseMatrix::new(2, 2, vec![1.0], vec![2], vec![0, 1, 1], true).unwrap_err();
        assert_eq!(err, TesseraError::IndexOutOfRange { index: 2, extent: 2 });

        let err = CompressedSparseMatrix::new(2, 2, vec![1.0, 2.0], vec![1, 0], vec![0, 2, 2], true).unwrap_err();
        assert_eq!(err, TesseraError::UnsortedSubset { position: 1 });
    }

    #[test]
    fn test_primary_full_is_direct_view() {
        let matrix = small();
        let mut extractor = matrix.sparse(true, Scope::Full, &Options::default()).unwrap();
        let (mut vbuffer, mut ibuffer) = (vec![0.0; 4], vec![0; 4]);
        let range = extractor.fetch(0, &mut vbuffer, &mut ibuffer);
        assert_eq!(range.number, 2);
        assert_eq!(range.value, Some(&[1.0, 2.0][..]));
        assert_eq!(range.index, Some(&[0, 2][..]));
        assert!(std::ptr::eq(range.value.unwrap().as_ptr(), matrix.values.as_ptr()));
    }

    #[test]
    fn test_primary_block_and_indexed() {
        let matrix = small();
        let mut block = matrix.sparse(true, Scope::block(1, 3), &Options::default()).unwrap();
        let (mut vbuffer, mut ibuffer) = (vec![0.0; 3], vec![0; 3]);
        let range = block.fetch(2, &mut vbuffer, &mut ibuffer);
        assert_eq!(range.index, Some(&[1][..]));
        assert_eq!(range.value, Some(&[5.0][..]));

        let mut dense = matrix.dense(true, Scope::indexed(vec![0, 3]), &Options::default()).unwrap();
        let mut buffer = vec![9.0; 2];
        assert_eq!(dense.fetch(1, &mut buffer), &[0.0, 3.0]);
    }

    #[test]
    fn test_secondary_any_order() {
        let matrix = small();
        let mut extractor = matrix.sparse(false, Scope::Full, &Options::default()).unwrap();
        let expected: [(&[usize], &[f64]); 4] = [
            (&[0, 2], &[1.0, 4.0]),
            (&[2], &[5.0]),
            (&[0], &[2.0]),
            (&[1], &[3.0]),
        ];

        // Forward, then backwards, then a repeat, to exercise the cursor.
        for c in [0, 1, 2, 3, 1, 0, 3, 3, 2] {
            let (mut vbuffer, mut ibuffer) = (vec![0.0; 3], vec![0; 3]);
            let range = extractor.fetch(c, &mut vbuffer, &mut ibuffer);
            assert_eq!(range.index, Some(expected[c].0), "column {c}");
            assert_eq!(range.value, Some(expected[c].1), "column {c}");
        }
    }

    #[test]
    fn test_channels_off_still_count() {
        let matrix = small();
        let options = Options::default().with_extract_value(false).with_extract_index(false);
        let mut extractor = matrix.sparse(false, Scope::block(1, 2), &options).unwrap();
        let (mut vbuffer, mut ibuffer): (Vec<f64>, Vec<usize>) = (Vec::new(), Vec::new());
        let range = extractor.fetch(0, &mut vbuffer, &mut ibuffer);
        assert_eq!(range.number, 1);
        assert!(range.value.is_none());
        assert!(range.index.is_none());
    }
}
