//! Core matrix abstraction
//!
//! Every storage backend implements [`Matrix`]: shape and layout hints plus
//! one factory per extractor role. Extractors borrow the matrix and never
//! mutate it.

use alloc::boxed::Box;
use alloc::sync::Arc;

use super::element::MatrixElement;
use super::extractor::{
    MyopicDenseExtractor, MyopicSparseExtractor, OracularDenseExtractor, OracularSparseExtractor,
};
use crate::{Options, Oracle, Result, Scope};

/// Boxed myopic dense extractor borrowing a matrix for `'a`
pub type BoxedMyopicDense<'a, T> = Box<dyn MyopicDenseExtractor<T> + 'a>;
/// Boxed myopic sparse extractor borrowing a matrix for `'a`
pub type BoxedMyopicSparse<'a, T> = Box<dyn MyopicSparseExtractor<T> + 'a>;
/// Boxed oracular dense extractor borrowing a matrix for `'a`
pub type BoxedOracularDense<'a, T> = Box<dyn OracularDenseExtractor<T> + 'a>;
/// Boxed oracular sparse extractor borrowing a matrix for `'a`
pub type BoxedOracularSparse<'a, T> = Box<dyn OracularSparseExtractor<T> + 'a>;

/// Read-only two-dimensional matrix
///
/// `row = true` traverses rows (the non-target dimension is then the
/// columns); `row = false` traverses columns. The [`Scope`] restricts the
/// non-target dimension and is validated by every factory.
pub trait Matrix: Send + Sync {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Number of rows
    fn nrow(&self) -> usize;

    /// Number of columns
    fn ncol(&self) -> usize;

    /// Whether the matrix is stored sparsely
    fn is_sparse(&self) -> bool;

    /// Proportion of the matrix that is stored sparsely
    fn is_sparse_proportion(&self) -> f64;

    /// Whether row traversal is the preferred access pattern
    fn prefer_rows(&self) -> bool;

    /// Proportion of the matrix for which row traversal is preferred
    fn prefer_rows_proportion(&self) -> f64;

    /// Whether the backend benefits from an oracle along this dimension
    fn uses_oracle(&self, row: bool) -> bool;

    /// Myopic dense extractor
    fn dense<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicDense<'a, Self::Element>>;

    /// Myopic sparse extractor
    fn sparse<'a>(&'a self, row: bool, scope: Scope, options: &Options) -> Result<BoxedMyopicSparse<'a, Self::Element>>;

    /// Oracular dense extractor
    fn dense_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularDense<'a, Self::Element>>;

    /// Oracular sparse extractor
    fn sparse_oracular<'a>(
        &'a self,
        row: bool,
        oracle: Arc<dyn Oracle>,
        scope: Scope,
        options: &Options,
    ) -> Result<BoxedOracularSparse<'a, Self::Element>>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        (self.nrow(), self.ncol())
    }

    /// Number of positions along the traversal dimension
    fn target_extent(&self, row: bool) -> usize {
        if row {
            self.nrow()
        } else {
            self.ncol()
        }
    }

    /// Number of positions along the non-target dimension
    fn secondary_extent(&self, row: bool) -> usize {
        if row {
            self.ncol()
        } else {
            self.nrow()
        }
    }
}
