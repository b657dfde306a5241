//! The four extractor roles
//!
//! Extractors are split along two axes: dense or sparse output, and myopic
//! (index given per call) or oracular (index drawn from an agreed oracle).
//! Every role borrows its output from `&mut self`, so a returned view lives
//! until the next fetch on the same extractor.
//!
//! Backends may implement the roles directly, or implement one of the
//! [`DenseFetch`]/[`SparseFetch`] primitives and wrap it in [`Myopic`] or
//! [`Oracular`].

use crate::oracle::{Oracle, OracleCursor};
use crate::sparse_range::SparseRange;
use alloc::sync::Arc;

/// Dense extraction of an explicitly requested row/column
pub trait MyopicDenseExtractor<T> {
    /// Fetch row/column `i`
    ///
    /// `buffer` must hold at least the scope extent. The returned slice has
    /// exactly that many elements and is either `buffer` or a direct view of
    /// backend storage.
    fn fetch<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T];
}

/// Sparse extraction of an explicitly requested row/column
pub trait MyopicSparseExtractor<T> {
    /// Fetch row/column `i`
    ///
    /// Buffers for disabled channels may be empty.
    fn fetch<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T>;
}

/// Dense extraction of the next row/column predicted by an oracle
pub trait OracularDenseExtractor<T> {
    /// Fetch the next predicted row/column
    ///
    /// # Panics
    ///
    /// May panic once every prediction has been fetched.
    fn fetch<'b>(&'b mut self, buffer: &'b mut [T]) -> &'b [T];
}

/// Sparse extraction of the next row/column predicted by an oracle
pub trait OracularSparseExtractor<T> {
    /// Fetch the next predicted row/column
    ///
    /// # Panics
    ///
    /// May panic once every prediction has been fetched.
    fn fetch<'b>(&'b mut self, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T>;
}

/// Dense fetch primitive shared by myopic and oracular adapters
pub trait DenseFetch<T> {
    fn fetch_dense<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T];
}

/// Sparse fetch primitive shared by myopic and oracular adapters
pub trait SparseFetch<T> {
    fn fetch_sparse<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T>;
}

/// Myopic extractor over a fetch primitive
#[derive(Debug, Clone)]
pub struct Myopic<S> {
    source: S,
}

impl<S> Myopic<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<T, S: DenseFetch<T>> MyopicDenseExtractor<T> for Myopic<S> {
    fn fetch<'b>(&'b mut self, i: usize, buffer: &'b mut [T]) -> &'b [T] {
        self.source.fetch_dense(i, buffer)
    }
}

impl<T, S: SparseFetch<T>> MyopicSparseExtractor<T> for Myopic<S> {
    fn fetch<'b>(&'b mut self, i: usize, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        self.source.fetch_sparse(i, vbuffer, ibuffer)
    }
}

/// Oracular extractor over a fetch primitive
///
/// Each fetch takes the next prediction from its own cursor.
#[derive(Debug, Clone)]
pub struct Oracular<S> {
    source: S,
    cursor: OracleCursor,
}

impl<S> Oracular<S> {
    pub fn new(source: S, oracle: Arc<dyn Oracle>) -> Self {
        Self {
            source,
            cursor: OracleCursor::new(oracle),
        }
    }

    /// Cursor over the predictions still to be fetched
    pub fn cursor(&self) -> &OracleCursor {
        &self.cursor
    }
}

impl<T, S: DenseFetch<T>> OracularDenseExtractor<T> for Oracular<S> {
    fn fetch<'b>(&'b mut self, buffer: &'b mut [T]) -> &'b [T] {
        let i = self.cursor.next_index();
        self.source.fetch_dense(i, buffer)
    }
}

impl<T, S: SparseFetch<T>> OracularSparseExtractor<T> for Oracular<S> {
    fn fetch<'b>(&'b mut self, vbuffer: &'b mut [T], ibuffer: &'b mut [usize]) -> SparseRange<'b, T> {
        let i = self.cursor.next_index();
        self.source.fetch_sparse(i, vbuffer, ibuffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FixedOracle;
    use alloc::vec;

    /// Row `i` is `[i, i, i]`
    struct Constant;

    impl DenseFetch<f64> for Constant {
        fn fetch_dense<'b>(&'b mut self, i: usize, buffer: &'b mut [f64]) -> &'b [f64] {
            buffer[..3].fill(i as f64);
            &buffer[..3]
        }
    }

    #[test]
    fn test_myopic_forwards_index() {
        let mut extractor = Myopic::new(Constant);
        let mut buffer = [0.0; 3];
        assert_eq!(
            MyopicDenseExtractor::fetch(&mut extractor, 4, &mut buffer[..]),
            &[4.0, 4.0, 4.0]
        );
    }

    #[test]
    fn test_oracular_follows_predictions() {
        let oracle: Arc<dyn Oracle> = Arc::new(FixedOracle::from(vec![7, 2]));
        let mut extractor = Oracular::new(Constant, oracle);
        let mut buffer = [0.0; 3];
        assert_eq!(OracularDenseExtractor::fetch(&mut extractor, &mut buffer[..]), &[7.0; 3]);
        assert_eq!(OracularDenseExtractor::fetch(&mut extractor, &mut buffer[..]), &[2.0; 3]);
        assert_eq!(extractor.cursor().remaining(), 0);
    }
}
