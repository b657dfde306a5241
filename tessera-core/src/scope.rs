//! Restriction of the non-target dimension for a single extractor
//!
//! A scope is fixed when an extractor is created and applies to every fetch
//! made through that extractor.

use alloc::sync::Arc;
use core::ops::Range;

use crate::validation::{validate_block, validate_subset};
use crate::Result;

/// Which elements of the non-target dimension an extractor returns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// The entire non-target dimension
    #[default]
    Full,
    /// A contiguous run `[start, start + length)`
    Block { start: usize, length: usize },
    /// An explicit, strictly increasing subset of positions
    Indexed(Arc<[usize]>),
}

impl Scope {
    /// Create a block scope
    pub const fn block(start: usize, length: usize) -> Self {
        Scope::Block { start, length }
    }

    /// Create an indexed scope from any collection of positions
    pub fn indexed(indices: impl Into<Arc<[usize]>>) -> Self {
        Scope::Indexed(indices.into())
    }

    /// Check this scope against the full extent of the non-target dimension
    pub fn validate(&self, full_extent: usize) -> Result<()> {
        match self {
            Scope::Full => Ok(()),
            Scope::Block { start, length } => validate_block(*start, *length, full_extent),
            Scope::Indexed(indices) => validate_subset(indices, full_extent),
        }
    }

    /// Number of elements produced per dense fetch
    pub fn extent(&self, full_extent: usize) -> usize {
        match self {
            Scope::Full => full_extent,
            Scope::Block { length, .. } => *length,
            Scope::Indexed(indices) => indices.len(),
        }
    }

    /// Contiguous range covered by this scope, if it is not indexed
    pub fn range(&self, full_extent: usize) -> Option<Range<usize>> {
        match self {
            Scope::Full => Some(0..full_extent),
            Scope::Block { start, length } => Some(*start..*start + *length),
            Scope::Indexed(_) => None,
        }
    }

    /// Selected positions in increasing order
    pub fn iter(&self, full_extent: usize) -> ScopeIter<'_> {
        match self {
            Scope::Indexed(indices) => ScopeIter::Indices(indices.iter()),
            _ => ScopeIter::Range(self.range(full_extent).unwrap_or(0..0)),
        }
    }

    /// Write the selected positions into `buffer`, returning the filled prefix
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than the scope extent.
    pub fn fill_positions<'b>(&self, full_extent: usize, buffer: &'b mut [usize]) -> &'b [usize] {
        let output = &mut buffer[..self.extent(full_extent)];
        for (slot, position) in output.iter_mut().zip(self.iter(full_extent)) {
            *slot = position;
        }
        output
    }
}

/// Iterator over the positions selected by a [`Scope`]
#[derive(Debug, Clone)]
pub enum ScopeIter<'a> {
    Range(Range<usize>),
    Indices(core::slice::Iter<'a, usize>),
}

impl Iterator for ScopeIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            ScopeIter::Range(range) => range.next(),
            ScopeIter::Indices(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ScopeIter::Range(range) => range.size_hint(),
            ScopeIter::Indices(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for ScopeIter<'_> {}
