//! Failures reported by the access harness

use tessera_core::TesseraError;
use thiserror::Error;

use super::AccessOptions;

/// A single discrepancy found while replaying an access pattern
///
/// `context` names the sub-check ("dense retrieval", "sparse retrieval",
/// "unsorted sparse", ...) and `position` the row or column being fetched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    #[error("matrix is {observed:?} but reference is {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        observed: (usize, usize),
    },

    #[error("{context} at {position}: length {observed}, expected {expected}")]
    LengthMismatch {
        context: &'static str,
        position: usize,
        expected: usize,
        observed: usize,
    },

    #[error("{context} at {position}, offset {offset}: value {observed}, expected {expected}")]
    ValueMismatch {
        context: &'static str,
        position: usize,
        offset: usize,
        expected: String,
        observed: String,
    },

    #[error("{context} at {position}, offset {offset}: index {observed}, expected {expected}")]
    IndexMismatch {
        context: &'static str,
        position: usize,
        offset: usize,
        expected: usize,
        observed: usize,
    },

    #[error("{context} at {position}: index {index} lies outside the extraction scope")]
    StrayIndex {
        context: &'static str,
        position: usize,
        index: usize,
    },

    #[error("{context} at {position}: {observed} non-zeros, expected {expected}")]
    CountMismatch {
        context: &'static str,
        position: usize,
        expected: usize,
        observed: usize,
    },

    #[error("{context} at {position}: indices not strictly increasing at offset {offset}")]
    UnorderedIndices {
        context: &'static str,
        position: usize,
        offset: usize,
    },

    #[error("{context} at {position}: {channel} returned although it was not requested")]
    ChannelPresent {
        context: &'static str,
        position: usize,
        channel: &'static str,
    },

    #[error("{context} at {position}: {channel} missing although it was requested")]
    ChannelMissing {
        context: &'static str,
        position: usize,
        channel: &'static str,
    },

    #[error("sparse matrix reported {observed} non-zeros out of {total} elements")]
    NotSparse { observed: usize, total: usize },

    #[error("expected an error containing {expected:?}, but the operation succeeded")]
    MissingError { expected: String },

    #[error("expected an error containing {expected:?}, got {observed:?}")]
    UnexpectedError { expected: String, observed: String },

    #[error("extractor construction failed: {0}")]
    Extraction(#[from] TesseraError),
}

/// Every combination that failed in a [`run_combinations`](super::run_combinations) call
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} of {total} access combinations failed", failures.len())]
pub struct CombinationFailures {
    pub total: usize,
    pub failures: Vec<(AccessOptions, HarnessError)>,
}
