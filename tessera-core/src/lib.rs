#![no_std]

//! Tessera Core - Extraction contracts for dense and sparse matrices
//!
//! This crate defines how rows and columns are pulled out of a matrix,
//! independently of how the matrix is stored: the four extractor roles,
//! the scope restricting the non-target dimension, output toggles, oracles
//! predicting future accesses, and construction-time validation.

extern crate alloc;

pub mod dispatch;
pub mod error;
pub mod options;
pub mod oracle;
pub mod scope;
pub mod sparse_range;
pub mod traits;
pub mod validation;

pub use dispatch::{new_dense_extractor, new_sparse_extractor, DenseWork, SparseWork};
pub use error::*;
pub use options::Options;
pub use oracle::{ConsecutiveOracle, FixedOracle, Oracle, OracleCursor};
pub use scope::{Scope, ScopeIter};
pub use sparse_range::SparseRange;
pub use traits::*;
