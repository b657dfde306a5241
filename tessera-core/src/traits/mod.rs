//! Abstract interfaces
//!
//! This module defines the matrix and extractor traits that every storage
//! backend implements. Apart from the generic myopic/oracular adapters these
//! are pure interfaces.

pub mod element;
pub mod extractor;
pub mod matrix;

pub use element::MatrixElement;
pub use extractor::{
    DenseFetch, Myopic, MyopicDenseExtractor, MyopicSparseExtractor, Oracular, OracularDenseExtractor,
    OracularSparseExtractor, SparseFetch,
};
pub use matrix::{BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse, Matrix};
