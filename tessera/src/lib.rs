//! Tessera - Dense and sparse matrix extraction with access verification
//!
//! This library provides reference matrix backends implementing the
//! extraction contracts of `tessera-core`, seeded fixture generators, and a
//! harness that replays access patterns against a candidate matrix.
//!
//! ## Architecture
//!
//! Tessera follows a contract/implementation separation:
//!
//! - **tessera-core**: Extractor roles, scopes, oracles and validation (no I/O, no randomness)
//! - **tessera**: Concrete backends, simulators, wrapper adapters and the harness
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::harness::{run_combinations, standard_combinations, test_full_access};
//! use tessera::simulate::{simulate_vector, SimulateVectorOptions};
//! use tessera::DenseMatrix;
//!
//! let (nrow, ncol) = (20, 30);
//! let values: Vec<f64> = simulate_vector(nrow * ncol, &SimulateVectorOptions::default());
//! let matrix = DenseMatrix::new(nrow, ncol, values.clone(), true).unwrap();
//!
//! // Same content, column-major layout
//! let mut transposed = Vec::with_capacity(values.len());
//! for c in 0..ncol {
//!     for r in 0..nrow {
//!         transposed.push(values[r * ncol + c]);
//!     }
//! }
//! let reference = DenseMatrix::new(nrow, ncol, transposed, false).unwrap();
//!
//! run_combinations(&standard_combinations(), |options| {
//!     test_full_access(&matrix, &reference, options)
//! })
//! .unwrap();
//! ```
//!
//! ## Features
//!
//! - **Direct views**: Primary-dimension extraction returns slices of storage without copying
//! - **Oracles**: Every backend accepts predicted access sequences
//! - **Harness**: Dense/sparse equivalence, channel toggles and ordering checks per position
//! - **serde**: Option structs serialize for recording scenarios

// Re-export core abstractions
pub use tessera_core::{
    // Extraction contracts
    Matrix, MatrixElement, MyopicDenseExtractor, MyopicSparseExtractor, OracularDenseExtractor,
    OracularSparseExtractor, Options, Scope, SparseRange,
    BoxedMyopicDense, BoxedMyopicSparse, BoxedOracularDense, BoxedOracularSparse,
    // Oracles
    ConsecutiveOracle, FixedOracle, Oracle,
    // Dispatch
    new_dense_extractor, new_sparse_extractor, DenseWork, SparseWork,
    // Error handling
    Result, TesseraError,
};

// Implementation modules
pub mod compressed;
pub mod dense;
pub mod harness;
pub mod simulate;
pub mod wrappers;

// Public exports
pub use compressed::CompressedSparseMatrix;
pub use dense::DenseMatrix;
pub use wrappers::{ForcedOracleWrapper, ReversedIndicesWrapper};
