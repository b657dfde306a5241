//! Access-pattern replay for verifying matrix implementations
//!
//! A candidate matrix is traversed along rows or columns in a configurable
//! order, with or without an oracle, and every fetched row/column is checked
//! against a reference matrix holding the same logical content. All
//! randomness is derived from the matrix shape and the [`AccessOptions`], so a
//! failing scenario replays identically.
//!
//! Checks return [`HarnessError`] instead of panicking, which lets
//! [`run_combinations`] report every failing configuration at once.

mod access;
mod error;
mod fetch;
mod unsorted;

use std::fmt::Display;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tessera_core::{ConsecutiveOracle, FixedOracle, MatrixElement, Oracle};

pub use access::{
    test_block_access, test_full_access, test_indexed_access, test_simple_column_access, test_simple_row_access,
};
pub use error::{CombinationFailures, HarnessError};
pub use fetch::{fetch_dense, fetch_sparse, SparseVector};
pub use unsorted::{test_unsorted_block_access, test_unsorted_full_access, test_unsorted_indexed_access};

/// Order in which the target dimension is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessOrder {
    #[default]
    Forward,
    Reverse,
    Random,
}

impl AccessOrder {
    /// Contribution of the order to the sequence seed
    const fn code(self) -> u64 {
        match self {
            AccessOrder::Forward => 0,
            AccessOrder::Reverse => 1,
            AccessOrder::Random => 2,
        }
    }
}

/// Configuration of a single access scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessOptions {
    /// Traverse rows rather than columns
    pub use_row: bool,
    /// Supply an oracle matching the access sequence
    pub use_oracle: bool,
    pub order: AccessOrder,
    /// Step between visited positions, at least 1
    pub jump: usize,
    /// Require sparse matrices to report fewer non-zeros than elements
    pub check_sparse: bool,
}

impl Default for AccessOptions {
    fn default() -> Self {
        Self {
            use_row: true,
            use_oracle: false,
            order: AccessOrder::Forward,
            jump: 1,
            check_sparse: true,
        }
    }
}

impl AccessOptions {
    pub fn with_row(mut self, use_row: bool) -> Self {
        self.use_row = use_row;
        self
    }

    pub fn with_oracle(mut self, use_oracle: bool) -> Self {
        self.use_oracle = use_oracle;
        self
    }

    pub fn with_order(mut self, order: AccessOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_jump(mut self, jump: usize) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_check_sparse(mut self, check_sparse: bool) -> Self {
        self.check_sparse = check_sparse;
        self
    }
}

/// Seed for the access sequence of an `nrow` x `ncol` matrix
pub fn create_seed(nrow: usize, ncol: usize, options: &AccessOptions) -> u64 {
    (nrow as u64)
        .wrapping_mul(ncol as u64)
        .wrapping_add(13 * u64::from(options.use_row))
        .wrapping_add(57 * options.order.code())
        .wrapping_add((options.jump as u64).wrapping_mul(101))
}

/// Positions of the target dimension to visit, in visiting order
///
/// Forward visits `0, jump, 2 * jump, ...`; reverse starts from the last
/// position and steps down by `jump`; random shuffles the forward positions
/// with a seed from [`create_seed`].
pub fn access_sequence(nrow: usize, ncol: usize, options: &AccessOptions) -> Vec<usize> {
    let limit = if options.use_row { nrow } else { ncol };
    let jump = options.jump.max(1);

    match options.order {
        AccessOrder::Forward => (0..limit).step_by(jump).collect(),
        AccessOrder::Reverse => (0..limit).rev().step_by(jump).collect(),
        AccessOrder::Random => {
            let mut sequence: Vec<usize> = (0..limit).step_by(jump).collect();
            let mut rng = StdRng::seed_from_u64(create_seed(nrow, ncol, options));
            sequence.shuffle(&mut rng);
            sequence
        }
    }
}

/// Oracle predicting `sequence`, or `None` when oracles are disabled
///
/// Consecutive forward access gets a [`ConsecutiveOracle`]; anything else an
/// explicit [`FixedOracle`].
pub fn create_oracle(sequence: &[usize], options: &AccessOptions) -> Option<Arc<dyn Oracle>> {
    if !options.use_oracle {
        return None;
    }
    let oracle: Arc<dyn Oracle> = if options.order == AccessOrder::Forward && options.jump == 1 {
        Arc::new(ConsecutiveOracle::new(0, sequence.len()))
    } else {
        Arc::new(FixedOracle::new(sequence.to_vec()))
    };
    Some(oracle)
}

/// Every combination of dimension, oracle, order and jump in {1, 3}
pub fn standard_combinations() -> Vec<AccessOptions> {
    let mut output = Vec::with_capacity(24);
    for use_row in [true, false] {
        for use_oracle in [false, true] {
            for order in [AccessOrder::Forward, AccessOrder::Reverse, AccessOrder::Random] {
                for jump in [1, 3] {
                    output.push(
                        AccessOptions::default()
                            .with_row(use_row)
                            .with_oracle(use_oracle)
                            .with_order(order)
                            .with_jump(jump),
                    );
                }
            }
        }
    }
    output
}

/// Run `check` for every case, collecting all failures
///
/// Cases run in parallel; each one builds its own extractors, so nothing is
/// shared between threads except the matrices, which are read-only.
pub fn run_combinations<F>(cases: &[AccessOptions], check: F) -> Result<(), CombinationFailures>
where
    F: Fn(&AccessOptions) -> Result<(), HarnessError> + Send + Sync,
{
    let failures: Vec<(AccessOptions, HarnessError)> = cases
        .par_iter()
        .filter_map(|case| match check(case) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(?case, %err, "access combination failed");
                Some((*case, err))
            }
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CombinationFailures {
            total: cases.len(),
            failures,
        })
    }
}

/// Exact equality where NaN matches NaN
pub fn same_value<T: MatrixElement>(expected: T, observed: T) -> bool {
    expected == observed || (expected.is_nan() && observed.is_nan())
}

/// Compare two vectors element by element with [`same_value`]
pub fn compare_vectors<T: MatrixElement>(
    expected: &[T],
    observed: &[T],
    context: &'static str,
    position: usize,
) -> Result<(), HarnessError> {
    if expected.len() != observed.len() {
        return Err(HarnessError::LengthMismatch {
            context,
            position,
            expected: expected.len(),
            observed: observed.len(),
        });
    }
    match expected
        .iter()
        .zip(observed)
        .position(|(&e, &o)| !same_value(e, o))
    {
        Some(offset) => Err(HarnessError::ValueMismatch {
            context,
            position,
            offset,
            expected: format!("{:?}", expected[offset]),
            observed: format!("{:?}", observed[offset]),
        }),
        None => Ok(()),
    }
}

/// Compare two index vectors exactly
pub fn compare_indices(
    expected: &[usize],
    observed: &[usize],
    context: &'static str,
    position: usize,
) -> Result<(), HarnessError> {
    if expected.len() != observed.len() {
        return Err(HarnessError::LengthMismatch {
            context,
            position,
            expected: expected.len(),
            observed: observed.len(),
        });
    }
    match expected.iter().zip(observed).position(|(e, o)| e != o) {
        Some(offset) => Err(HarnessError::IndexMismatch {
            context,
            position,
            offset,
            expected: expected[offset],
            observed: observed[offset],
        }),
        None => Ok(()),
    }
}

/// Expect `operation` to fail with a message containing `substring`
pub fn expect_error<T, E: Display>(
    operation: impl FnOnce() -> Result<T, E>,
    substring: &str,
) -> Result<(), HarnessError> {
    match operation() {
        Ok(_) => Err(HarnessError::MissingError {
            expected: substring.to_string(),
        }),
        Err(err) => {
            let message = err.to_string();
            if message.contains(substring) {
                Ok(())
            } else {
                Err(HarnessError::UnexpectedError {
                    expected: substring.to_string(),
                    observed: message,
                })
            }
        }
    }
}
