//! Ordered-versus-unordered sparse replay
//!
//! No reference matrix is involved. Each position is fetched once with
//! ordered indices and once without; sorting the unordered result by index
//! must reproduce the ordered one exactly.

use tessera_core::{new_sparse_extractor, Matrix, MatrixElement, Options, Scope};

use super::access::{channel_options, check_channels, check_strictly_increasing, indexed_scope};
use super::fetch::{fetch_sparse, SparseVector};
use super::{access_sequence, compare_indices, compare_vectors, create_oracle, AccessOptions, HarnessError};

/// Values and indices of `sparse` reordered by increasing index
fn sort_by_index<T: MatrixElement>(sparse: &SparseVector<T>) -> (Vec<T>, Vec<usize>) {
    let values = sparse.value.as_deref().unwrap_or_default();
    let indices = sparse.index.as_deref().unwrap_or_default();
    let mut pairs: Vec<(usize, T)> = indices.iter().copied().zip(values.iter().copied()).collect();
    pairs.sort_by_key(|&(x, _)| x);
    pairs.into_iter().map(|(x, v)| (v, x)).unzip()
}

fn test_unsorted_access_base<M: Matrix + ?Sized>(
    matrix: &M,
    options: &AccessOptions,
    scope: Scope,
) -> Result<(), HarnessError> {
    let (nrow, ncol) = matrix.dimensions();
    let row = options.use_row;
    let extent = scope.extent(matrix.secondary_extent(row));
    let sequence = access_sequence(nrow, ncol, options);
    let oracle = create_oracle(&sequence, options);
    tracing::debug!(
        nrow,
        ncol,
        row,
        oracle = options.use_oracle,
        order = ?options.order,
        jump = options.jump,
        extent,
        "replaying unordered access pattern"
    );

    let ordered_options = Options::default();
    let [unordered_options, values_options, indices_options, neither_options] =
        channel_options(Options::default().with_ordered_index(false));
    let mut ordered_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &ordered_options)?;
    let mut unordered_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &unordered_options)?;
    let mut values_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &values_options)?;
    let mut indices_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &indices_options)?;
    let mut neither_work = new_sparse_extractor(matrix, row, oracle, scope, &neither_options)?;

    for &position in &sequence {
        let ordered = fetch_sparse(&mut ordered_work, position, extent);
        let unordered = fetch_sparse(&mut unordered_work, position, extent);

        if unordered.number != ordered.number {
            return Err(HarnessError::CountMismatch {
                context: "unsorted sparse",
                position,
                expected: ordered.number,
                observed: unordered.number,
            });
        }
        let (expected_values, expected_indices) = match (&ordered.value, &ordered.index) {
            (Some(values), Some(indices)) => (values, indices),
            _ => {
                return Err(HarnessError::ChannelMissing {
                    context: "ordered sparse",
                    position,
                    channel: "values or indices",
                })
            }
        };
        check_strictly_increasing(expected_indices, "ordered sparse", position)?;

        let (values, indices) = sort_by_index(&unordered);
        compare_indices(expected_indices, &indices, "unsorted sparse", position)?;
        compare_vectors(expected_values, &values, "unsorted sparse", position)?;

        let values_only = fetch_sparse(&mut values_work, position, extent);
        let indices_only = fetch_sparse(&mut indices_work, position, extent);
        let neither = fetch_sparse(&mut neither_work, position, extent);
        check_channels(&unordered, &values_only, &indices_only, &neither, position)?;
    }

    Ok(())
}

/// Compare ordered and unordered extraction over the full non-target dimension
pub fn test_unsorted_full_access<M: Matrix + ?Sized>(matrix: &M, options: &AccessOptions) -> Result<(), HarnessError> {
    test_unsorted_access_base(matrix, options, Scope::Full)
}

/// Compare ordered and unordered extraction over a block of the non-target dimension
pub fn test_unsorted_block_access<M: Matrix + ?Sized>(
    matrix: &M,
    relative_start: f64,
    relative_length: f64,
    options: &AccessOptions,
) -> Result<(), HarnessError> {
    let full = matrix.secondary_extent(options.use_row);
    let start = (full as f64 * relative_start) as usize;
    let length = (full as f64 * relative_length) as usize;
    test_unsorted_access_base(matrix, options, Scope::block(start, length))
}

/// Compare ordered and unordered extraction over a random subset of the non-target dimension
pub fn test_unsorted_indexed_access<M: Matrix + ?Sized>(
    matrix: &M,
    relative_start: f64,
    probability: f64,
    options: &AccessOptions,
) -> Result<(), HarnessError> {
    let subset = indexed_scope(matrix, relative_start, probability, options);
    test_unsorted_access_base(matrix, options, Scope::indexed(subset))
}
