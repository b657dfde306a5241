//! Candidate-versus-reference replay

use hashbrown::HashMap;
use tessera_core::{new_dense_extractor, new_sparse_extractor, Matrix, MatrixElement, Options, Scope};

use super::fetch::{fetch_dense, fetch_sparse, SparseVector};
use super::{access_sequence, compare_indices, compare_vectors, create_oracle, create_seed, AccessOptions, HarnessError};
use crate::simulate::create_indexed_subset;

/// Maps a reported secondary index to its offset in the dense output
enum Expander {
    Full,
    Block(usize),
    Indexed(HashMap<usize, usize>),
}

impl Expander {
    fn new(scope: &Scope) -> Self {
        match scope {
            Scope::Full => Expander::Full,
            Scope::Block { start, .. } => Expander::Block(*start),
            Scope::Indexed(indices) => {
                Expander::Indexed(indices.iter().enumerate().map(|(offset, &x)| (x, offset)).collect())
            }
        }
    }

    fn offset(&self, index: usize) -> Option<usize> {
        match self {
            Expander::Full => Some(index),
            Expander::Block(start) => index.checked_sub(*start),
            Expander::Indexed(mapping) => mapping.get(&index).copied(),
        }
    }

    /// Scatter a sparse result into a dense vector of `extent` elements
    fn expand<T: MatrixElement>(
        &self,
        values: &[T],
        indices: &[usize],
        extent: usize,
        position: usize,
    ) -> Result<Vec<T>, HarnessError> {
        let mut output = vec![T::zero(); extent];
        for (&v, &x) in values.iter().zip(indices) {
            match self.offset(x).filter(|&offset| offset < extent) {
                Some(offset) => output[offset] = v,
                None => {
                    return Err(HarnessError::StrayIndex {
                        context: "sparse retrieval",
                        position,
                        index: x,
                    })
                }
            }
        }
        Ok(output)
    }
}

/// Both channels of a default sparse fetch, checked for presence and length
fn require_channels<'a, T>(
    sparse: &'a SparseVector<T>,
    context: &'static str,
    position: usize,
) -> Result<(&'a [T], &'a [usize]), HarnessError> {
    let values = sparse.value.as_deref().ok_or(HarnessError::ChannelMissing {
        context,
        position,
        channel: "values",
    })?;
    let indices = sparse.index.as_deref().ok_or(HarnessError::ChannelMissing {
        context,
        position,
        channel: "indices",
    })?;
    for observed in [values.len(), indices.len()] {
        if observed != sparse.number {
            return Err(HarnessError::LengthMismatch {
                context,
                position,
                expected: sparse.number,
                observed,
            });
        }
    }
    Ok((values, indices))
}

pub(super) fn check_strictly_increasing(
    indices: &[usize],
    context: &'static str,
    position: usize,
) -> Result<(), HarnessError> {
    match indices.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(offset) => Err(HarnessError::UnorderedIndices {
            context,
            position,
            offset: offset + 1,
        }),
        None => Ok(()),
    }
}

/// Compare the values-only, indices-only and neither extractions with a default one
pub(super) fn check_channels<T: MatrixElement>(
    reference: &SparseVector<T>,
    values_only: &SparseVector<T>,
    indices_only: &SparseVector<T>,
    neither: &SparseVector<T>,
    position: usize,
) -> Result<(), HarnessError> {
    let (values, indices) = require_channels(reference, "sparse retrieval", position)?;

    for (context, observed) in [
        ("values-only sparse", values_only),
        ("indices-only sparse", indices_only),
        ("neither sparse", neither),
    ] {
        if observed.number != reference.number {
            return Err(HarnessError::CountMismatch {
                context,
                position,
                expected: reference.number,
                observed: observed.number,
            });
        }
    }

    let context = "values-only sparse";
    if values_only.index.is_some() {
        return Err(HarnessError::ChannelPresent {
            context,
            position,
            channel: "indices",
        });
    }
    match &values_only.value {
        Some(observed) => compare_vectors(values, observed, context, position)?,
        None => {
            return Err(HarnessError::ChannelMissing {
                context,
                position,
                channel: "values",
            })
        }
    }

    let context = "indices-only sparse";
    if indices_only.value.is_some() {
        return Err(HarnessError::ChannelPresent {
            context,
            position,
            channel: "values",
        });
    }
    match &indices_only.index {
        Some(observed) => compare_indices(indices, observed, context, position)?,
        None => {
            return Err(HarnessError::ChannelMissing {
                context,
                position,
                channel: "indices",
            })
        }
    }

    let context = "neither sparse";
    if neither.value.is_some() {
        return Err(HarnessError::ChannelPresent {
            context,
            position,
            channel: "values",
        });
    }
    if neither.index.is_some() {
        return Err(HarnessError::ChannelPresent {
            context,
            position,
            channel: "indices",
        });
    }

    Ok(())
}

/// Option sets for the default, values-only, indices-only and neither extractors
pub(super) fn channel_options(base: Options) -> [Options; 4] {
    [
        base,
        base.with_extract_index(false),
        base.with_extract_value(false),
        base.with_extract_value(false).with_extract_index(false),
    ]
}

fn test_access_base<M, R>(matrix: &M, reference: &R, options: &AccessOptions, scope: Scope) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    let (nrow, ncol) = matrix.dimensions();
    if reference.dimensions() != (nrow, ncol) {
        return Err(HarnessError::DimensionMismatch {
            expected: reference.dimensions(),
            observed: (nrow, ncol),
        });
    }

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
        "replaying access pattern"
    );

    let defaults = Options::default();
    let mut expected_work = new_dense_extractor(reference, row, oracle.clone(), scope.clone(), &defaults)?;
    let mut dense_work = new_dense_extractor(matrix, row, oracle.clone(), scope.clone(), &defaults)?;
    let [sparse_options, values_options, indices_options, neither_options] = channel_options(defaults);
    let mut sparse_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &sparse_options)?;
    let mut values_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &values_options)?;
    let mut indices_work = new_sparse_extractor(matrix, row, oracle.clone(), scope.clone(), &indices_options)?;
    let mut neither_work = new_sparse_extractor(matrix, row, oracle, scope.clone(), &neither_options)?;

    let expander = Expander::new(&scope);
    let mut observed_nonzeros = 0;

    for &position in &sequence {
        let expected = fetch_dense(&mut expected_work, position, extent);

        let dense = fetch_dense(&mut dense_work, position, extent);
        compare_vectors(&expected, &dense, "dense retrieval", position)?;

        let sparse = fetch_sparse(&mut sparse_work, position, extent);
        let (values, indices) = require_channels(&sparse, "sparse retrieval", position)?;
        let expanded = expander.expand(values, indices, extent, position)?;
        compare_vectors(&expected, &expanded, "sparse retrieval", position)?;
        if sparse_options.sparse_ordered_index {
            check_strictly_increasing(indices, "sparse retrieval", position)?;
        }

        let values_only = fetch_sparse(&mut values_work, position, extent);
        let indices_only = fetch_sparse(&mut indices_work, position, extent);
        let neither = fetch_sparse(&mut neither_work, position, extent);
        check_channels(&sparse, &values_only, &indices_only, &neither, position)?;

        observed_nonzeros += sparse.number;
    }

    let total = nrow * ncol;
    if options.check_sparse && matrix.is_sparse() && total > 0 {
        tracing::debug!(observed_nonzeros, total, "checking sparsity");
        if observed_nonzeros >= total {
            return Err(HarnessError::NotSparse {
                observed: observed_nonzeros,
                total,
            });
        }
    }

    Ok(())
}

/// Replay the access pattern over the full non-target dimension
pub fn test_full_access<M, R>(matrix: &M, reference: &R, options: &AccessOptions) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    test_access_base(matrix, reference, options, Scope::Full)
}

/// Replay the access pattern over a block given as fractions of the non-target extent
///
/// The block starts at `floor(n * relative_start)` and spans
/// `floor(n * relative_length)` elements.
pub fn test_block_access<M, R>(
    matrix: &M,
    reference: &R,
    relative_start: f64,
    relative_length: f64,
    options: &AccessOptions,
) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    let full = matrix.secondary_extent(options.use_row);
    let start = (full as f64 * relative_start) as usize;
    let length = (full as f64 * relative_length) as usize;
    test_access_base(matrix, reference, options, Scope::block(start, length))
}

/// Replay the access pattern over a random subset of the non-target dimension
///
/// The subset comes from [`create_indexed_subset`], seeded from the access
/// seed, the inclusion probability and the start position.
pub fn test_indexed_access<M, R>(
    matrix: &M,
    reference: &R,
    relative_start: f64,
    probability: f64,
    options: &AccessOptions,
) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    let subset = indexed_scope(matrix, relative_start, probability, options);
    test_access_base(matrix, reference, options, Scope::indexed(subset))
}

pub(super) fn indexed_scope<M: Matrix + ?Sized>(
    matrix: &M,
    relative_start: f64,
    probability: f64,
    options: &AccessOptions,
) -> Vec<usize> {
    let (nrow, ncol) = matrix.dimensions();
    let full = matrix.secondary_extent(options.use_row);
    let start = (full as f64 * relative_start) as u64;
    let seed = create_seed(nrow, ncol, options)
        .wrapping_add((999.0 * probability) as u64)
        .wrapping_add(start.wrapping_mul(888));
    create_indexed_subset(full, relative_start, probability, seed)
}

/// Full forward row access without an oracle
pub fn test_simple_row_access<M, R>(matrix: &M, reference: &R) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    test_full_access(matrix, reference, &AccessOptions::default().with_row(true))
}

/// Full forward column access without an oracle
pub fn test_simple_column_access<M, R>(matrix: &M, reference: &R) -> Result<(), HarnessError>
where
    M: Matrix + ?Sized,
    R: Matrix<Element = M::Element> + ?Sized,
{
    test_full_access(matrix, reference, &AccessOptions::default().with_row(false))
}
