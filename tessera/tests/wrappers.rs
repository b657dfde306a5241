mod common;

use std::sync::Arc;

use common::{dense_pair, sparse_pair};
use tessera::harness::{
    run_combinations, standard_combinations, test_block_access, test_full_access, test_indexed_access,
    test_unsorted_block_access, test_unsorted_full_access, test_unsorted_indexed_access,
};
use tessera::simulate::{SimulateCompressedSparseOptions, SimulateVectorOptions};
use tessera::{ForcedOracleWrapper, Matrix, Options, ReversedIndicesWrapper, Scope};

#[test]
fn test_reversed_passes_unsorted_harness() {
    for csr in [true, false] {
        let (matrix, reference) = sparse_pair(152, 198, csr, &SimulateCompressedSparseOptions::default());
        let wrapped = ReversedIndicesWrapper::new(Arc::new(matrix));
        let cases = standard_combinations();

        run_combinations(&cases, |options| {
            test_unsorted_full_access(&wrapped, options)?;
            test_unsorted_block_access(&wrapped, 0.1, 0.5, options)?;
            test_unsorted_indexed_access(&wrapped, 0.2, 0.3, options)
        })
        .unwrap();

        // Ordered extraction is untouched, so the regular harness still agrees
        run_combinations(&cases, |options| test_full_access(&wrapped, &reference, options)).unwrap();
    }
}

#[test]
fn test_reversed_really_reverses() {
    let (matrix, _) = sparse_pair(152, 198, true, &SimulateCompressedSparseOptions::default().with_density(0.3));
    let inner = Arc::new(matrix);
    let wrapped = ReversedIndicesWrapper::new(Arc::clone(&inner));

    let mut ordered = inner.sparse(true, Scope::Full, &Options::default()).unwrap();
    let mut unordered = wrapped
        .sparse(true, Scope::Full, &Options::default().with_ordered_index(false))
        .unwrap();

    for r in 0..152 {
        let (mut v1, mut i1) = (vec![0.0; 198], vec![0; 198]);
        let (mut v2, mut i2) = (vec![0.0; 198], vec![0; 198]);
        let expected = ordered.fetch(r, &mut v1, &mut i1);
        let observed = unordered.fetch(r, &mut v2, &mut i2);

        let mut values = observed.value.unwrap().to_vec();
        let mut indices = observed.index.unwrap().to_vec();
        values.reverse();
        indices.reverse();
        assert_eq!(values, expected.value.unwrap(), "row {r}");
        assert_eq!(indices, expected.index.unwrap(), "row {r}");
    }
}

#[test]
fn test_plain_matrices_pass_unsorted_harness() {
    let (dense, _) = dense_pair(40, 60, &SimulateVectorOptions::default());
    let (compressed, _) = sparse_pair(40, 60, false, &SimulateCompressedSparseOptions::default());

    run_combinations(&standard_combinations(), |options| {
        test_unsorted_full_access(&dense, options)?;
        test_unsorted_indexed_access(&dense, 0.5, 0.5, options)?;
        test_unsorted_full_access(&compressed, options)?;
        test_unsorted_block_access(&compressed, 0.25, 0.5, options)
    })
    .unwrap();
}

#[test]
fn test_forced_oracle_dense() {
    let (matrix, reference) = dense_pair(100, 200, &SimulateVectorOptions::default());
    let wrapped = ForcedOracleWrapper::new(Arc::new(matrix));
    assert!(wrapped.uses_oracle(true));
    assert!(wrapped.uses_oracle(false));
    assert!(!wrapped.inner().uses_oracle(true));

    let cases = standard_combinations();
    run_combinations(&cases, |options| {
        test_full_access(&wrapped, &reference, options)?;
        test_block_access(&wrapped, &reference, 0.27, 0.6, options)?;
        test_indexed_access(&wrapped, &reference, 0.3, 0.2, options)
    })
    .unwrap();
}

#[test]
fn test_wrappers_share_dynamic_matrices() {
    let (matrix, reference) = sparse_pair(30, 40, true, &SimulateCompressedSparseOptions::default());
    let inner: Arc<dyn Matrix<Element = f64>> = Arc::new(matrix);
    let forced = ForcedOracleWrapper::new(Arc::clone(&inner));
    let reversed = ReversedIndicesWrapper::new(inner);

    assert_eq!(forced.dimensions(), (30, 40));
    assert!(reversed.is_sparse());
    run_combinations(&standard_combinations(), |options| {
        test_full_access(&forced, &reference, options)?;
        test_unsorted_full_access(&reversed, options)
    })
    .unwrap();
}
