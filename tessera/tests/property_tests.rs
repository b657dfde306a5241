//! Property tests for simulators, scopes and access sequences

use proptest::prelude::*;
use tessera::harness::{access_sequence, AccessOptions, AccessOrder};
use tessera::simulate::{
    create_indexed_subset, simulate_compressed_sparse, simulate_vector, SimulateCompressedSparseOptions,
    SimulateVectorOptions, SimulatedCompressedSparse,
};
use tessera::{CompressedSparseMatrix, DenseMatrix, Matrix, Options, Scope, TesseraError};

fn order_strategy() -> impl Strategy<Value = AccessOrder> {
    prop_oneof![
        Just(AccessOrder::Forward),
        Just(AccessOrder::Reverse),
        Just(AccessOrder::Random),
    ]
}

proptest! {
    #[test]
    fn prop_vector_deterministic(length in 0usize..300, density in 0.0f64..=1.0, seed in any::<u64>()) {
        let options = SimulateVectorOptions::default().with_density(density).with_seed(seed);
        let first: Vec<f64> = simulate_vector(length, &options);
        let second: Vec<f64> = simulate_vector(length, &options);
        prop_assert_eq!(first.len(), length);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_vector_seed_sensitive(seed in any::<u64>()) {
        let options = SimulateVectorOptions::default().with_seed(seed);
        let first: Vec<f64> = simulate_vector(64, &options);
        let second: Vec<f64> = simulate_vector(64, &options.with_seed(seed.wrapping_add(1)));
        prop_assert_ne!(first, second);
    }

    #[test]
    fn prop_compressed_well_formed(
        primary in 0usize..40,
        secondary in 0usize..40,
        density in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let options = SimulateCompressedSparseOptions::default().with_density(density).with_seed(seed);
        let triple: SimulatedCompressedSparse<f64> = simulate_compressed_sparse(primary, secondary, &options);

        prop_assert_eq!(triple.pointers.len(), primary + 1);
        prop_assert_eq!(triple.pointers[0], 0);
        prop_assert_eq!(triple.pointers[primary], triple.data.len());
        prop_assert_eq!(triple.index.len(), triple.data.len());
        for pair in triple.pointers.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
            let slice = &triple.index[pair[0]..pair[1]];
            prop_assert!(slice.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(slice.iter().all(|&x| x < secondary));
        }
        prop_assert!(
            CompressedSparseMatrix::new(primary, secondary, triple.data, triple.index, triple.pointers, true).is_ok()
        );
    }

    #[test]
    fn prop_indexed_subset_increasing(
        extent in 0usize..200,
        start in 0.0f64..1.0,
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let subset = create_indexed_subset(extent, start, probability, seed);
        prop_assert!(subset.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(subset.iter().all(|&x| x < extent));
        if let Some(&first) = subset.first() {
            prop_assert_eq!(first, (extent as f64 * start) as usize);
        }
        prop_assert!(Scope::indexed(subset).validate(extent).is_ok());
    }

    #[test]
    fn prop_access_sequence(
        nrow in 0usize..60,
        ncol in 0usize..60,
        use_row in any::<bool>(),
        order in order_strategy(),
        jump in 1usize..8,
    ) {
        let options = AccessOptions::default().with_row(use_row).with_order(order).with_jump(jump);
        let limit = if use_row { nrow } else { ncol };
        let sequence = access_sequence(nrow, ncol, &options);
        prop_assert_eq!(&sequence, &access_sequence(nrow, ncol, &options));

        match order {
            AccessOrder::Forward => {
                let expected: Vec<usize> = (0..limit).filter(|i| i % jump == 0).collect();
                prop_assert_eq!(sequence, expected);
            }
            AccessOrder::Reverse => {
                let expected: Vec<usize> = (0..limit).rev().filter(|i| (limit - 1 - i) % jump == 0).collect();
                prop_assert_eq!(sequence, expected);
            }
            AccessOrder::Random => {
                let mut sorted = sequence.clone();
                sorted.sort_unstable();
                let expected: Vec<usize> = (0..limit).step_by(jump).collect();
                prop_assert_eq!(sorted, expected);
            }
        }
    }

    #[test]
    fn prop_block_scope_validation(full in 0usize..50, start in 0usize..60, length in 0usize..60) {
        let result = Scope::block(start, length).validate(full);
        if start + length <= full {
            prop_assert!(result.is_ok());
        } else {
            let is_block_error = matches!(result, Err(TesseraError::BlockOutOfRange { .. }));
            prop_assert!(is_block_error);
        }
    }

    #[test]
    fn prop_dense_sparse_equivalent(
        nrow in 1usize..12,
        ncol in 1usize..12,
        row in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let options = SimulateVectorOptions::default().with_density(0.5).with_seed(seed);
        let values: Vec<f64> = simulate_vector(nrow * ncol, &options);
        let matrix = DenseMatrix::new(nrow, ncol, values, true).unwrap();
        let extent = matrix.secondary_extent(row);

        let mut dense = matrix.dense(row, Scope::Full, &Options::default()).unwrap();
        let mut sparse = matrix.sparse(row, Scope::Full, &Options::default()).unwrap();
        for i in 0..matrix.target_extent(row) {
            let mut buffer = vec![0.0; extent];
            let expected = dense.fetch(i, &mut buffer).to_vec();
            let (mut vbuffer, mut ibuffer) = (vec![0.0; extent], vec![0; extent]);
            let range = sparse.fetch(i, &mut vbuffer, &mut ibuffer);
            let mut expanded = vec![0.0; extent];
            for (&v, &x) in range.value.unwrap().iter().zip(range.index.unwrap()) {
                expanded[x] = v;
            }
            prop_assert_eq!(expanded, expected);
        }
    }
}
