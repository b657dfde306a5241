//! Seeded random fixtures
//!
//! Every generator builds its own [`StdRng`] from the seed it is given, so
//! identical arguments always give identical output. Option values are not
//! checked; nonsensical bounds or densities simply produce nonsensical data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tessera_core::MatrixElement;

/// Default seed shared by both simulators
pub const DEFAULT_SEED: u64 = 1234567890;

/// Configuration for [`simulate_vector`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulateVectorOptions {
    pub lower: f64,
    pub upper: f64,
    /// Probability that an element is non-zero
    pub density: f64,
    pub seed: u64,
}

impl Default for SimulateVectorOptions {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 100.0,
            density: 1.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulateVectorOptions {
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Configuration for [`simulate_compressed_sparse`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulateCompressedSparseOptions {
    pub lower: f64,
    pub upper: f64,
    pub density: f64,
    pub seed: u64,
}

impl Default for SimulateCompressedSparseOptions {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 100.0,
            density: 0.1,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulateCompressedSparseOptions {
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Compressed triple produced by [`simulate_compressed_sparse`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCompressedSparse<T> {
    pub data: Vec<T>,
    pub index: Vec<usize>,
    /// `primary + 1` offsets into `data` and `index`
    pub pointers: Vec<usize>,
}

fn uniform<T: MatrixElement>(rng: &mut StdRng, lower: f64, upper: f64) -> T {
    T::from_f64(lower + (upper - lower) * rng.gen::<f64>())
}

/// Random vector of `length` elements
///
/// With `density == 1` every element is drawn from `[lower, upper)`. Otherwise
/// each element first draws against `density` and keeps the zero value unless
/// the draw falls below it.
pub fn simulate_vector<T: MatrixElement>(length: usize, options: &SimulateVectorOptions) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut output = vec![T::zero(); length];

    if options.density == 1.0 {
        for x in output.iter_mut() {
            *x = uniform(&mut rng, options.lower, options.upper);
        }
    } else {
        for x in output.iter_mut() {
            if rng.gen::<f64>() < options.density {
                *x = uniform(&mut rng, options.lower, options.upper);
            }
        }
    }

    output
}

/// Random compressed sparse triple with `primary` slices over `secondary` positions
///
/// Each (primary, secondary) pair is kept independently with probability
/// `density`. Indices are generated in increasing order within each slice.
pub fn simulate_compressed_sparse<T: MatrixElement>(
    primary: usize,
    secondary: usize,
    options: &SimulateCompressedSparseOptions,
) -> SimulatedCompressedSparse<T> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut output = SimulatedCompressedSparse {
        data: Vec::new(),
        index: Vec::new(),
        pointers: Vec::with_capacity(primary + 1),
    };
    output.pointers.push(0);

    for _ in 0..primary {
        for s in 0..secondary {
            if rng.gen::<f64>() < options.density {
                output.data.push(uniform(&mut rng, options.lower, options.upper));
                output.index.push(s);
            }
        }
        output.pointers.push(output.data.len());
    }

    output
}

/// Random strictly increasing subset of `[0, extent)`
///
/// The subset starts at `floor(extent * relative_start)` and includes each
/// later position with probability `probability`. It is empty when the start
/// falls at or beyond `extent`.
pub fn create_indexed_subset(extent: usize, relative_start: f64, probability: f64, seed: u64) -> Vec<usize> {
    let start = (extent as f64 * relative_start) as usize;
    let mut output = Vec::new();
    if start >= extent {
        return output;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    output.push(start);
    for i in start + 1..extent {
        if rng.gen::<f64>() < probability {
            output.push(i);
        }
    }
    output
}
