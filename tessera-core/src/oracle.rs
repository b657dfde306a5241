//! Predictions of future row/column accesses
//!
//! An oracle is agreed on before the first fetch. Oracular extractors pull
//! their next index from it, which lets a backend look ahead and batch work.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Finite, ordered sequence of predicted accesses
pub trait Oracle: Send + Sync {
    /// Total number of predictions
    fn total(&self) -> usize;

    /// The `n`-th prediction, for `n < total()`
    fn get(&self, n: usize) -> usize;
}

/// Predicts `start, start + 1, ..., start + length - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsecutiveOracle {
    start: usize,
    length: usize,
}

impl ConsecutiveOracle {
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }
}

impl Oracle for ConsecutiveOracle {
    fn total(&self) -> usize {
        self.length
    }

    fn get(&self, n: usize) -> usize {
        self.start + n
    }
}

/// Predicts an explicit sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOracle {
    sequence: Arc<[usize]>,
}

impl FixedOracle {
    pub fn new(sequence: impl Into<Arc<[usize]>>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }
}

impl From<Vec<usize>> for FixedOracle {
    fn from(sequence: Vec<usize>) -> Self {
        Self::new(sequence)
    }
}

impl Oracle for FixedOracle {
    fn total(&self) -> usize {
        self.sequence.len()
    }

    fn get(&self, n: usize) -> usize {
        self.sequence[n]
    }
}

/// Monotonic consumer of an oracle
///
/// Each extractor owns its own cursor, so several extractors can share one
/// oracle. A cursor cannot be rewound.
#[derive(Clone)]
pub struct OracleCursor {
    oracle: Arc<dyn Oracle>,
    used: usize,
}

impl OracleCursor {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle, used: 0 }
    }

    /// Take the next prediction
    ///
    /// # Panics
    ///
    /// Panics when every prediction has already been taken. Fetching more
    /// often than the oracle predicts is a caller error.
    pub fn next_index(&mut self) -> usize {
        let total = self.oracle.total();
        assert!(
            self.used < total,
            "oracle exhausted: all {total} predictions have been consumed"
        );
        let index = self.oracle.get(self.used);
        self.used += 1;
        index
    }

    /// Number of predictions still to come
    pub fn remaining(&self) -> usize {
        self.oracle.total() - self.used
    }
}

impl fmt::Debug for OracleCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleCursor")
            .field("total", &self.oracle.total())
            .field("used", &self.used)
            .finish()
    }
}
