//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be
//! extracted from a matrix.

use core::fmt::Debug;

use bytemuck::Zeroable;

/// Trait for types that can be stored as matrix elements
///
/// All matrix element types must be:
/// - Copy: extracted into caller buffers without allocation
/// - Zeroable: the all-zero bit pattern is the structural zero
/// - PartialEq + Debug: so that extracted values can be compared and reported
/// - Send + Sync: matrices are shared read-only across extractors
pub trait MatrixElement: Copy + PartialEq + Debug + Zeroable + Send + Sync + 'static {
    /// Convert from f64 for generic construction
    ///
    /// Used by the fixture simulators, which draw in f64 and narrow.
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;

    /// Whether this value is a NaN
    ///
    /// Integer types never are. Comparisons treat NaN as matching NaN.
    fn is_nan(self) -> bool {
        false
    }

    /// Structural zero
    fn zero() -> Self {
        Self::zeroed()
    }
}

impl MatrixElement for f32 {
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl MatrixElement for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

impl MatrixElement for i32 {
    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for i64 {
    fn from_f64(value: f64) -> Self {
        value as i64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u32 {
    fn from_f64(value: f64) -> Self {
        value as u32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl MatrixElement for u64 {
    fn from_f64(value: f64) -> Self {
        value as u64
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_detection() {
        assert!(MatrixElement::is_nan(f64::NAN));
        assert!(MatrixElement::is_nan(f32::NAN));
        assert!(!MatrixElement::is_nan(1.5f64));
        assert!(!MatrixElement::is_nan(7i32));
    }

    #[test]
    fn test_zero() {
        assert_eq!(<f64 as MatrixElement>::zero(), 0.0);
        assert_eq!(<u64 as MatrixElement>::zero(), 0);
        assert_eq!(<i32 as MatrixElement>::from_f64(3.9), 3);
    }
}
