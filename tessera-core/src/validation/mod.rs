//! Construction-time validation
//!
//! Pure functions checking extraction scopes and compressed layouts before an
//! extractor or matrix is built. No I/O dependencies.

pub mod bounds;
pub mod format;

pub use bounds::{validate_block, validate_index, validate_strictly_increasing, validate_subset};
pub use format::{validate_compressed, validate_pointers};
