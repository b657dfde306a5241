//! Output toggles for extractors

/// Options fixed at extractor construction
///
/// The three toggles are independent and every combination must be honored
/// by a backend. Dense extractors ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Whether sparse extraction reports values
    pub sparse_extract_value: bool,
    /// Whether sparse extraction reports indices
    pub sparse_extract_index: bool,
    /// Whether reported sparse indices must be strictly increasing
    pub sparse_ordered_index: bool,
}

impl Options {
    /// Options with every channel enabled and ordered indices
    pub const fn new() -> Self {
        Self {
            sparse_extract_value: true,
            sparse_extract_index: true,
            sparse_ordered_index: true,
        }
    }

    /// Set whether values are reported
    pub const fn with_extract_value(mut self, extract: bool) -> Self {
        self.sparse_extract_value = extract;
        self
    }

    /// Set whether indices are reported
    pub const fn with_extract_index(mut self, extract: bool) -> Self {
        self.sparse_extract_index = extract;
        self
    }

    /// Set whether indices must come back sorted
    pub const fn with_ordered_index(mut self, ordered: bool) -> Self {
        self.sparse_ordered_index = ordered;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
