//! # Error Types
//!
//! Errors raised by the shared value algebras.

use thiserror::Error;

/// Errors from constructing or validating uint ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Start is greater than end.
    #[error("Invalid range: start {start} > end {end}")]
    StartAfterEnd { start: u64, end: u64 },

    /// Zero is outside the domain (ids and times start at 1).
    #[error("Invalid range: {start}-{end} includes zero")]
    ZeroBound { start: u64, end: u64 },

    /// An empty range list where at least one range is required.
    #[error("Range list is empty")]
    Empty,

    /// Two ranges in a list that must be disjoint overlap.
    #[error("Ranges overlap: {first} and {second}")]
    Overlapping { first: String, second: String },
}

/// Errors from converting big-number values into the 64-bit domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Value does not fit in the 64-bit domain.
    #[error("Value {0} exceeds the 64-bit domain")]
    Overflow(String),

    /// Value is not a valid unsigned decimal string.
    #[error("Cannot parse {0:?} as an unsigned integer")]
    Parse(String),
}
