//! Error types for the permission engine
//!
//! Update failures (`RemovedWithoutReplacement`, `DecisionReversed`) and the
//! temporal `Forbidden` failure are fatal to the triggering action. The rest
//! reject malformed or oversized input before any decision is made.

use super::universal::UniversalPermissionDetails;
use shared_types::{format_ranges, RangeError, Timestamp, UintRange};
use thiserror::Error;

/// All errors that can occur while validating or checking permissions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// A point addressed by the old flattened set has no rectangle in the new one
    #[error("Permission {detail} found in old permissions but not in new permissions")]
    RemovedWithoutReplacement {
        detail: Box<UniversalPermissionDetails>,
    },

    /// A permanence decision was unset or flipped
    #[error(
        "Permission {detail} changed a fixed decision: permanently permitted times {} unset, permanently forbidden times {} unset",
        format_ranges(.unset_permitted),
        format_ranges(.unset_forbidden)
    )]
    DecisionReversed {
        detail: Box<UniversalPermissionDetails>,
        unset_permitted: Vec<UintRange>,
        unset_forbidden: Vec<UintRange>,
    },

    /// The checked time falls inside a permanently forbidden window
    #[error(
        "Forbidden: time {time} is inside permanently forbidden times {window} for {detail}{}",
        point_suffix(.point)
    )]
    Forbidden {
        time: Timestamp,
        window: UintRange,
        detail: Box<UniversalPermissionDetails>,
        /// Index of the failing point when a batch was checked.
        point: Option<usize>,
    },

    /// Expansion exceeded the configured rectangle budget
    #[error("Too many permission rectangles: {count} > {max}")]
    TooManyRectangles { count: usize, max: usize },

    /// Comparing two flattened sets exceeded the pairwise budget
    #[error("Too many permission comparisons: {count} > {max}")]
    TooManyComparisons { count: usize, max: usize },

    /// Permanently permitted and forbidden times overlap on one rule
    #[error("Permanently permitted and forbidden times overlap: {}", format_ranges(.overlap))]
    PermanenceConflict { overlap: Vec<UintRange> },

    /// Malformed range on a rule
    #[error("Invalid permission range: {0}")]
    Range(#[from] RangeError),

    /// Failure inside a named permission field
    #[error("{field}[{index}]: {source}")]
    InRule {
        field: &'static str,
        index: usize,
        #[source]
        source: Box<PermissionError>,
    },
}

impl PermissionError {
    /// Strip rule context to reach the underlying failure.
    pub fn root(&self) -> &PermissionError {
        match self {
            Self::InRule { source, .. } => source.root(),
            other => other,
        }
    }
}

fn point_suffix(point: &Option<usize>) -> String {
    point.map(|index| format!(" (point {})", index)).unwrap_or_default()
}
