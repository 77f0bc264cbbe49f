//! Update Validator
//!
//! Permanence decisions are append-only. Given two flattened sets (compiled
//! with a catch-all so every point is classified), every point the old set
//! addressed must still be addressed, and every permitted or forbidden time
//! it fixed must still be fixed the same way.

use super::overlap::diff_all;
use crate::domain::{PermissionError, UniversalPermissionDetails};
use shared_types::remove_ranges;
use tracing::{debug, warn};

/// Default cap on rectangle pairs compared by one validation.
pub const DEFAULT_MAX_COMPARISONS: usize = 25_000_000;

/// Validate an `old -> new` revision of flattened permissions.
///
/// Comparing the two sets is `old.len() * new.len()` pair checks; revisions
/// above `max_comparisons` are rejected before any work is done.
pub fn validate_universal_permission_update(
    old: &[UniversalPermissionDetails],
    new: &[UniversalPermissionDetails],
    max_comparisons: usize,
) -> Result<(), PermissionError> {
    let comparisons = old.len().saturating_mul(new.len());
    if comparisons > max_comparisons {
        warn!(comparisons, max = max_comparisons, "Permission comparison over budget");
        return Err(PermissionError::TooManyComparisons {
            count: comparisons,
            max: max_comparisons,
        });
    }

    let diff = diff_all(old, new);

    if let Some(detail) = diff.in_first_only.into_iter().next() {
        warn!(%detail, "Permission removed without replacement");
        return Err(PermissionError::RemovedWithoutReplacement {
            detail: Box::new(detail),
        });
    }

    for overlap in &diff.overlaps {
        let (unset_permitted, _) = remove_ranges(
            &overlap.second.permanently_permitted_times,
            &overlap.first.permanently_permitted_times,
        );
        let (unset_forbidden, _) = remove_ranges(
            &overlap.second.permanently_forbidden_times,
            &overlap.first.permanently_forbidden_times,
        );

        if !unset_permitted.is_empty() || !unset_forbidden.is_empty() {
            warn!(
                detail = %overlap.overlap,
                unset_permitted = unset_permitted.len(),
                unset_forbidden = unset_forbidden.len(),
                "Permanent permission decision reversed"
            );
            return Err(PermissionError::DecisionReversed {
                detail: Box::new(overlap.overlap.clone()),
                unset_permitted,
                unset_forbidden,
            });
        }
    }

    debug!(
        old = old.len(),
        new = new.len(),
        overlaps = diff.overlaps.len(),
        "Permission update validated"
    );
    Ok(())
}
