//! Domain invariants for the permission engine

use super::universal::UniversalPermissionDetails;
use crate::algorithms::overlap::rectangles_overlap;
use shared_types::{remove_ranges, UintRange};

/// INVARIANT-1: Canonical range lists
/// Strictly ordered, no two ranges overlapping or touching.
pub fn invariant_sorted_and_merged(ranges: &[UintRange]) -> bool {
    ranges.iter().all(|range| range.start <= range.end)
        && ranges
            .windows(2)
            .all(|pair| pair[0].end.checked_add(1).is_some_and(|next| next < pair[1].start))
}

/// INVARIANT-2: Permanence Exclusivity
/// Permitted and forbidden times on one rectangle never overlap.
pub fn invariant_permanence_disjoint(permitted: &[UintRange], forbidden: &[UintRange]) -> bool {
    let (_, overlap) = remove_ranges(forbidden, permitted);
    overlap.is_empty()
}

/// INVARIANT-3: Flattened Partition
/// No two rectangles of a first-match compilation overlap.
pub fn invariant_pairwise_disjoint(details: &[UniversalPermissionDetails]) -> bool {
    for (i, first) in details.iter().enumerate() {
        for second in &details[i + 1..] {
            if rectangles_overlap(first, second) {
                return false;
            }
        }
    }
    true
}
