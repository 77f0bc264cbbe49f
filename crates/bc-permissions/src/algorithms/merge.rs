//! Merge / Compaction Pass
//!
//! Coalesces a flattened partition back toward a compact rule list. Two
//! rules merge when they differ on exactly one axis and agree on everything
//! else (remaining axes, permanence decisions, payload). Range axes merge by
//! union; with [`MergeMode::RangesAndAddressLists`] an address axis of equal
//! polarity may merge too.
//!
//! Greedy fixed point: scan all pairs, merge the first mergeable pair,
//! restart. Worst case O(n³) pair checks; flattened sets are small.

use crate::domain::{invariant_sorted_and_merged, UniversalPermission, UniversalPermissionDetails};
use shared_types::{sort_and_merge, AddressList, UintRange};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Only range axes may differ.
    #[default]
    RangesOnly,
    /// One address axis of matching polarity may differ instead.
    RangesAndAddressLists,
}

/// Merge flattened rectangles into rules.
pub fn merge_details(
    details: &[UniversalPermissionDetails],
    mode: MergeMode,
) -> Vec<UniversalPermission> {
    let mut merged: Vec<UniversalPermission> = details
        .iter()
        .map(UniversalPermission::from_details)
        .collect();

    let mut passes = 0usize;
    loop {
        passes += 1;
        let Some((i, j, combined)) = find_mergeable_pair(&merged, mode) else {
            break;
        };
        merged[i] = combined;
        merged.remove(j);
    }

    debug!(
        input = details.len(),
        output = merged.len(),
        passes,
        "Merged permission rectangles"
    );
    merged
}

fn find_mergeable_pair(
    rules: &[UniversalPermission],
    mode: MergeMode,
) -> Option<(usize, usize, UniversalPermission)> {
    for i in 0..rules.len() {
        for j in (i + 1)..rules.len() {
            if let Some(combined) = try_merge(&rules[i], &rules[j], mode) {
                return Some((i, j, combined));
            }
        }
    }
    None
}

/// Range axes of a rule, in overlap-engine order, each with its uses flag.
fn range_axes(rule: &UniversalPermission) -> [(bool, Vec<UintRange>); 4] {
    [
        (rule.uses.timeline_times, sort_and_merge(&rule.timeline_times)),
        (rule.uses.badge_ids, sort_and_merge(&rule.badge_ids)),
        (rule.uses.transfer_times, sort_and_merge(&rule.transfer_times)),
        (rule.uses.ownership_times, sort_and_merge(&rule.ownership_times)),
    ]
}

fn list_axes(rule: &UniversalPermission) -> [&AddressList; 4] {
    [
        &rule.to_list,
        &rule.from_list,
        &rule.initiated_by_list,
        &rule.approval_id_list,
    ]
}

fn same_decisions(first: &UniversalPermission, second: &UniversalPermission) -> bool {
    sort_and_merge(&first.permanently_permitted_times)
        == sort_and_merge(&second.permanently_permitted_times)
        && sort_and_merge(&first.permanently_forbidden_times)
            == sort_and_merge(&second.permanently_forbidden_times)
        && first.payload == second.payload
}

fn try_merge(
    first: &UniversalPermission,
    second: &UniversalPermission,
    mode: MergeMode,
) -> Option<UniversalPermission> {
    if !same_decisions(first, second) {
        return None;
    }

    let first_ranges = range_axes(first);
    let second_ranges = range_axes(second);
    let differing_ranges: Vec<usize> = (0..4)
        .filter(|&axis| first_ranges[axis] != second_ranges[axis])
        .collect();

    let first_lists = list_axes(first);
    let second_lists = list_axes(second);
    let differing_lists: Vec<usize> = (0..4)
        .filter(|&axis| first_lists[axis] != second_lists[axis])
        .collect();

    match (differing_ranges.as_slice(), differing_lists.as_slice()) {
        ([], []) => Some(first.clone()),
        ([axis], []) => {
            let (first_used, first_values) = &first_ranges[*axis];
            let (second_used, second_values) = &second_ranges[*axis];
            if !first_used || !second_used {
                return None;
            }
            let mut union = first_values.clone();
            union.extend(second_values.iter().copied());
            let union = sort_and_merge(&union);
            debug_assert!(invariant_sorted_and_merged(&union));

            let mut combined = first.clone();
            match axis {
                0 => combined.timeline_times = union,
                1 => combined.badge_ids = union,
                2 => combined.transfer_times = union,
                _ => combined.ownership_times = union,
            }
            Some(combined)
        }
        ([], [axis]) if mode == MergeMode::RangesAndAddressLists => {
            let union = first_lists[*axis].union(second_lists[*axis])?;
            let mut combined = first.clone();
            match axis {
                0 => combined.to_list = union,
                1 => combined.from_list = union,
                2 => combined.initiated_by_list = union,
                _ => combined.approval_id_list = union,
            }
            Some(combined)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::first_match::{compile_first_match, CompileOptions};
    use crate::domain::{AxisRange, PermissionPayload, UsedAxes};

    fn r(start: u64, end: u64) -> UintRange {
        UintRange { start, end }
    }

    fn balances(badges: UintRange, owned: UintRange) -> UniversalPermissionDetails {
        let mut details = UniversalPermissionDetails::unbounded(UsedAxes::BALANCES_ACTION);
        details.badge_id = AxisRange::Bounded(badges);
        details.ownership_time = AxisRange::Bounded(owned);
        details
    }

    #[test]
    fn test_merge_along_one_range_axis() {
        let merged = merge_details(
            &[
                balances(r(1, 10), r(1, 100)),
                balances(r(11, 20), r(1, 100)),
                balances(r(30, 40), r(1, 100)),
            ],
            MergeMode::RangesOnly,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].badge_ids, vec![r(1, 20), r(30, 40)]);
        assert_eq!(merged[0].ownership_times, vec![r(1, 100)]);
        assert!(!merged[0].uses.timeline_times);
    }

    #[test]
    fn test_no_merge_when_two_axes_differ() {
        let merged = merge_details(
            &[balances(r(1, 10), r(1, 100)), balances(r(11, 20), r(1, 50))],
            MergeMode::RangesOnly,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_no_merge_when_decisions_differ() {
        let mut forbidden = balances(r(11, 20), r(1, 100));
        forbidden.permanently_forbidden_times = vec![r(1, 5)];
        let merged = merge_details(
            &[balances(r(1, 10), r(1, 100)), forbidden],
            MergeMode::RangesOnly,
        );
        assert_eq!(merged.len(), 2);

        let mut with_payload = balances(r(11, 20), r(1, 100));
        with_payload.payload = PermissionPayload::Archived(true);
        let merged = merge_details(
            &[balances(r(1, 10), r(1, 100)), with_payload],
            MergeMode::RangesOnly,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_address_list_merge_mode() {
        let mut alice = UniversalPermissionDetails::unbounded(UsedAxes::COLLECTION_APPROVAL);
        alice.to_list = AddressList::whitelist(["bb1alice"]);
        let mut bob = alice.clone();
        bob.to_list = AddressList::whitelist(["bb1bob"]);

        let merged = merge_details(&[alice.clone(), bob.clone()], MergeMode::RangesOnly);
        assert_eq!(merged.len(), 2);

        let merged = merge_details(&[alice, bob], MergeMode::RangesAndAddressLists);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].to_list,
            AddressList::whitelist(["bb1alice", "bb1bob"])
        );
    }

    #[test]
    fn test_address_list_merge_requires_equal_polarity() {
        let mut alice = UniversalPermissionDetails::unbounded(UsedAxes::COLLECTION_APPROVAL);
        alice.to_list = AddressList::whitelist(["bb1alice"]);
        let mut others = alice.clone();
        others.to_list = AddressList::blacklist(["bb1alice"]);

        let merged = merge_details(&[alice, others], MergeMode::RangesAndAddressLists);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_recovers_compact_rules_after_catch_all() {
        let rule = UniversalPermission {
            badge_ids: vec![r(5, 5)],
            ownership_times: vec![UintRange::full()],
            permanently_permitted_times: vec![r(1, 10)],
            ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
        };
        let options = CompileOptions::with_catch_all(UsedAxes::BALANCES_ACTION, 100);
        let flat = compile_first_match(&[rule], &options).unwrap();
        assert_eq!(flat.len(), 3);

        let merged = merge_details(&flat, MergeMode::RangesOnly);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].badge_ids, vec![r(5, 5)]);
        assert_eq!(merged[1].badge_ids, vec![r(1, 4), r(6, u64::MAX)]);
    }
}
