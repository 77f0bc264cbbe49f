//! Overlap Engine
//!
//! Intersection and remainder of permission rectangles across all eight
//! axes at once.
//!
//! Leftovers are emitted axis by axis in a fixed order (timeline time, badge
//! id, transfer time, ownership time, to, from, initiated by, approval id).
//! The leftover for axis `k` keeps axis `k`'s remainder, pins every earlier
//! axis to its overlap value and leaves every later axis at the candidate's
//! value. This is not a minimal box partition; other components compare
//! against exactly this decomposition, so it must stay as is.

use crate::domain::UniversalPermissionDetails;
use shared_types::AddressList;

/// One overlap found by [`diff_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
    /// The shared rectangle.
    pub overlap: UniversalPermissionDetails,
    /// The rectangle from the first list it came from.
    pub first: UniversalPermissionDetails,
    /// The rectangle from the second list it came from.
    pub second: UniversalPermissionDetails,
}

/// Result of an all-pairs comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapDiff {
    pub overlaps: Vec<Overlap>,
    pub in_first_only: Vec<UniversalPermissionDetails>,
    pub in_second_only: Vec<UniversalPermissionDetails>,
}

/// Whether two rectangles share at least one point on all eight axes.
///
/// Allocation free, so callers can reject disjoint pairs before paying for
/// [`remove_overlap`].
pub(crate) fn rectangles_overlap(
    a: &UniversalPermissionDetails,
    b: &UniversalPermissionDetails,
) -> bool {
    a.timeline_time.overlaps(&b.timeline_time)
        && a.badge_id.overlaps(&b.badge_id)
        && a.transfer_time.overlaps(&b.transfer_time)
        && a.ownership_time.overlaps(&b.ownership_time)
        && a.to_list.overlaps(&b.to_list)
        && a.from_list.overlaps(&b.from_list)
        && a.initiated_by_list.overlaps(&b.initiated_by_list)
        && a.approval_id_list.overlaps(&b.approval_id_list)
}

/// Remove `handled` from `candidate`.
///
/// Returns `(remaining, removed)`. If any axis is disjoint the candidate is
/// returned unchanged and nothing is removed. Otherwise `removed` holds the
/// single full intersection. Every output rectangle keeps the candidate's
/// permanence decisions and payload.
pub fn remove_overlap(
    handled: &UniversalPermissionDetails,
    candidate: &UniversalPermissionDetails,
) -> (Vec<UniversalPermissionDetails>, Vec<UniversalPermissionDetails>) {
    if !rectangles_overlap(handled, candidate) {
        return (vec![candidate.clone()], Vec::new());
    }

    let (timeline_left, timeline_overlap) =
        candidate.timeline_time.get_overlap_details(&handled.timeline_time);
    let (badge_left, badge_overlap) = candidate.badge_id.get_overlap_details(&handled.badge_id);
    let (transfer_left, transfer_overlap) =
        candidate.transfer_time.get_overlap_details(&handled.transfer_time);
    let (ownership_left, ownership_overlap) =
        candidate.ownership_time.get_overlap_details(&handled.ownership_time);

    let (
        Some(timeline_overlap),
        Some(badge_overlap),
        Some(transfer_overlap),
        Some(ownership_overlap),
    ) = (timeline_overlap, badge_overlap, transfer_overlap, ownership_overlap)
    else {
        return (vec![candidate.clone()], Vec::new());
    };

    let (to_left, to_overlap) = candidate.to_list.get_overlap_details(&handled.to_list);
    let (from_left, from_overlap) = candidate.from_list.get_overlap_details(&handled.from_list);
    let (initiated_left, initiated_overlap) = candidate
        .initiated_by_list
        .get_overlap_details(&handled.initiated_by_list);
    let (approval_left, approval_overlap) = candidate
        .approval_id_list
        .get_overlap_details(&handled.approval_id_list);

    let mut remaining = Vec::new();

    for timeline_time in timeline_left {
        remaining.push(UniversalPermissionDetails {
            timeline_time,
            ..candidate.clone()
        });
    }

    for badge_id in badge_left {
        remaining.push(UniversalPermissionDetails {
            timeline_time: timeline_overlap,
            badge_id,
            ..candidate.clone()
        });
    }

    for transfer_time in transfer_left {
        remaining.push(UniversalPermissionDetails {
            timeline_time: timeline_overlap,
            badge_id: badge_overlap,
            transfer_time,
            ..candidate.clone()
        });
    }

    for ownership_time in ownership_left {
        remaining.push(UniversalPermissionDetails {
            timeline_time: timeline_overlap,
            badge_id: badge_overlap,
            transfer_time: transfer_overlap,
            ownership_time,
            ..candidate.clone()
        });
    }

    let pinned_ranges = |to_list: AddressList,
                         from_list: AddressList,
                         initiated_by_list: AddressList,
                         approval_id_list: AddressList| {
        UniversalPermissionDetails {
            timeline_time: timeline_overlap,
            badge_id: badge_overlap,
            transfer_time: transfer_overlap,
            ownership_time: ownership_overlap,
            to_list,
            from_list,
            initiated_by_list,
            approval_id_list,
            ..candidate.clone()
        }
    };

    if !to_left.is_empty() {
        remaining.push(pinned_ranges(
            to_left,
            candidate.from_list.clone(),
            candidate.initiated_by_list.clone(),
            candidate.approval_id_list.clone(),
        ));
    }

    if !from_left.is_empty() {
        remaining.push(pinned_ranges(
            to_overlap.clone(),
            from_left,
            candidate.initiated_by_list.clone(),
            candidate.approval_id_list.clone(),
        ));
    }

    if !initiated_left.is_empty() {
        remaining.push(pinned_ranges(
            to_overlap.clone(),
            from_overlap.clone(),
            initiated_left,
            candidate.approval_id_list.clone(),
        ));
    }

    if !approval_left.is_empty() {
        remaining.push(pinned_ranges(
            to_overlap.clone(),
            from_overlap.clone(),
            initiated_overlap.clone(),
            approval_left,
        ));
    }

    let removed = vec![pinned_ranges(
        to_overlap,
        from_overlap,
        initiated_overlap,
        approval_overlap,
    )];

    (remaining, removed)
}

/// Remove `handled` from each candidate in turn.
pub fn remove_overlap_from_values(
    handled: &UniversalPermissionDetails,
    candidates: Vec<UniversalPermissionDetails>,
) -> (Vec<UniversalPermissionDetails>, Vec<UniversalPermissionDetails>) {
    let mut remaining = Vec::with_capacity(candidates.len());
    let mut removed = Vec::new();
    for candidate in candidates {
        if !rectangles_overlap(handled, &candidate) {
            remaining.push(candidate);
            continue;
        }
        let (left, overlap) = remove_overlap(handled, &candidate);
        remaining.extend(left);
        removed.extend(overlap);
    }
    (remaining, removed)
}

/// Compare every rectangle of `first` with every rectangle of `second`.
///
/// Both lists must be flattened (pairwise disjoint), as produced by the
/// first-match compiler. Each overlap carries the rectangles it came from, so
/// callers can compare their decisions. The remainders are what is left of
/// each list once every overlap has been subtracted; since the lists are
/// disjoint, an overlap only cuts into its own two source rectangles.
pub fn diff_all(
    first: &[UniversalPermissionDetails],
    second: &[UniversalPermissionDetails],
) -> OverlapDiff {
    let mut overlaps = Vec::new();
    let mut first_hits: Vec<Vec<usize>> = vec![Vec::new(); first.len()];
    let mut second_hits: Vec<Vec<usize>> = vec![Vec::new(); second.len()];

    for (i, first_detail) in first.iter().enumerate() {
        for (j, second_detail) in second.iter().enumerate() {
            if !rectangles_overlap(first_detail, second_detail) {
                continue;
            }
            let (_, removed) = remove_overlap(second_detail, first_detail);
            for overlap in removed {
                first_hits[i].push(overlaps.len());
                second_hits[j].push(overlaps.len());
                overlaps.push(Overlap {
                    overlap,
                    first: first_detail.clone(),
                    second: second_detail.clone(),
                });
            }
        }
    }

    let remainder = |source: &[UniversalPermissionDetails], hits: &[Vec<usize>]| {
        let mut left = Vec::new();
        for (detail, hit) in source.iter().zip(hits) {
            let mut pieces = vec![detail.clone()];
            for &index in hit {
                pieces = remove_overlap_from_values(&overlaps[index].overlap, pieces).0;
            }
            left.extend(pieces);
        }
        left
    };
    let in_first_only = remainder(first, &first_hits);
    let in_second_only = remainder(second, &second_hits);

    OverlapDiff {
        overlaps,
        in_first_only,
        in_second_only,
    }
}
