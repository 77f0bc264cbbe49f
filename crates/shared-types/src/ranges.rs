//! # Uint Ranges
//!
//! Closed-interval arithmetic over the domain `1..=MAX_UINT`.
//!
//! A single [`UintRange`] is always well formed (`start <= end`). Lists of
//! ranges are kept canonical by [`sort_and_merge`]: strictly ordered, no two
//! elements overlapping or touching.
//!
//! The core primitive is [`UintRange::get_overlap_details`], which removes one
//! range from another and reports both the leftover and the clipped overlap.
//! [`diff_ranges`] lifts it to lists and adds the symmetric remainder.

use crate::errors::{NumericError, RangeError};
use crate::numeric::{parse_uint, u64_from_u256, MAX_UINT, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UintRange {
    pub start: u64,
    pub end: u64,
}

/// Three-way diff between two range lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeDiff {
    /// Points covered only by the first list.
    pub in_self_only: Vec<UintRange>,
    /// Points covered by both lists.
    pub overlap: Vec<UintRange>,
    /// Points covered only by the second list.
    pub in_other_only: Vec<UintRange>,
}

impl UintRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full domain `[1, MAX_UINT]`.
    pub const fn full() -> Self {
        Self {
            start: 1,
            end: MAX_UINT,
        }
    }

    /// Range holding exactly one value.
    pub const fn single(value: u64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// Build from wire `U256` bounds.
    pub fn from_u256(start: U256, end: U256) -> Result<Self, RangeBuildError> {
        let start = u64_from_u256(start)?;
        let end = u64_from_u256(end)?;
        Ok(Self::new(start, end)?)
    }

    /// Build from decimal string bounds.
    pub fn from_strings(start: &str, end: &str) -> Result<Self, RangeBuildError> {
        let start = parse_uint(start)?;
        let end = parse_uint(end)?;
        Ok(Self::new(start, end)?)
    }

    /// Number of values covered. Widened so `[0, MAX_UINT]` cannot overflow.
    pub fn size(&self) -> u128 {
        u128::from(self.end) - u128::from(self.start) + 1
    }

    /// True for `[1, MAX_UINT]`.
    pub fn is_full(&self) -> bool {
        self.start == 1 && self.end == MAX_UINT
    }

    /// Check the range lies inside the domain (no zero bound).
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.start > self.end {
            return Err(RangeError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        if self.start == 0 {
            return Err(RangeError::ZeroBound {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: u64) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn overlaps(&self, other: &UintRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Complement of this range within `bounds`.
    pub fn invert(&self, bounds: UintRange) -> Vec<UintRange> {
        let (remaining, _) = bounds.get_overlap_details(self);
        remaining
    }

    /// Remove `other` from `self`.
    ///
    /// Returns `(remaining_in_self, intersection)`. Disjoint inputs leave
    /// `self` untouched; full containment empties it; a partial overlap
    /// leaves up to two pieces (before and after `other`).
    pub fn get_overlap_details(&self, other: &UintRange) -> (Vec<UintRange>, Vec<UintRange>) {
        if !self.overlaps(other) {
            return (vec![*self], Vec::new());
        }

        if other.start <= self.start && other.end >= self.end {
            return (Vec::new(), vec![*self]);
        }

        let mut remaining = Vec::with_capacity(2);
        if other.start > self.start {
            remaining.push(UintRange {
                start: self.start,
                end: other.start - 1,
            });
        }
        if other.end < self.end {
            remaining.push(UintRange {
                start: other.end + 1,
                end: self.end,
            });
        }

        let intersection = UintRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        };

        (remaining, vec![intersection])
    }
}

impl Default for UintRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for UintRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end == MAX_UINT {
            write!(f, "{}-max", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Failure building a range from wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeBuildError {
    #[error(transparent)]
    Numeric(#[from] NumericError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Sort by start, then merge overlapping or touching neighbours.
pub fn sort_and_merge(ranges: &[UintRange]) -> Vec<UintRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| (range.start, range.end));

    let mut merged: Vec<UintRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Binary search a sorted, merged list for the range containing `id`.
///
/// Returns the index of the containing range.
pub fn search_ranges(ranges: &[UintRange], id: u64) -> Option<usize> {
    let mut low = 0usize;
    let mut high = ranges.len();
    while low < high {
        let mid = low + (high - low) / 2;
        let range = &ranges[mid];
        if range.contains(id) {
            return Some(mid);
        }
        if id < range.start {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    None
}

/// Complement of a range list within `bounds`.
pub fn invert_ranges(ranges: &[UintRange], bounds: UintRange) -> Vec<UintRange> {
    let (remaining, _) = remove_ranges(ranges, &[bounds]);
    remaining
}

/// Subtract every range in `to_remove` from every range in `ranges`.
///
/// Returns `(remaining, removed)`, both sorted and merged.
pub fn remove_ranges(
    to_remove: &[UintRange],
    ranges: &[UintRange],
) -> (Vec<UintRange>, Vec<UintRange>) {
    let mut remaining = ranges.to_vec();
    let mut removed = Vec::new();

    for range_to_remove in to_remove {
        let mut next = Vec::with_capacity(remaining.len());
        for range in &remaining {
            let (left, overlap) = range.get_overlap_details(range_to_remove);
            next.extend(left);
            removed.extend(overlap);
        }
        remaining = next;
    }

    (sort_and_merge(&remaining), sort_and_merge(&removed))
}

/// In-place subtraction of `ids` from `ranges`.
pub fn remove_ids(ranges: &mut Vec<UintRange>, ids: &[UintRange]) {
    let (remaining, _) = remove_ranges(ids, ranges);
    *ranges = remaining;
}

/// Full three-way diff of two range lists.
pub fn diff_ranges(first: &[UintRange], second: &[UintRange]) -> RangeDiff {
    let (in_self_only, overlap) = remove_ranges(second, first);
    let (in_other_only, _) = remove_ranges(first, second);
    RangeDiff {
        in_self_only,
        overlap,
        in_other_only,
    }
}

/// Validate a range list: every range in-domain and no two overlapping.
pub fn validate_ranges(ranges: &[UintRange], allow_empty: bool) -> Result<(), RangeError> {
    if ranges.is_empty() && !allow_empty {
        return Err(RangeError::Empty);
    }

    for range in ranges {
        range.validate()?;
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| range.start);
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
        return Err(RangeError::Overlapping {
            first: pair[0].to_string(),
            second: pair[1].to_string(),
        });
    }

    Ok(())
}

/// Render a range list as `[a-b, c-d]`.
pub fn format_ranges(ranges: &[UintRange]) -> String {
    let parts: Vec<String> = ranges.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
