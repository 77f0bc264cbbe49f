//! # Axes
//!
//! The eight axes of the permission space and the per-kind presets that
//! select which of them a permission type actually uses.
//!
//! A range axis that a kind does not use is [`AxisRange::Wildcard`]: a
//! single opaque point that only overlaps another wildcard. An unused
//! address axis is simply the universal list.

use serde::{Deserialize, Serialize};
use shared_types::UintRange;
use std::fmt;

/// Value of one range axis on a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRange {
    /// Axis not used by this permission kind.
    Wildcard,
    /// Axis used; covers exactly this range.
    Bounded(UintRange),
}

impl AxisRange {
    /// Whether the two values share a point. Wildcards only meet wildcards.
    pub fn overlaps(&self, other: &AxisRange) -> bool {
        match (self, other) {
            (Self::Wildcard, Self::Wildcard) => true,
            (Self::Bounded(mine), Self::Bounded(theirs)) => mine.overlaps(theirs),
            _ => false,
        }
    }

    pub fn as_range(&self) -> Option<UintRange> {
        match self {
            Self::Wildcard => None,
            Self::Bounded(range) => Some(*range),
        }
    }

    /// Remove `other` from `self`, returning `(remaining, overlap)`.
    ///
    /// Wildcards overlap only each other. A wildcard never overlaps a
    /// bounded range.
    pub fn get_overlap_details(&self, other: &AxisRange) -> (Vec<AxisRange>, Option<AxisRange>) {
        match (self, other) {
            (Self::Wildcard, Self::Wildcard) => (Vec::new(), Some(Self::Wildcard)),
            (Self::Bounded(mine), Self::Bounded(theirs)) => {
                let (remaining, overlap) = mine.get_overlap_details(theirs);
                (
                    remaining.into_iter().map(Self::Bounded).collect(),
                    overlap.into_iter().next().map(Self::Bounded),
                )
            }
            _ => (vec![*self], None),
        }
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => write!(f, "*"),
            Self::Bounded(range) => write!(f, "{}", range),
        }
    }
}

/// Named axis, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    TimelineTime,
    BadgeId,
    TransferTime,
    OwnershipTime,
    ToList,
    FromList,
    InitiatedByList,
    ApprovalIdList,
}

impl Axis {
    /// Fixed processing order of the overlap engine.
    pub const ORDER: [Axis; 8] = [
        Axis::TimelineTime,
        Axis::BadgeId,
        Axis::TransferTime,
        Axis::OwnershipTime,
        Axis::ToList,
        Axis::FromList,
        Axis::InitiatedByList,
        Axis::ApprovalIdList,
    ];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::TimelineTime => "timeline times",
            Axis::BadgeId => "badge ids",
            Axis::TransferTime => "transfer times",
            Axis::OwnershipTime => "ownership times",
            Axis::ToList => "to",
            Axis::FromList => "from",
            Axis::InitiatedByList => "initiated by",
            Axis::ApprovalIdList => "approval ids",
        };
        f.write_str(name)
    }
}

/// Which axes a permission kind uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsedAxes {
    pub badge_ids: bool,
    pub timeline_times: bool,
    pub transfer_times: bool,
    pub ownership_times: bool,
    pub to_list: bool,
    pub from_list: bool,
    pub initiated_by_list: bool,
    pub approval_id_list: bool,
}

impl UsedAxes {
    /// Plain action: no axes, only permanence.
    pub const ACTION: Self = Self {
        badge_ids: false,
        timeline_times: false,
        transfer_times: false,
        ownership_times: false,
        to_list: false,
        from_list: false,
        initiated_by_list: false,
        approval_id_list: false,
    };

    pub const TIMED_UPDATE: Self = Self {
        timeline_times: true,
        ..Self::ACTION
    };

    pub const TIMED_UPDATE_WITH_BADGE_IDS: Self = Self {
        badge_ids: true,
        timeline_times: true,
        ..Self::ACTION
    };

    pub const BALANCES_ACTION: Self = Self {
        badge_ids: true,
        ownership_times: true,
        ..Self::ACTION
    };

    pub const COLLECTION_APPROVAL: Self = Self {
        badge_ids: true,
        timeline_times: false,
        transfer_times: true,
        ownership_times: true,
        to_list: true,
        from_list: true,
        initiated_by_list: true,
        approval_id_list: true,
    };

    /// The sender is implicit (the user themself).
    pub const USER_OUTGOING_APPROVAL: Self = Self {
        from_list: false,
        ..Self::COLLECTION_APPROVAL
    };

    /// The recipient is implicit (the user themself).
    pub const USER_INCOMING_APPROVAL: Self = Self {
        to_list: false,
        ..Self::COLLECTION_APPROVAL
    };

    pub const ALL: Self = Self {
        badge_ids: true,
        timeline_times: true,
        transfer_times: true,
        ownership_times: true,
        to_list: true,
        from_list: true,
        initiated_by_list: true,
        approval_id_list: true,
    };

    pub fn uses(&self, axis: Axis) -> bool {
        match axis {
            Axis::TimelineTime => self.timeline_times,
            Axis::BadgeId => self.badge_ids,
            Axis::TransferTime => self.transfer_times,
            Axis::OwnershipTime => self.ownership_times,
            Axis::ToList => self.to_list,
            Axis::FromList => self.from_list,
            Axis::InitiatedByList => self.initiated_by_list,
            Axis::ApprovalIdList => self.approval_id_list,
        }
    }
}
