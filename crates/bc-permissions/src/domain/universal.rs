//! # Universal Permission Representation
//!
//! Every typed permission lifts into [`UniversalPermission`], an 8-axis rule
//! with one "uses" flag per axis. Expansion turns a rule into
//! [`UniversalPermissionDetails`] rectangles: one concrete value per axis,
//! plus the permanence decisions and payload of the rule it came from.

use super::axes::{AxisRange, UsedAxes};
use super::errors::PermissionError;
use super::invariants::invariant_permanence_disjoint;
use super::payload::PermissionPayload;
use serde::{Deserialize, Serialize};
use shared_types::{format_ranges, remove_ranges, validate_ranges, AddressList, UintRange};
use std::fmt;

/// Pre-expansion rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalPermission {
    pub badge_ids: Vec<UintRange>,
    pub timeline_times: Vec<UintRange>,
    pub transfer_times: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub to_list: AddressList,
    pub from_list: AddressList,
    pub initiated_by_list: AddressList,
    pub approval_id_list: AddressList,
    pub uses: UsedAxes,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
    pub payload: PermissionPayload,
}

impl UniversalPermission {
    /// Empty rule for a kind: no ranges, universal lists, no decisions.
    pub fn new(uses: UsedAxes) -> Self {
        Self {
            badge_ids: Vec::new(),
            timeline_times: Vec::new(),
            transfer_times: Vec::new(),
            ownership_times: Vec::new(),
            to_list: AddressList::all(),
            from_list: AddressList::all(),
            initiated_by_list: AddressList::all(),
            approval_id_list: AddressList::all(),
            uses,
            permanently_permitted_times: Vec::new(),
            permanently_forbidden_times: Vec::new(),
            payload: PermissionPayload::None,
        }
    }

    /// Synthetic rule covering the whole space with no decisions.
    pub fn catch_all(uses: UsedAxes) -> Self {
        let full = vec![UintRange::full()];
        Self {
            badge_ids: full.clone(),
            timeline_times: full.clone(),
            transfer_times: full.clone(),
            ownership_times: full,
            ..Self::new(uses)
        }
    }

    /// Lift a rectangle back into a single-cell rule.
    pub fn from_details(details: &UniversalPermissionDetails) -> Self {
        fn lift(axis: &AxisRange) -> (bool, Vec<UintRange>) {
            match axis {
                AxisRange::Wildcard => (false, Vec::new()),
                AxisRange::Bounded(range) => (true, vec![*range]),
            }
        }

        let (uses_badge_ids, badge_ids) = lift(&details.badge_id);
        let (uses_timeline_times, timeline_times) = lift(&details.timeline_time);
        let (uses_transfer_times, transfer_times) = lift(&details.transfer_time);
        let (uses_ownership_times, ownership_times) = lift(&details.ownership_time);

        Self {
            badge_ids,
            timeline_times,
            transfer_times,
            ownership_times,
            to_list: details.to_list.clone(),
            from_list: details.from_list.clone(),
            initiated_by_list: details.initiated_by_list.clone(),
            approval_id_list: details.approval_id_list.clone(),
            uses: UsedAxes {
                badge_ids: uses_badge_ids,
                timeline_times: uses_timeline_times,
                transfer_times: uses_transfer_times,
                ownership_times: uses_ownership_times,
                to_list: true,
                from_list: true,
                initiated_by_list: true,
                approval_id_list: true,
            },
            permanently_permitted_times: details.permanently_permitted_times.clone(),
            permanently_forbidden_times: details.permanently_forbidden_times.clone(),
            payload: details.payload.clone(),
        }
    }

    /// Axis values with unused axes replaced by wildcards.
    pub fn badge_id_values(&self) -> Vec<AxisRange> {
        axis_values(&self.badge_ids, self.uses.badge_ids)
    }

    pub fn timeline_time_values(&self) -> Vec<AxisRange> {
        axis_values(&self.timeline_times, self.uses.timeline_times)
    }

    pub fn transfer_time_values(&self) -> Vec<AxisRange> {
        axis_values(&self.transfer_times, self.uses.transfer_times)
    }

    pub fn ownership_time_values(&self) -> Vec<AxisRange> {
        axis_values(&self.ownership_times, self.uses.ownership_times)
    }

    pub fn to_list_value(&self) -> AddressList {
        list_value(&self.to_list, self.uses.to_list)
    }

    pub fn from_list_value(&self) -> AddressList {
        list_value(&self.from_list, self.uses.from_list)
    }

    pub fn initiated_by_list_value(&self) -> AddressList {
        list_value(&self.initiated_by_list, self.uses.initiated_by_list)
    }

    pub fn approval_id_list_value(&self) -> AddressList {
        list_value(&self.approval_id_list, self.uses.approval_id_list)
    }

    /// Number of elementary rectangles this rule expands into.
    pub fn expansion_size(&self) -> Option<usize> {
        self.badge_id_values()
            .len()
            .checked_mul(self.timeline_time_values().len())?
            .checked_mul(self.transfer_time_values().len())?
            .checked_mul(self.ownership_time_values().len())
    }

    /// Shape validation: used range axes in-domain and disjoint, permanence
    /// ranges well-formed and never both permitted and forbidden.
    pub fn validate(&self) -> Result<(), PermissionError> {
        let used_axes = [
            (self.uses.badge_ids, &self.badge_ids),
            (self.uses.timeline_times, &self.timeline_times),
            (self.uses.transfer_times, &self.transfer_times),
            (self.uses.ownership_times, &self.ownership_times),
        ];
        for (used, ranges) in used_axes {
            if used {
                validate_ranges(ranges, true)?;
            }
        }

        validate_ranges(&self.permanently_permitted_times, true)?;
        validate_ranges(&self.permanently_forbidden_times, true)?;

        if !invariant_permanence_disjoint(
            &self.permanently_permitted_times,
            &self.permanently_forbidden_times,
        ) {
            let (_, overlap) = remove_ranges(
                &self.permanently_forbidden_times,
                &self.permanently_permitted_times,
            );
            return Err(PermissionError::PermanenceConflict { overlap });
        }

        Ok(())
    }
}

fn axis_values(ranges: &[UintRange], used: bool) -> Vec<AxisRange> {
    if used {
        ranges.iter().copied().map(AxisRange::Bounded).collect()
    } else {
        vec![AxisRange::Wildcard]
    }
}

fn list_value(list: &AddressList, used: bool) -> AddressList {
    if used {
        list.clone()
    } else {
        AddressList::all()
    }
}

/// One fully specified rectangle of the permission space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalPermissionDetails {
    pub timeline_time: AxisRange,
    pub badge_id: AxisRange,
    pub transfer_time: AxisRange,
    pub ownership_time: AxisRange,
    pub to_list: AddressList,
    pub from_list: AddressList,
    pub initiated_by_list: AddressList,
    pub approval_id_list: AddressList,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
    pub payload: PermissionPayload,
}

impl UniversalPermissionDetails {
    /// Rectangle covering the whole space of `uses`, with no decisions.
    pub fn unbounded(uses: UsedAxes) -> Self {
        let bounded = |used: bool| {
            if used {
                AxisRange::Bounded(UintRange::full())
            } else {
                AxisRange::Wildcard
            }
        };
        Self {
            timeline_time: bounded(uses.timeline_times),
            badge_id: bounded(uses.badge_ids),
            transfer_time: bounded(uses.transfer_times),
            ownership_time: bounded(uses.ownership_times),
            to_list: AddressList::all(),
            from_list: AddressList::all(),
            initiated_by_list: AddressList::all(),
            approval_id_list: AddressList::all(),
            permanently_permitted_times: Vec::new(),
            permanently_forbidden_times: Vec::new(),
            payload: PermissionPayload::None,
        }
    }

    /// True when any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.to_list.is_empty()
            || self.from_list.is_empty()
            || self.initiated_by_list.is_empty()
            || self.approval_id_list.is_empty()
    }

    pub fn has_decisions(&self) -> bool {
        !self.permanently_permitted_times.is_empty()
            || !self.permanently_forbidden_times.is_empty()
    }
}

impl fmt::Display for UniversalPermissionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut first = true;
        let mut field = |f: &mut fmt::Formatter<'_>, name: &str, value: String| -> fmt::Result {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}: {}", name, value)
        };

        let ranges = [
            ("timeline times", &self.timeline_time),
            ("badge ids", &self.badge_id),
            ("transfer times", &self.transfer_time),
            ("ownership times", &self.ownership_time),
        ];
        for (name, axis) in ranges {
            if let AxisRange::Bounded(range) = axis {
                field(f, name, range.to_string())?;
            }
        }

        let lists = [
            ("to", &self.to_list),
            ("from", &self.from_list),
            ("initiated by", &self.initiated_by_list),
            ("approval ids", &self.approval_id_list),
        ];
        for (name, list) in lists {
            if !list.is_all() {
                field(f, name, list.to_string())?;
            }
        }

        if first {
            write!(f, "all")?;
        }
        write!(f, ")")?;

        if self.has_decisions() {
            write!(
                f,
                " permitted {} forbidden {}",
                format_ranges(&self.permanently_permitted_times),
                format_ranges(&self.permanently_forbidden_times)
            )?;
        }
        Ok(())
    }
}
