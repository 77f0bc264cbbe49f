//! Concrete points handed to the temporal checker.
//!
//! A [`PermissionCheck`] names the badge ids, times and parties of an action
//! ("transfer badge 5 at ownership time T from A to B, initiated by C").
//! Axes left unset cover their whole domain.

use super::axes::{AxisRange, UsedAxes};
use super::universal::UniversalPermissionDetails;
use shared_types::{AddressList, UintRange};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionCheck {
    pub badge_ids: Option<UintRange>,
    pub timeline_times: Option<UintRange>,
    pub transfer_times: Option<UintRange>,
    pub ownership_times: Option<UintRange>,
    pub to_list: Option<AddressList>,
    pub from_list: Option<AddressList>,
    pub initiated_by_list: Option<AddressList>,
    pub approval_id_list: Option<AddressList>,
}

impl PermissionCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badge_id(self, id: u64) -> Self {
        self.badge_ids(UintRange::single(id))
    }

    pub fn badge_ids(mut self, ids: UintRange) -> Self {
        self.badge_ids = Some(ids);
        self
    }

    pub fn timeline_times(mut self, times: UintRange) -> Self {
        self.timeline_times = Some(times);
        self
    }

    pub fn transfer_time(mut self, time: u64) -> Self {
        self.transfer_times = Some(UintRange::single(time));
        self
    }

    pub fn ownership_times(mut self, times: UintRange) -> Self {
        self.ownership_times = Some(times);
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to_list = Some(AddressList::reserved(address));
        self
    }

    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from_list = Some(AddressList::reserved(address));
        self
    }

    pub fn initiated_by(mut self, address: impl Into<String>) -> Self {
        self.initiated_by_list = Some(AddressList::reserved(address));
        self
    }

    pub fn approval_id(mut self, id: impl Into<String>) -> Self {
        self.approval_id_list = Some(AddressList::reserved(id));
        self
    }

    /// Read a rectangle back as a check point (timeline diff output).
    pub fn from_details(details: &UniversalPermissionDetails) -> Self {
        let list = |list: &AddressList| (!list.is_all()).then(|| list.clone());
        Self {
            badge_ids: details.badge_id.as_range(),
            timeline_times: details.timeline_time.as_range(),
            transfer_times: details.transfer_time.as_range(),
            ownership_times: details.ownership_time.as_range(),
            to_list: list(&details.to_list),
            from_list: list(&details.from_list),
            initiated_by_list: list(&details.initiated_by_list),
            approval_id_list: list(&details.approval_id_list),
        }
    }

    /// Project onto the axes a permission kind uses.
    pub fn to_details(&self, uses: UsedAxes) -> UniversalPermissionDetails {
        let range = |value: Option<UintRange>, used: bool| {
            if used {
                AxisRange::Bounded(value.unwrap_or_else(UintRange::full))
            } else {
                AxisRange::Wildcard
            }
        };
        let list = |value: &Option<AddressList>, used: bool| match value {
            Some(list) if used => list.clone(),
            _ => AddressList::all(),
        };

        UniversalPermissionDetails {
            timeline_time: range(self.timeline_times, uses.timeline_times),
            badge_id: range(self.badge_ids, uses.badge_ids),
            transfer_time: range(self.transfer_times, uses.transfer_times),
            ownership_time: range(self.ownership_times, uses.ownership_times),
            to_list: list(&self.to_list, uses.to_list),
            from_list: list(&self.from_list, uses.from_list),
            initiated_by_list: list(&self.initiated_by_list, uses.initiated_by_list),
            approval_id_list: list(&self.approval_id_list, uses.approval_id_list),
            ..UniversalPermissionDetails::unbounded(uses)
        }
    }
}
