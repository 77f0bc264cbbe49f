//! Action and timed-update permissions.

use super::{PermissionProjection, StandalonePermission};
use crate::domain::{UniversalPermission, UsedAxes};
use serde::{Deserialize, Serialize};
use shared_types::UintRange;

/// Plain action (e.g. delete collection): only permanence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPermission {
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for ActionPermission {
    const NAME: &'static str = "ActionPermission";
    const USED_AXES: UsedAxes = UsedAxes::ACTION;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
            ..UniversalPermission::new(Self::USED_AXES)
        }
    }
}

impl StandalonePermission for ActionPermission {}

/// Update of a timeline field (manager, collection metadata, standards...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedUpdatePermission {
    pub timeline_times: Vec<UintRange>,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for TimedUpdatePermission {
    const NAME: &'static str = "TimedUpdatePermission";
    const USED_AXES: UsedAxes = UsedAxes::TIMED_UPDATE;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            timeline_times: self.timeline_times.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
            ..UniversalPermission::new(Self::USED_AXES)
        }
    }
}

impl StandalonePermission for TimedUpdatePermission {}

/// Update of a badge-keyed timeline field (badge metadata).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedUpdateWithBadgeIdsPermission {
    pub timeline_times: Vec<UintRange>,
    pub badge_ids: Vec<UintRange>,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for TimedUpdateWithBadgeIdsPermission {
    const NAME: &'static str = "TimedUpdateWithBadgeIdsPermission";
    const USED_AXES: UsedAxes = UsedAxes::TIMED_UPDATE_WITH_BADGE_IDS;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            timeline_times: self.timeline_times.clone(),
            badge_ids: self.badge_ids.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
            ..UniversalPermission::new(Self::USED_AXES)
        }
    }
}

impl StandalonePermission for TimedUpdateWithBadgeIdsPermission {}

/// Balance-changing action (create more badges) over badge ids and
/// ownership times.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesActionPermission {
    pub badge_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for BalancesActionPermission {
    const NAME: &'static str = "BalancesActionPermission";
    const USED_AXES: UsedAxes = UsedAxes::BALANCES_ACTION;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            badge_ids: self.badge_ids.clone(),
            ownership_times: self.ownership_times.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
            ..UniversalPermission::new(Self::USED_AXES)
        }
    }
}

impl StandalonePermission for BalancesActionPermission {}
