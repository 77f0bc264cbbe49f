//! Approval-update permissions.
//!
//! User-level approvals have one implicit party: the user themself is the
//! sender of every outgoing transfer and the recipient of every incoming
//! one. They lower to the collection shape by pinning that axis to the
//! user's reserved singleton list.

use super::{
    check_universal, validate_universal_update, PermissionProjection, StandalonePermission,
};
use crate::config::EngineConfig;
use crate::domain::{PermissionCheck, PermissionError, UniversalPermission, UsedAxes};
use crate::ports::{SystemTimeSource, TimeSource};
use serde::{Deserialize, Serialize};
use shared_types::{AddressList, Timestamp, UintRange};

/// Who may update which collection-level transfer approvals, and when.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionApprovalPermission {
    pub from_list: AddressList,
    pub to_list: AddressList,
    pub initiated_by_list: AddressList,
    pub transfer_times: Vec<UintRange>,
    pub badge_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id_list: AddressList,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for CollectionApprovalPermission {
    const NAME: &'static str = "CollectionApprovalPermission";
    const USED_AXES: UsedAxes = UsedAxes::COLLECTION_APPROVAL;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            badge_ids: self.badge_ids.clone(),
            transfer_times: self.transfer_times.clone(),
            ownership_times: self.ownership_times.clone(),
            to_list: self.to_list.clone(),
            from_list: self.from_list.clone(),
            initiated_by_list: self.initiated_by_list.clone(),
            approval_id_list: self.approval_id_list.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
            ..UniversalPermission::new(Self::USED_AXES)
        }
    }
}

impl StandalonePermission for CollectionApprovalPermission {}

/// Permission to update a user's outgoing approvals. The sender is the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOutgoingApprovalPermission {
    pub to_list: AddressList,
    pub initiated_by_list: AddressList,
    pub transfer_times: Vec<UintRange>,
    pub badge_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id_list: AddressList,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for UserOutgoingApprovalPermission {
    const NAME: &'static str = "UserOutgoingApprovalPermission";
    const USED_AXES: UsedAxes = UsedAxes::USER_OUTGOING_APPROVAL;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            uses: Self::USED_AXES,
            ..self.to_collection_permission_with(AddressList::all()).to_universal()
        }
    }
}

impl UserOutgoingApprovalPermission {
    /// Lower to the collection shape with `user` as the only sender.
    pub fn to_collection_permission(&self, user: &str) -> CollectionApprovalPermission {
        self.to_collection_permission_with(AddressList::reserved(user))
    }

    fn to_collection_permission_with(&self, from_list: AddressList) -> CollectionApprovalPermission {
        CollectionApprovalPermission {
            from_list,
            to_list: self.to_list.clone(),
            initiated_by_list: self.initiated_by_list.clone(),
            transfer_times: self.transfer_times.clone(),
            badge_ids: self.badge_ids.clone(),
            ownership_times: self.ownership_times.clone(),
            approval_id_list: self.approval_id_list.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
        }
    }

    pub fn validate_update(user: &str, old: &[Self], new: &[Self]) -> Result<(), PermissionError> {
        validate_update_for_user(user, old, new, &EngineConfig::default())
    }

    pub fn check(
        user: &str,
        points: &[PermissionCheck],
        rules: &[Self],
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = time.unwrap_or_else(|| SystemTimeSource.now());
        check_for_user(user, points, rules, time, &EngineConfig::default())
    }
}

/// Permission to update a user's incoming approvals. The recipient is the
/// user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIncomingApprovalPermission {
    pub from_list: AddressList,
    pub initiated_by_list: AddressList,
    pub transfer_times: Vec<UintRange>,
    pub badge_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id_list: AddressList,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionProjection for UserIncomingApprovalPermission {
    const NAME: &'static str = "UserIncomingApprovalPermission";
    const USED_AXES: UsedAxes = UsedAxes::USER_INCOMING_APPROVAL;

    fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            uses: Self::USED_AXES,
            ..self.to_collection_permission_with(AddressList::all()).to_universal()
        }
    }
}

impl UserIncomingApprovalPermission {
    /// Lower to the collection shape with `user` as the only recipient.
    pub fn to_collection_permission(&self, user: &str) -> CollectionApprovalPermission {
        self.to_collection_permission_with(AddressList::reserved(user))
    }

    fn to_collection_permission_with(&self, to_list: AddressList) -> CollectionApprovalPermission {
        CollectionApprovalPermission {
            from_list: self.from_list.clone(),
            to_list,
            initiated_by_list: self.initiated_by_list.clone(),
            transfer_times: self.transfer_times.clone(),
            badge_ids: self.badge_ids.clone(),
            ownership_times: self.ownership_times.clone(),
            approval_id_list: self.approval_id_list.clone(),
            permanently_permitted_times: self.permanently_permitted_times.clone(),
            permanently_forbidden_times: self.permanently_forbidden_times.clone(),
        }
    }

    pub fn validate_update(user: &str, old: &[Self], new: &[Self]) -> Result<(), PermissionError> {
        validate_update_for_user(user, old, new, &EngineConfig::default())
    }

    pub fn check(
        user: &str,
        points: &[PermissionCheck],
        rules: &[Self],
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = time.unwrap_or_else(|| SystemTimeSource.now());
        check_for_user(user, points, rules, time, &EngineConfig::default())
    }
}

/// A user-level approval permission with one implicit party.
pub trait UserApprovalPermission: PermissionProjection {
    fn to_collection_permission(&self, user: &str) -> CollectionApprovalPermission;

    /// Pin the implicit party of a check point to `user`.
    fn pin_point(point: &PermissionCheck, user: &str) -> PermissionCheck;
}

impl UserApprovalPermission for UserOutgoingApprovalPermission {
    fn to_collection_permission(&self, user: &str) -> CollectionApprovalPermission {
        UserOutgoingApprovalPermission::to_collection_permission(self, user)
    }

    fn pin_point(point: &PermissionCheck, user: &str) -> PermissionCheck {
        point.clone().from(user)
    }
}

impl UserApprovalPermission for UserIncomingApprovalPermission {
    fn to_collection_permission(&self, user: &str) -> CollectionApprovalPermission {
        UserIncomingApprovalPermission::to_collection_permission(self, user)
    }

    fn pin_point(point: &PermissionCheck, user: &str) -> PermissionCheck {
        point.clone().to(user)
    }
}

/// Lower both revisions for `user`, then validate as collection approvals.
///
/// Malformed rules are reported under the user-level type's name.
pub fn validate_update_for_user<P: UserApprovalPermission>(
    user: &str,
    old: &[P],
    new: &[P],
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    validate_universal_update(
        P::NAME,
        &lower_for_user(user, old),
        &lower_for_user(user, new),
        CollectionApprovalPermission::USED_AXES,
        config,
    )
}

/// Lower rules and points for `user`, then check as collection approvals.
pub fn check_for_user<P: UserApprovalPermission>(
    user: &str,
    points: &[PermissionCheck],
    rules: &[P],
    time: Timestamp,
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    let pinned: Vec<PermissionCheck> = points
        .iter()
        .map(|point| P::pin_point(point, user))
        .collect();
    check_universal(
        &pinned,
        &lower_for_user(user, rules),
        CollectionApprovalPermission::USED_AXES,
        time,
        config,
    )
}

fn lower_for_user<P: UserApprovalPermission>(
    user: &str,
    rules: &[P],
) -> Vec<UniversalPermission> {
    rules
        .iter()
        .map(|rule| rule.to_collection_permission(user).to_universal())
        .collect()
}
