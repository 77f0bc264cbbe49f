//! # Typed Permission Projections
//!
//! Domain-specific permission shapes. Each one is a constrained view of
//! [`UniversalPermission`]: it fixes which axes are used and lifts into the
//! universal form, then validates updates and checks points through the
//! generic engine.

mod action;
mod approval;

pub use action::{
    ActionPermission, BalancesActionPermission, TimedUpdatePermission,
    TimedUpdateWithBadgeIdsPermission,
};
pub use approval::{
    check_for_user, validate_update_for_user, CollectionApprovalPermission,
    UserApprovalPermission, UserIncomingApprovalPermission, UserOutgoingApprovalPermission,
};

use crate::algorithms::{
    check_not_forbidden_for_all_overlaps, compile_first_match,
    validate_universal_permission_update,
};
use crate::config::EngineConfig;
use crate::domain::{PermissionCheck, PermissionError, UniversalPermission, UsedAxes};
use crate::ports::{SystemTimeSource, TimeSource};
use shared_types::Timestamp;

/// A typed permission that lifts into the universal representation.
pub trait PermissionProjection {
    /// Name used in diagnostics.
    const NAME: &'static str;
    /// Axes this kind uses.
    const USED_AXES: UsedAxes;

    fn to_universal(&self) -> UniversalPermission;
}

/// A projection that can be validated and checked without further context.
///
/// User-level approvals need the user's address and expose their own
/// entry points instead.
pub trait StandalonePermission: PermissionProjection + Sized {
    /// Validate an `old -> new` revision with the default engine config.
    fn validate_update(old: &[Self], new: &[Self]) -> Result<(), PermissionError> {
        validate_projection_update(old, new, &EngineConfig::default())
    }

    /// Check points at `time`, or at the current system time.
    fn check(
        points: &[PermissionCheck],
        rules: &[Self],
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = time.unwrap_or_else(|| SystemTimeSource.now());
        check_projection(points, rules, time, &EngineConfig::default())
    }
}

/// Validate the new rules, then require the revision to keep every
/// permanence decision of the old rules.
pub fn validate_universal_update(
    name: &'static str,
    old: &[UniversalPermission],
    new: &[UniversalPermission],
    uses: UsedAxes,
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    for (index, rule) in new.iter().enumerate() {
        rule.validate().map_err(|source| PermissionError::InRule {
            field: name,
            index,
            source: Box::new(source),
        })?;
    }

    let options = config.compile_options_with_catch_all(uses);
    let old_flat = compile_first_match(old, &options)?;
    let new_flat = compile_first_match(new, &options)?;
    validate_universal_permission_update(&old_flat, &new_flat, config.max_pair_comparisons)
}

/// Check points against rules at a fixed time.
pub fn check_universal(
    points: &[PermissionCheck],
    rules: &[UniversalPermission],
    uses: UsedAxes,
    time: Timestamp,
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    let flattened = compile_first_match(rules, &config.compile_options())?;
    let details: Vec<_> = points.iter().map(|point| point.to_details(uses)).collect();
    check_not_forbidden_for_all_overlaps(&flattened, &details, time)
}

pub fn validate_projection_update<P: StandalonePermission>(
    old: &[P],
    new: &[P],
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    validate_universal_update(
        P::NAME,
        &lift_all(old),
        &lift_all(new),
        P::USED_AXES,
        config,
    )
}

pub fn check_projection<P: StandalonePermission>(
    points: &[PermissionCheck],
    rules: &[P],
    time: Timestamp,
    config: &EngineConfig,
) -> Result<(), PermissionError> {
    check_universal(points, &lift_all(rules), P::USED_AXES, time, config)
}

fn lift_all<P: PermissionProjection>(rules: &[P]) -> Vec<UniversalPermission> {
    rules.iter().map(P::to_universal).collect()
}
