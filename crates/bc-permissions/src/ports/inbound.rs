//! # Inbound Port - PermissionEngineApi
//!
//! Driving port exposing the standalone engine entry points to the
//! collection, user and approval layers. Typed projections go through
//! the service's generic methods; this trait works on universal rules so
//! callers can hold it as a trait object.

use crate::algorithms::{OverlapDiff, TimelineValue};
use crate::domain::{
    PermissionCheck, PermissionError, UniversalPermission, UniversalPermissionDetails, UsedAxes,
};
use shared_types::Timestamp;

/// Primary API of the permission engine.
///
/// Every method is a pure function of its arguments, the engine config and
/// (for checks without an explicit time) the clock.
///
/// # Example
///
/// ```rust,ignore
/// use bc_permissions::{PermissionEngineApi, PermissionService, UsedAxes};
///
/// let engine = PermissionService::new();
/// let flat = engine.compile(&rules, Some(UsedAxes::COLLECTION_APPROVAL))?;
/// let compact = engine.merge(&flat);
/// ```
pub trait PermissionEngineApi: Send + Sync {
    /// First-match compilation, optionally with a trailing catch-all.
    ///
    /// # Errors
    /// - `TooManyRectangles`: expansion over the configured budget
    fn compile(
        &self,
        rules: &[UniversalPermission],
        catch_all: Option<UsedAxes>,
    ) -> Result<Vec<UniversalPermissionDetails>, PermissionError>;

    /// All-pairs overlap diff of two flattened sets.
    fn diff(
        &self,
        first: &[UniversalPermissionDetails],
        second: &[UniversalPermissionDetails],
    ) -> OverlapDiff;

    /// Compact a flattened set back into rules.
    fn merge(&self, details: &[UniversalPermissionDetails]) -> Vec<UniversalPermission>;

    /// Validate an `old -> new` rule revision for one permission kind.
    ///
    /// # Errors
    /// - `InRule`: a new rule is malformed
    /// - `RemovedWithoutReplacement`, `DecisionReversed`: a fixed decision
    ///   was dropped or flipped
    fn validate_update(
        &self,
        old: &[UniversalPermission],
        new: &[UniversalPermission],
        uses: UsedAxes,
    ) -> Result<(), PermissionError>;

    /// Check points against rules at `time`, or now.
    ///
    /// # Errors
    /// - `Forbidden`: a point is inside a permanently forbidden window
    fn check(
        &self,
        points: &[PermissionCheck],
        rules: &[UniversalPermission],
        uses: UsedAxes,
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError>;

    /// Rectangles touched by a timeline value change.
    fn timeline_updates(
        &self,
        old: &[TimelineValue],
        new: &[TimelineValue],
        uses: UsedAxes,
    ) -> Result<Vec<UniversalPermissionDetails>, PermissionError>;
}
