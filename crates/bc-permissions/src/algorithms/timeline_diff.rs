//! Timeline Diff
//!
//! Timeline fields (manager, metadata, custom data, standards, archived)
//! hold one value per timeline-time range, optionally per badge id. Diffing
//! two timelines yields the rectangles whose value changed; those are the
//! points a timed-update permission must allow at the current time.

use super::first_match::{compile_first_match, CompileOptions};
use super::overlap::diff_all;
use crate::domain::{
    PermissionError, PermissionPayload, UniversalPermission, UniversalPermissionDetails, UsedAxes,
};
use serde::{Deserialize, Serialize};
use shared_types::UintRange;
use tracing::debug;

/// One entry of a timeline: a value over some times (and badge ids).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineValue {
    pub timeline_times: Vec<UintRange>,
    /// Only read when the timeline is keyed by badge id.
    pub badge_ids: Vec<UintRange>,
    pub value: PermissionPayload,
}

impl TimelineValue {
    pub fn new(timeline_times: Vec<UintRange>, value: PermissionPayload) -> Self {
        Self {
            timeline_times,
            badge_ids: Vec::new(),
            value,
        }
    }

    pub fn with_badge_ids(mut self, badge_ids: Vec<UintRange>) -> Self {
        self.badge_ids = badge_ids;
        self
    }

    fn to_universal(&self, uses: UsedAxes) -> UniversalPermission {
        UniversalPermission {
            timeline_times: self.timeline_times.clone(),
            badge_ids: self.badge_ids.clone(),
            payload: self.value.clone(),
            ..UniversalPermission::new(uses)
        }
    }
}

/// Rectangles whose value differs between `old` and `new`.
///
/// Both timelines are flattened first-match with a catch-all carrying
/// [`PermissionPayload::None`], so unset times compare as "no value".
pub fn timeline_updates(
    old: &[TimelineValue],
    new: &[TimelineValue],
    uses: UsedAxes,
    max_rectangles: usize,
) -> Result<Vec<UniversalPermissionDetails>, PermissionError> {
    let options = CompileOptions::with_catch_all(uses, max_rectangles);
    let old_rules: Vec<UniversalPermission> = old.iter().map(|v| v.to_universal(uses)).collect();
    let new_rules: Vec<UniversalPermission> = new.iter().map(|v| v.to_universal(uses)).collect();

    let old_flat = compile_first_match(&old_rules, &options)?;
    let new_flat = compile_first_match(&new_rules, &options)?;
    let diff = diff_all(&old_flat, &new_flat);

    let mut updated: Vec<UniversalPermissionDetails> = diff
        .overlaps
        .into_iter()
        .filter(|overlap| overlap.first.payload != overlap.second.payload)
        .map(|overlap| overlap.overlap)
        .collect();
    updated.extend(diff.in_first_only);
    updated.extend(diff.in_second_only);

    debug!(
        old = old.len(),
        new = new.len(),
        updated = updated.len(),
        "Computed timeline updates"
    );
    Ok(updated)
}
