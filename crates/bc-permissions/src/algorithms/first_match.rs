//! First-Match-Only Compiler
//!
//! Flattens an ordered, possibly overlapping rule list into disjoint
//! rectangles. Rules are processed in order and each expanded rectangle only
//! keeps what earlier rectangles have not already claimed, so the earliest
//! rule always wins (first-match ACL semantics).
//!
//! Expansion is a full cross product of every range axis, which grows
//! combinatorially. The compiler counts elementary rectangles against a
//! budget and fails closed when it is exceeded.

use super::overlap::remove_overlap_from_values;
use crate::domain::{
    invariant_pairwise_disjoint, PermissionError, UniversalPermission, UniversalPermissionDetails,
    UsedAxes,
};
use tracing::{debug, warn};

/// Default cap on rectangles produced by one compilation.
pub const DEFAULT_MAX_RECTANGLES: usize = 10_000;

/// Per-call compilation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Append a catch-all rule for this axis preset.
    pub catch_all: Option<UsedAxes>,
    /// Maximum elementary and flattened rectangles.
    pub max_rectangles: usize,
}

impl CompileOptions {
    pub fn new(max_rectangles: usize) -> Self {
        Self {
            catch_all: None,
            max_rectangles,
        }
    }

    /// Compile with a trailing catch-all so every point is classified.
    pub fn with_catch_all(uses: UsedAxes, max_rectangles: usize) -> Self {
        Self {
            catch_all: Some(uses),
            max_rectangles,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECTANGLES)
    }
}

/// Cross-product expansion of one rule into elementary rectangles.
pub fn expand_rule(rule: &UniversalPermission) -> Vec<UniversalPermissionDetails> {
    let badge_ids = rule.badge_id_values();
    let timeline_times = rule.timeline_time_values();
    let transfer_times = rule.transfer_time_values();
    let ownership_times = rule.ownership_time_values();
    let to_list = rule.to_list_value();
    let from_list = rule.from_list_value();
    let initiated_by_list = rule.initiated_by_list_value();
    let approval_id_list = rule.approval_id_list_value();

    let mut expanded = Vec::new();
    for badge_id in &badge_ids {
        for timeline_time in &timeline_times {
            for transfer_time in &transfer_times {
                for ownership_time in &ownership_times {
                    expanded.push(UniversalPermissionDetails {
                        timeline_time: *timeline_time,
                        badge_id: *badge_id,
                        transfer_time: *transfer_time,
                        ownership_time: *ownership_time,
                        to_list: to_list.clone(),
                        from_list: from_list.clone(),
                        initiated_by_list: initiated_by_list.clone(),
                        approval_id_list: approval_id_list.clone(),
                        permanently_permitted_times: rule.permanently_permitted_times.clone(),
                        permanently_forbidden_times: rule.permanently_forbidden_times.clone(),
                        payload: rule.payload.clone(),
                    });
                }
            }
        }
    }
    expanded
}

/// Flatten `rules` into a disjoint partition, earliest rule winning.
pub fn compile_first_match(
    rules: &[UniversalPermission],
    options: &CompileOptions,
) -> Result<Vec<UniversalPermissionDetails>, PermissionError> {
    let catch_all = options.catch_all.map(UniversalPermission::catch_all);
    let max = options.max_rectangles;

    let mut handled: Vec<UniversalPermissionDetails> = Vec::new();
    let mut expanded_total = 0usize;

    for rule in rules.iter().chain(catch_all.iter()) {
        let expansion = rule
            .expansion_size()
            .ok_or(PermissionError::TooManyRectangles {
                count: usize::MAX,
                max,
            })?;
        expanded_total = expanded_total.saturating_add(expansion);
        if expanded_total > max {
            warn!(expanded_total, max, "Permission expansion over budget");
            return Err(PermissionError::TooManyRectangles {
                count: expanded_total,
                max,
            });
        }

        for detail in expand_rule(rule) {
            let mut pieces = vec![detail];
            for previous in &handled {
                pieces = remove_overlap_from_values(previous, pieces).0;
                if pieces.is_empty() {
                    break;
                }
            }
            handled.extend(pieces);

            if handled.len() > max {
                warn!(count = handled.len(), max, "Flattened permissions over budget");
                return Err(PermissionError::TooManyRectangles {
                    count: handled.len(),
                    max,
                });
            }
        }
    }

    debug_assert!(invariant_pairwise_disjoint(&handled));
    debug!(
        rules = rules.len(),
        catch_all = options.catch_all.is_some(),
        rectangles = handled.len(),
        "Compiled first-match permissions"
    );

    Ok(handled)
}
