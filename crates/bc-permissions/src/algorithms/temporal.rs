//! Temporal Checker
//!
//! Decides whether concrete points may act at a given time. A point fails
//! only when its covering rectangle permanently forbids that time; permitted
//! or undecided times pass.

use super::overlap::rectangles_overlap;
use crate::domain::{invariant_sorted_and_merged, PermissionError, UniversalPermissionDetails};
use shared_types::{search_ranges, sort_and_merge, Timestamp};
use tracing::{debug, warn};

/// Fail if `time` is inside the rectangle's permanently forbidden times.
pub fn check_not_forbidden(
    detail: &UniversalPermissionDetails,
    time: Timestamp,
) -> Result<(), PermissionError> {
    let forbidden = sort_and_merge(&detail.permanently_forbidden_times);
    debug_assert!(invariant_sorted_and_merged(&forbidden));
    match search_ranges(&forbidden, time) {
        Some(index) => {
            let window = forbidden[index];
            warn!(time, %detail, %window, "Permission forbidden");
            Err(PermissionError::Forbidden {
                time,
                window,
                detail: Box::new(detail.clone()),
                point: None,
            })
        }
        None => Ok(()),
    }
}

/// Check every point against every rectangle of a flattened set.
///
/// A point is only checked against the rectangles it overlaps. The first
/// failure is returned, tagged with the index of the failing point.
pub fn check_not_forbidden_for_all_overlaps(
    flattened: &[UniversalPermissionDetails],
    points: &[UniversalPermissionDetails],
    time: Timestamp,
) -> Result<(), PermissionError> {
    for (index, point) in points.iter().enumerate() {
        for detail in flattened {
            if rectangles_overlap(detail, point) {
                check_not_forbidden(detail, time).map_err(|err| match err {
                    PermissionError::Forbidden {
                        time,
                        window,
                        detail,
                        ..
                    } => PermissionError::Forbidden {
                        time,
                        window,
                        detail,
                        point: Some(index),
                    },
                    other => other,
                })?;
            }
        }
    }

    debug!(
        points = points.len(),
        rectangles = flattened.len(),
        time,
        "Permission check passed"
    );
    Ok(())
}
