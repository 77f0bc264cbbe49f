//! Permission algorithms
//!
//! - `overlap`: intersection and remainder of rectangles, all-pairs diff
//! - `first_match`: earliest-rule-wins flattening with an expansion budget
//! - `merge`: compaction of flattened rectangles back into rules
//! - `update_validation`: append-only check of permanence decisions
//! - `temporal`: forbidden-time check for concrete points
//! - `timeline_diff`: points touched by a timeline value change

pub mod first_match;
pub mod merge;
pub mod overlap;
pub mod temporal;
pub mod timeline_diff;
pub mod update_validation;

pub use first_match::{compile_first_match, expand_rule, CompileOptions, DEFAULT_MAX_RECTANGLES};
pub use merge::{merge_details, MergeMode};
pub use overlap::{diff_all, remove_overlap, remove_overlap_from_values, Overlap, OverlapDiff};
pub use temporal::{check_not_forbidden, check_not_forbidden_for_all_overlaps};
pub use timeline_diff::{timeline_updates, TimelineValue};
pub use update_validation::{validate_universal_permission_update, DEFAULT_MAX_COMPARISONS};
