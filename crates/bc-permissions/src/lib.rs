//! # BC Permissions: Universal Permission Engine
//!
//! Multi-dimensional interval and address-set algebra deciding whether a
//! collection's or user's permission update is a legal, append-only
//! evolution of the previous state, and whether a concrete transfer or
//! update is authorized at a point in time.
//!
//! ## Architecture
//!
//! - **Domain**: 8-axis rules and rectangles, axis presets, check points, errors, invariants
//! - **Algorithms**: overlap engine, first-match compiler, merge pass, update validator,
//!   temporal checker, timeline diff
//! - **Projections**: typed permission shapes lifting into the universal form
//! - **Ports**: Inbound (PermissionEngineApi) and Outbound (TimeSource)
//! - **Application**: Service wiring config and clock
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Canonical range lists | `check_not_forbidden`, `merge_details` (debug assert) |
//! | INVARIANT-2 | Permanence exclusivity | `UniversalPermission::validate` |
//! | INVARIANT-3 | Flattened partition | `compile_first_match` (debug assert) |
//! | INVARIANT-4 | Append-only decisions | `validate_universal_permission_update` |
//!
//! ## Pipeline
//!
//! ```text
//! typed rules ──to_universal──→ rules ──compile_first_match──→ rectangles
//!                                                      │
//!             ┌────────────────────────────────────────┤
//!             ↓                                        ↓
//!   validate_universal_permission_update   check_not_forbidden_for_all_overlaps
//!        (old vs new, catch-all)                  (points at a time)
//! ```

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod projections;

pub use algorithms::{
    compile_first_match, diff_all, merge_details, remove_overlap, timeline_updates,
    validate_universal_permission_update, CompileOptions, MergeMode, Overlap, OverlapDiff,
    TimelineValue, DEFAULT_MAX_COMPARISONS, DEFAULT_MAX_RECTANGLES,
};
pub use application::service::PermissionService;
pub use config::EngineConfig;
pub use domain::*;
pub use ports::inbound::PermissionEngineApi;
pub use ports::outbound::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use projections::{
    ActionPermission, BalancesActionPermission, CollectionApprovalPermission,
    PermissionProjection, StandalonePermission, TimedUpdatePermission,
    TimedUpdateWithBadgeIdsPermission, UserApprovalPermission, UserIncomingApprovalPermission,
    UserOutgoingApprovalPermission,
};
