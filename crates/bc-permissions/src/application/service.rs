//! Permission Engine Service
//!
//! Main service implementing PermissionEngineApi. Wires the engine config
//! (expansion budget, merge mode) and the clock into the pure algorithms.

use crate::algorithms::{
    compile_first_match, diff_all, merge_details, timeline_updates, OverlapDiff, TimelineValue,
};
use crate::config::EngineConfig;
use crate::domain::{
    PermissionCheck, PermissionError, UniversalPermission, UniversalPermissionDetails, UsedAxes,
};
use crate::ports::inbound::PermissionEngineApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use crate::projections::{
    check_for_user, check_projection, check_universal, validate_projection_update,
    validate_universal_update, validate_update_for_user, StandalonePermission,
    UserApprovalPermission,
};
use shared_types::Timestamp;
use tracing::{info, warn};

/// Permission Engine Service
///
/// Holds no permission state; every call compiles the rules it is given.
pub struct PermissionService<T: TimeSource = SystemTimeSource> {
    config: EngineConfig,
    clock: T,
}

impl PermissionService<SystemTimeSource> {
    /// Create a new service with default config
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            clock: SystemTimeSource,
        }
    }
}

impl Default for PermissionService<SystemTimeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> PermissionService<T> {
    pub fn with_clock(config: EngineConfig, clock: T) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn resolve_time(&self, time: Option<Timestamp>) -> Timestamp {
        time.unwrap_or_else(|| self.clock.now())
    }

    /// Validate a typed `old -> new` revision.
    pub fn validate_projection_update<P: StandalonePermission>(
        &self,
        old: &[P],
        new: &[P],
    ) -> Result<(), PermissionError> {
        let result = validate_projection_update(old, new, &self.config);
        log_update(P::NAME, old.len(), new.len(), &result);
        result
    }

    /// Check points against typed rules.
    pub fn check_projection<P: StandalonePermission>(
        &self,
        points: &[PermissionCheck],
        rules: &[P],
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = self.resolve_time(time);
        let result = check_projection(points, rules, time, &self.config);
        log_check(P::NAME, points.len(), time, &result);
        result
    }

    /// Validate a user-level approval revision for `user`.
    pub fn validate_user_update<P: UserApprovalPermission>(
        &self,
        user: &str,
        old: &[P],
        new: &[P],
    ) -> Result<(), PermissionError> {
        let result = validate_update_for_user(user, old, new, &self.config);
        log_update(P::NAME, old.len(), new.len(), &result);
        result
    }

    /// Check points against user-level approval rules for `user`.
    pub fn check_user<P: UserApprovalPermission>(
        &self,
        user: &str,
        points: &[PermissionCheck],
        rules: &[P],
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = self.resolve_time(time);
        let result = check_for_user(user, points, rules, time, &self.config);
        log_check(P::NAME, points.len(), time, &result);
        result
    }
}

fn log_update(kind: &str, old: usize, new: usize, result: &Result<(), PermissionError>) {
    match result {
        Ok(()) => info!(kind, old, new, "Permission update accepted"),
        Err(error) => warn!(kind, old, new, %error, "Permission update rejected"),
    }
}

fn log_check(kind: &str, points: usize, time: Timestamp, result: &Result<(), PermissionError>) {
    match result {
        Ok(()) => info!(kind, points, time, "Permission check passed"),
        Err(error) => warn!(kind, points, time, %error, "Permission check failed"),
    }
}

impl<T: TimeSource> PermissionEngineApi for PermissionService<T> {
    fn compile(
        &self,
        rules: &[UniversalPermission],
        catch_all: Option<UsedAxes>,
    ) -> Result<Vec<UniversalPermissionDetails>, PermissionError> {
        let options = match catch_all {
            Some(uses) => self.config.compile_options_with_catch_all(uses),
            None => self.config.compile_options(),
        };
        compile_first_match(rules, &options)
    }

    fn diff(
        &self,
        first: &[UniversalPermissionDetails],
        second: &[UniversalPermissionDetails],
    ) -> OverlapDiff {
        diff_all(first, second)
    }

    fn merge(&self, details: &[UniversalPermissionDetails]) -> Vec<UniversalPermission> {
        merge_details(details, self.config.merge_mode())
    }

    fn validate_update(
        &self,
        old: &[UniversalPermission],
        new: &[UniversalPermission],
        uses: UsedAxes,
    ) -> Result<(), PermissionError> {
        let result = validate_universal_update("UniversalPermission", old, new, uses, &self.config);
        log_update("UniversalPermission", old.len(), new.len(), &result);
        result
    }

    fn check(
        &self,
        points: &[PermissionCheck],
        rules: &[UniversalPermission],
        uses: UsedAxes,
        time: Option<Timestamp>,
    ) -> Result<(), PermissionError> {
        let time = self.resolve_time(time);
        let result = check_universal(points, rules, uses, time, &self.config);
        log_check("UniversalPermission", points.len(), time, &result);
        result
    }

    fn timeline_updates(
        &self,
        old: &[TimelineValue],
        new: &[TimelineValue],
        uses: UsedAxes,
    ) -> Result<Vec<UniversalPermissionDetails>, PermissionError> {
        timeline_updates(old, new, uses, self.config.max_expanded_rectangles)
    }
}
