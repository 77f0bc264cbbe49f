//! Rule builders shared by the integration flows and the benchmarks.

use bc_permissions::{CollectionApprovalPermission, UniversalPermission, UsedAxes};
use shared_types::{Timestamp, UintRange};

/// 2024-01-01T00:00:00Z in ms.
pub const JAN_2024: Timestamp = 1_704_067_200_000;
/// 2024-02-01T00:00:00Z in ms.
pub const FEB_2024: Timestamp = 1_706_745_600_000;
/// 2024-01-15T00:00:00Z in ms.
pub const MID_JAN_2024: Timestamp = 1_705_276_800_000;

pub fn range(start: u64, end: u64) -> UintRange {
    UintRange { start, end }
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collection approval rule over every address, all transfer and
/// ownership times, for `badge_ids`.
pub fn approval_for_badges(badge_ids: Vec<UintRange>) -> CollectionApprovalPermission {
    CollectionApprovalPermission {
        transfer_times: vec![UintRange::full()],
        badge_ids,
        ownership_times: vec![UintRange::full()],
        ..Default::default()
    }
}

/// `count` balances rules over disjoint badge and ownership-time stripes,
/// alternating permitted and forbidden decisions.
pub fn striped_balances_rules(count: u64, stripes: u64) -> Vec<UniversalPermission> {
    (0..count)
        .map(|i| {
            let badge_ids: Vec<UintRange> = (0..stripes)
                .map(|s| range(s * 100 + i + 1, s * 100 + i + 10))
                .collect();
            let decision = vec![range(i * 10 + 1, i * 10 + 5)];
            let mut rule = UniversalPermission {
                badge_ids,
                ownership_times: vec![range(i + 1, i + 1_000)],
                ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
            };
            if i % 2 == 0 {
                rule.permanently_permitted_times = decision;
            } else {
                rule.permanently_forbidden_times = decision;
            }
            rule
        })
        .collect()
}

/// `count` balances rules of `badges_per_rule` isolated single badge ids,
/// each rule pinned to its own ownership time.
pub fn single_badge_rules(count: u64, badges_per_rule: u64) -> Vec<UniversalPermission> {
    (0..count)
        .map(|i| UniversalPermission {
            badge_ids: (0..badges_per_rule)
                .map(|k| UintRange::single(2 * (i * badges_per_rule + k) + 1))
                .collect(),
            ownership_times: vec![UintRange::single(i + 1)],
            permanently_forbidden_times: vec![range(1, 100)],
            ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
        })
        .collect()
}
