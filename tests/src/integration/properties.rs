//! # Permission Algebra Properties
//!
//! Generated rule sets exercising the engine end to end:
//! - a revision identical to the old rules always passes
//! - appending a lower-priority rule never revokes a decision
//! - merging a compiled set does not change what it decides

#[cfg(test)]
mod tests {
    use crate::fixtures::range;
    use bc_permissions::{
        compile_first_match, merge_details, validate_universal_permission_update,
        CompileOptions, MergeMode, PermissionError, UniversalPermission,
        UniversalPermissionDetails, UsedAxes, DEFAULT_MAX_COMPARISONS,
    };
    use proptest::prelude::*;

    fn arb_rule() -> impl Strategy<Value = UniversalPermission> {
        (1u64..50, 0u64..20, 1u64..50, 0u64..20, 0u8..3).prop_map(
            |(badge_start, badge_len, time_start, time_len, decision)| {
                let times = vec![range(time_start, time_start + time_len)];
                let mut rule = UniversalPermission {
                    badge_ids: vec![range(badge_start, badge_start + badge_len)],
                    ownership_times: times.clone(),
                    ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
                };
                match decision {
                    0 => rule.permanently_permitted_times = times,
                    1 => rule.permanently_forbidden_times = times,
                    _ => {}
                }
                rule
            },
        )
    }

    fn options() -> CompileOptions {
        CompileOptions::with_catch_all(UsedAxes::BALANCES_ACTION, 10_000)
    }

    fn validate(
        old: &[UniversalPermissionDetails],
        new: &[UniversalPermissionDetails],
    ) -> Result<(), PermissionError> {
        validate_universal_permission_update(old, new, DEFAULT_MAX_COMPARISONS)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn identical_revision_passes(rules in prop::collection::vec(arb_rule(), 0..5)) {
            let flat = compile_first_match(&rules, &options()).unwrap();
            prop_assert!(validate(&flat, &flat).is_ok());
        }

        #[test]
        fn appending_a_rule_never_revokes(
            rules in prop::collection::vec(arb_rule(), 0..5),
            extra in arb_rule(),
        ) {
            let old = compile_first_match(&rules, &options()).unwrap();
            let mut extended = rules.clone();
            extended.push(extra);
            let new = compile_first_match(&extended, &options()).unwrap();
            prop_assert!(validate(&old, &new).is_ok());
        }

        #[test]
        fn merge_preserves_decisions(rules in prop::collection::vec(arb_rule(), 0..4)) {
            let flat = compile_first_match(&rules, &options()).unwrap();
            let merged = merge_details(&flat, MergeMode::RangesOnly);
            prop_assert!(merged.len() <= flat.len());

            let recompiled = compile_first_match(&merged, &options()).unwrap();
            prop_assert!(validate(&flat, &recompiled).is_ok());
            prop_assert!(validate(&recompiled, &flat).is_ok());
        }
    }
}
