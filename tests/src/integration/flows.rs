//! # Integration Test Flows
//!
//! End-to-end permission decisions as the collection and user layers make
//! them: lift typed rules, flatten, then validate a revision or check
//! concrete transfers at a time.
//!
//! ## Flows Tested:
//!
//! 1. **Transfer check**: collection approval lock over a time window
//! 2. **Update validation**: add a decision, then try to revert it
//! 3. **Priority**: earlier rules win on overlap
//! 4. **Timeline updates**: changed manager values checked against a lock
//! 5. **Compaction**: merged output keeps every decision

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        approval_for_badges, init_tracing, range, single_badge_rules, striped_balances_rules,
        FEB_2024, JAN_2024, MID_JAN_2024,
    };
    use bc_permissions::{
        compile_first_match, BalancesActionPermission, CollectionApprovalPermission,
        CompileOptions, EngineConfig, FixedTimeSource, PermissionCheck, PermissionEngineApi,
        PermissionError, PermissionPayload, PermissionService, StandalonePermission,
        TimedUpdatePermission, TimelineValue, UniversalPermission, UsedAxes,
        UserIncomingApprovalPermission,
    };
    use shared_types::{invert_ranges, sort_and_merge, AddressList, UintRange, MAX_UINT};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service_at(time: u64) -> PermissionService<FixedTimeSource> {
        init_tracing();
        PermissionService::with_clock(EngineConfig::default(), FixedTimeSource::new(time))
    }

    fn badge_50_transfer(at: u64) -> PermissionCheck {
        PermissionCheck::new()
            .badge_id(50)
            .transfer_time(at)
            .from("bb1alice")
            .to("bb1bob")
            .initiated_by("bb1alice")
    }

    fn january_lock() -> Vec<CollectionApprovalPermission> {
        vec![CollectionApprovalPermission {
            transfer_times: vec![range(JAN_2024, FEB_2024)],
            permanently_forbidden_times: vec![range(JAN_2024, FEB_2024)],
            ..approval_for_badges(vec![range(1, 100)])
        }]
    }

    // =============================================================================
    // 1. TRANSFER CHECK
    // =============================================================================

    #[test]
    fn test_transfer_inside_forbidden_window_is_blocked() {
        let service = service_at(MID_JAN_2024);
        let rules = january_lock();

        let err = service
            .check_projection(&[badge_50_transfer(MID_JAN_2024)], &rules, None)
            .unwrap_err();
        match err {
            PermissionError::Forbidden { time, window, .. } => {
                assert_eq!(time, MID_JAN_2024);
                assert_eq!(window, range(JAN_2024, FEB_2024));
            }
            other => panic!("expected Forbidden, got {other}"),
        }
    }

    #[test]
    fn test_transfer_outside_window_passes() {
        let service = service_at(FEB_2024 + 1);
        let rules = january_lock();

        assert!(service
            .check_projection(&[badge_50_transfer(FEB_2024 + 1)], &rules, None)
            .is_ok());
        // badge outside the locked ids, inside the window
        let badge_500 = PermissionCheck::new()
            .badge_id(500)
            .transfer_time(MID_JAN_2024);
        assert!(service
            .check_projection(&[badge_500], &rules, Some(MID_JAN_2024))
            .is_ok());
    }

    #[test]
    fn test_forbidden_error_renders_context() {
        let err = CollectionApprovalPermission::check(
            &[badge_50_transfer(MID_JAN_2024)],
            &january_lock(),
            Some(MID_JAN_2024),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("badge ids: 1-100"));
        assert!(message.contains(&MID_JAN_2024.to_string()));
        assert!(message.ends_with("(point 0)"));
    }

    // =============================================================================
    // 2. UPDATE VALIDATION
    // =============================================================================

    #[test]
    fn test_add_then_revert_decision() {
        let service = service_at(0);
        let undecided: Vec<BalancesActionPermission> = vec![];
        let locked = vec![BalancesActionPermission {
            badge_ids: vec![UintRange::single(5)],
            ownership_times: vec![UintRange::full()],
            permanently_permitted_times: vec![UintRange::full()],
            permanently_forbidden_times: vec![],
        }];

        assert!(service.validate_projection_update(&undecided, &locked).is_ok());
        let err = service
            .validate_projection_update(&locked, &undecided)
            .unwrap_err();
        match err {
            PermissionError::DecisionReversed {
                unset_permitted,
                unset_forbidden,
                ..
            } => {
                assert_eq!(unset_permitted, vec![UintRange::full()]);
                assert!(unset_forbidden.is_empty());
            }
            other => panic!("expected DecisionReversed, got {other}"),
        }
    }

    #[test]
    fn test_identical_revision_passes() {
        let rules = january_lock();
        assert!(CollectionApprovalPermission::validate_update(&rules, &rules).is_ok());
    }

    #[test]
    fn test_narrowing_locked_badges_fails() {
        let old = january_lock();
        let new = vec![CollectionApprovalPermission {
            transfer_times: vec![range(JAN_2024, FEB_2024)],
            permanently_forbidden_times: vec![range(JAN_2024, FEB_2024)],
            ..approval_for_badges(vec![range(1, 50)])
        }];
        assert!(matches!(
            CollectionApprovalPermission::validate_update(&old, &new),
            Err(PermissionError::DecisionReversed { .. })
        ));
    }

    #[test]
    fn test_reordering_overlapping_rules_can_flip_decisions() {
        let permit = CollectionApprovalPermission {
            permanently_permitted_times: vec![range(1, 10)],
            ..approval_for_badges(vec![range(1, 100)])
        };
        let forbid = CollectionApprovalPermission {
            permanently_forbidden_times: vec![range(1, 10)],
            ..approval_for_badges(vec![range(1, 100)])
        };

        let old = vec![permit.clone(), forbid.clone()];
        let new = vec![forbid, permit];
        assert!(CollectionApprovalPermission::validate_update(&old, &old).is_ok());
        assert!(CollectionApprovalPermission::validate_update(&old, &new).is_err());
    }

    #[test]
    fn test_malformed_rule_reports_its_index() {
        let bad = vec![
            approval_for_badges(vec![range(1, 10)]),
            approval_for_badges(vec![range(5, 3)]),
        ];
        let err = CollectionApprovalPermission::validate_update(&[], &bad).unwrap_err();
        assert!(matches!(err, PermissionError::InRule { index: 1, .. }));
        assert!(matches!(err.root(), PermissionError::Range(_)));
    }

    #[test]
    fn test_user_incoming_lock_flow() {
        let service = service_at(MID_JAN_2024);
        let locked = vec![UserIncomingApprovalPermission {
            from_list: AddressList::whitelist(["bb1mallory"]),
            transfer_times: vec![UintRange::full()],
            badge_ids: vec![UintRange::full()],
            ownership_times: vec![UintRange::full()],
            permanently_forbidden_times: vec![UintRange::full()],
            ..Default::default()
        }];

        assert!(service.validate_user_update("bb1bob", &[], &locked).is_ok());
        assert!(service.validate_user_update("bb1bob", &locked, &[]).is_err());

        let from_mallory = PermissionCheck::new().from("bb1mallory").badge_id(1);
        let from_alice = PermissionCheck::new().from("bb1alice").badge_id(1);
        assert!(service
            .check_user("bb1bob", &[from_mallory], &locked, None)
            .is_err());
        assert!(service
            .check_user("bb1bob", &[from_alice], &locked, None)
            .is_ok());
    }

    // =============================================================================
    // 3. PRIORITY
    // =============================================================================

    #[test]
    fn test_earlier_rule_wins() {
        let rule = |permitted: Vec<UintRange>, forbidden: Vec<UintRange>| UniversalPermission {
            badge_ids: vec![range(1, 100)],
            ownership_times: vec![UintRange::full()],
            permanently_permitted_times: permitted,
            permanently_forbidden_times: forbidden,
            ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
        };
        let rules = vec![rule(vec![range(1, 10)], vec![]), rule(vec![], vec![range(1, 10)])];

        let flat = compile_first_match(&rules, &CompileOptions::default()).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].permanently_permitted_times, vec![range(1, 10)]);
        assert!(flat[0].permanently_forbidden_times.is_empty());
    }

    // =============================================================================
    // 4. TIMELINE UPDATES
    // =============================================================================

    #[test]
    fn test_manager_change_after_lock_is_blocked() {
        let service = service_at(MID_JAN_2024);
        let manager = |address: &str| PermissionPayload::Manager(address.to_string());
        let old = vec![TimelineValue::new(vec![UintRange::full()], manager("bb1alice"))];
        let new = vec![
            TimelineValue::new(vec![range(1, FEB_2024 - 1)], manager("bb1alice")),
            TimelineValue::new(vec![range(FEB_2024, MAX_UINT)], manager("bb1bob")),
        ];

        let updates = service
            .timeline_updates(&old, &new, UsedAxes::TIMED_UPDATE)
            .unwrap();
        let points: Vec<PermissionCheck> =
            updates.iter().map(PermissionCheck::from_details).collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timeline_times, Some(range(FEB_2024, MAX_UINT)));

        // manager is frozen for future timeline times only
        let can_update_manager = vec![TimedUpdatePermission {
            timeline_times: vec![range(FEB_2024, MAX_UINT)],
            permanently_permitted_times: vec![],
            permanently_forbidden_times: vec![UintRange::full()],
        }];
        assert!(service
            .check_projection(&points, &can_update_manager, None)
            .is_err());

        let past_only = vec![TimedUpdatePermission {
            timeline_times: vec![range(1, JAN_2024)],
            ..can_update_manager[0].clone()
        }];
        assert!(service.check_projection(&points, &past_only, None).is_ok());
    }

    // =============================================================================
    // 5. COMPACTION
    // =============================================================================

    #[test]
    fn test_merged_rules_keep_every_decision() {
        let service = service_at(0);
        let rules = striped_balances_rules(3, 2);

        let flat = service
            .compile(&rules, Some(UsedAxes::BALANCES_ACTION))
            .unwrap();
        let merged = service.merge(&flat);
        assert!(merged.len() <= flat.len());

        // equivalent sets accept the revision in both directions
        assert!(service
            .validate_update(&rules, &merged, UsedAxes::BALANCES_ACTION)
            .is_ok());
        assert!(service
            .validate_update(&merged, &rules, UsedAxes::BALANCES_ACTION)
            .is_ok());
    }

    #[test]
    fn test_adversarial_expansion_is_rejected() {
        let service = PermissionService::with_config(EngineConfig {
            max_expanded_rectangles: 500,
            ..EngineConfig::default()
        });
        let stripes: Vec<UintRange> = (0..30).map(|i| range(i * 10 + 1, i * 10 + 5)).collect();
        let rule = UniversalPermission {
            badge_ids: stripes.clone(),
            ownership_times: stripes,
            ..UniversalPermission::new(UsedAxes::BALANCES_ACTION)
        };

        assert!(matches!(
            service.compile(&[rule], None),
            Err(PermissionError::TooManyRectangles { count: 900, max: 500 })
        ));
    }

    #[test]
    fn test_fragmented_revision_within_comparison_budget() {
        let service = service_at(0);
        let rules = single_badge_rules(20, 20);

        let flat = service
            .compile(&rules, Some(UsedAxes::BALANCES_ACTION))
            .unwrap();
        assert!(flat.len() > 400);
        assert!(service
            .validate_update(&rules, &rules, UsedAxes::BALANCES_ACTION)
            .is_ok());
        assert!(matches!(
            service.validate_update(&rules, &rules[1..], UsedAxes::BALANCES_ACTION),
            Err(PermissionError::DecisionReversed { .. })
        ));
    }

    #[test]
    fn test_fragmented_revision_over_comparison_budget_is_rejected() {
        let service = PermissionService::with_config(EngineConfig {
            max_pair_comparisons: 10_000,
            ..EngineConfig::default()
        });
        let rules = single_badge_rules(20, 20);

        assert!(matches!(
            service.validate_update(&rules, &rules, UsedAxes::BALANCES_ACTION),
            Err(PermissionError::TooManyComparisons { max: 10_000, .. })
        ));
    }

    // =============================================================================
    // RANGE ALGEBRA
    // =============================================================================

    #[test]
    fn test_range_concrete_cases() {
        assert_eq!(
            invert_ranges(&[range(1, 10)], UintRange::full()),
            vec![range(11, MAX_UINT)]
        );

        let merged = sort_and_merge(&[range(11, 20), range(1, 10)]);
        assert_eq!(merged, vec![range(1, 20)]);
        assert_eq!(merged[0].size(), 20);
    }
}
