//! Property tests for the selector, suppression window and resolver

use proptest::prelude::*;

use mendbot::actions::catalog::ActionDescriptor;
use mendbot::actions::resolver::resolve;
use mendbot::core::types::MemberId;
use mendbot::engine::suppression::{SuppressReason, SuppressionController};
use mendbot::engine::target;
use mendbot::roster::{Member, Roster};

fn roster_from(pairs: Vec<(i32, i32)>) -> Roster {
    let members = pairs
        .into_iter()
        .enumerate()
        .map(|(i, (hp, max))| Member {
            id: MemberId::new(),
            name: format!("M{}", i),
            current_hp: hp,
            max_hp: max,
            is_self: i == 0,
        })
        .collect();
    Roster::new(members)
}

proptest! {
    #[test]
    fn test_display_mode_returns_global_minimum(
        pairs in prop::collection::vec((0..150i32, 1..150i32), 1..8)
    ) {
        let roster = roster_from(pairs);
        let lowest = target::lowest(&roster).unwrap();
        let lowest_fraction = lowest.health_fraction().unwrap();

        for member in roster.members() {
            prop_assert!(member.health_fraction().unwrap() >= lowest_fraction);
        }

        // First member achieving the minimum wins the tie
        let first = roster
            .members()
            .iter()
            .find(|m| m.health_fraction() == Some(lowest_fraction))
            .unwrap();
        prop_assert_eq!(first.id, lowest.id);
    }

    #[test]
    fn test_auto_candidate_is_always_below_threshold(
        pairs in prop::collection::vec((0..150i32, 0..150i32), 0..8),
        threshold in 0.0f64..1.0
    ) {
        let roster = roster_from(pairs);
        if let Some(member) = target::actionable(&roster, threshold) {
            prop_assert!(member.health_fraction().unwrap() < threshold);
            prop_assert!(member.current_hp > 0);
        }
    }

    #[test]
    fn test_zero_threshold_never_yields_a_candidate(
        pairs in prop::collection::vec((0..150i32, 1..150i32), 0..8)
    ) {
        let roster = roster_from(pairs);
        prop_assert!(target::actionable(&roster, 0.0).is_none());
    }

    #[test]
    fn test_suppression_window_only_extends(
        triggers in prop::collection::vec((0.0f64..100.0, 0.01f64..10.0), 1..20)
    ) {
        let mut controller = SuppressionController::new(0.0, 1.0);
        let mut previous = controller.resume_at();

        for (now, grace) in triggers {
            controller.trigger(SuppressReason::RosterChanged, now, grace);
            prop_assert!(controller.resume_at() >= previous);
            previous = controller.resume_at();
        }
    }

    #[test]
    fn test_immediate_trigger_resets_to_now(
        grace in 0.01f64..10.0,
        now in 0.0f64..100.0
    ) {
        let mut controller = SuppressionController::new(0.0, grace);
        controller.trigger(SuppressReason::AssistEnabled, now, 0.0);
        prop_assert_eq!(controller.resume_at(), now);
        prop_assert!(!controller.is_suppressed(now));
    }

    #[test]
    fn test_resolution_is_idempotent(
        names in prop::collection::hash_set("[a-z]{3,10}( [a-z]{3,10})?", 1..8),
        request in "[a-z]{1,12}"
    ) {
        let pool: Vec<ActionDescriptor> =
            names.iter().map(|n| ActionDescriptor::new(n.as_str())).collect();

        if let Some(found) = resolve(&request, &pool, &[], false) {
            let again = resolve(&found.name, &pool, &[], false);
            prop_assert_eq!(again, Some(found));
        }
    }
}
