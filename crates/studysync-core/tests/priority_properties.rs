//! Property tests for the priority engine.
//!
//! These tests check the classifier over arbitrary dates, marks and effort
//! rather than hand-picked cases.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use studysync_core::priority::{
    compute_priority, days_until_due, describe_dueness, PriorityTier,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

prop_compose! {
    fn any_date()(offset in -3650i64..3650) -> NaiveDate {
        base_date() + Duration::days(offset)
    }
}

proptest! {
    #[test]
    fn tier_is_always_one_of_three(
        due in any_date(),
        today in any_date(),
        marks in 0u32..1000,
        hours in 0.0f64..200.0,
        graded in any::<bool>(),
    ) {
        let tier = compute_priority(due, marks, hours, graded, today);
        prop_assert!(matches!(tier, PriorityTier::High | PriorityTier::Medium | PriorityTier::Low));
    }

    #[test]
    fn ungraded_work_is_low(
        due in any_date(),
        today in any_date(),
        marks in 0u32..1000,
        hours in 0.0f64..200.0,
    ) {
        prop_assert_eq!(compute_priority(due, marks, hours, false, today), PriorityTier::Low);
    }

    #[test]
    fn sooner_deadline_never_lowers_tier(
        today in any_date(),
        near in -30i64..60,
        gap in 0i64..60,
        marks in 0u32..200,
        hours in 0.0f64..30.0,
    ) {
        let sooner = today + Duration::days(near);
        let later = sooner + Duration::days(gap);
        let sooner_tier = compute_priority(sooner, marks, hours, true, today);
        let later_tier = compute_priority(later, marks, hours, true, today);
        prop_assert!(sooner_tier >= later_tier);
    }

    #[test]
    fn classification_is_deterministic(
        due in any_date(),
        today in any_date(),
        marks in 0u32..200,
        hours in 0.0f64..30.0,
    ) {
        prop_assert_eq!(
            compute_priority(due, marks, hours, true, today),
            compute_priority(due, marks, hours, true, today)
        );
    }

    #[test]
    fn same_day_is_zero_offset(day in any_date()) {
        prop_assert_eq!(days_until_due(day, day), 0);
        prop_assert_eq!(describe_dueness(0).to_string(), "Due today!");
    }

    #[test]
    fn dueness_mentions_the_day_count(days in 1i64..400) {
        let ahead = describe_dueness(days).to_string();
        let behind = describe_dueness(-days).to_string();
        prop_assert!(ahead.contains(&days.to_string()));
        prop_assert!(ahead.contains("remaining"));
        prop_assert!(behind.contains(&days.to_string()));
        prop_assert!(behind.contains("overdue"));
    }
}

#[test]
fn documented_boundary_cases() {
    let today = base_date();
    let due = |days: i64| today + Duration::days(days);
    assert_eq!(compute_priority(due(2), 100, 15.0, true, today), PriorityTier::High);
    assert_eq!(compute_priority(due(10), 40, 5.0, true, today), PriorityTier::Low);
    assert_eq!(compute_priority(due(5), 60, 8.0, true, today), PriorityTier::High);
    assert_eq!(compute_priority(due(11), 10, 1.0, false, today), PriorityTier::Low);
}
