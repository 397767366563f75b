//! Customer profile building: aggregation, velocity, rolling trend, modes.

mod common;

use cardwatch_core::profile::{calculate_rolling_trend, ProfileBuilder};
use cardwatch_core::transaction::Transaction;
use common::txn;

/// Sum, mean, max, and count per card.
#[test]
fn spending_aggregates_per_card() {
    let txns = vec![
        txn(1, "2020-01-01 10:00:00", 10.0, "home", false),
        txn(1, "2020-01-01 11:00:00", 20.0, "home", false),
        txn(1, "2020-01-02 09:00:00", 30.0, "travel", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    assert_eq!(profiles.len(), 1);
    let p = &profiles[0];
    assert_eq!(p.cc_num, 1);
    assert!((p.total_spending - 60.0).abs() < 1e-9);
    assert!((p.avg_transaction - 20.0).abs() < 1e-9);
    assert!((p.max_transaction - 30.0).abs() < 1e-9);
    assert_eq!(p.total_trans_count, 3);
}

/// Ten transactions across two calendar days: days_active = 2 and
/// daily_velocity = 5.0.
#[test]
fn velocity_counts_distinct_days() {
    let mut txns = Vec::new();
    for i in 0..5 {
        txns.push(txn(7, &format!("2020-03-01 0{i}:15:00"), 12.0, "home", false));
        txns.push(txn(7, &format!("2020-03-02 0{i}:45:00"), 12.0, "home", false));
    }
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].days_active, 2);
    assert!((profiles[0].daily_velocity - 5.0).abs() < 1e-9);
}

/// The recent spending trend is the mean of the last `window` amounts
/// in timestamp order, regardless of input order.
#[test]
fn rolling_trend_uses_timestamp_order() {
    // Deliberately scrambled input: timestamps put the 100.0 last.
    let txns = vec![
        txn(3, "2020-01-03 10:00:00", 10.0, "home", false),
        txn(3, "2020-01-05 10:00:00", 100.0, "home", false),
        txn(3, "2020-01-01 10:00:00", 10.0, "home", false),
        txn(3, "2020-01-04 10:00:00", 10.0, "home", false),
        txn(3, "2020-01-02 10:00:00", 10.0, "home", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(3);

    // Last three in time order: 10, 10, 100.
    assert!((profiles[0].recent_spending_trend - 40.0).abs() < 1e-9);
}

/// With fewer transactions than the window, the trend falls back to
/// the mean of what exists (minimum period 1).
#[test]
fn rolling_trend_short_history() {
    let txns = vec![
        txn(4, "2020-01-01 10:00:00", 30.0, "home", false),
        txn(4, "2020-01-02 10:00:00", 60.0, "home", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    assert!((profiles[0].recent_spending_trend - 45.0).abs() < 1e-9);
}

/// Window 1 means the trend is exactly the latest amount.
#[test]
fn rolling_trend_window_one() {
    let txns = vec![
        txn(5, "2020-01-01 10:00:00", 10.0, "home", false),
        txn(5, "2020-01-02 10:00:00", 99.0, "home", false),
    ];
    let refs: Vec<&Transaction> = txns.iter().collect();

    assert!((calculate_rolling_trend(&refs, 1) - 99.0).abs() < 1e-9);
}

/// Mode ties resolve to the smallest value: lexicographically smallest
/// category, numerically smallest hour.
#[test]
fn behavioral_mode_tie_breaks_low() {
    let txns = vec![
        txn(6, "2020-01-01 05:00:00", 10.0, "travel", false),
        txn(6, "2020-01-02 03:00:00", 10.0, "grocery_pos", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    assert_eq!(profiles[0].most_freq_category, "grocery_pos");
    assert_eq!(profiles[0].customer_peak_hour, 3);
}

/// The clear mode wins when there is one.
#[test]
fn behavioral_mode_prefers_most_frequent() {
    let txns = vec![
        txn(6, "2020-01-01 22:00:00", 10.0, "travel", false),
        txn(6, "2020-01-02 22:00:00", 10.0, "travel", false),
        txn(6, "2020-01-03 07:00:00", 10.0, "grocery_pos", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    assert_eq!(profiles[0].most_freq_category, "travel");
    assert_eq!(profiles[0].customer_peak_hour, 22);
}

/// Exactly one profile per distinct card, ordered by card id, with
/// every field populated.
#[test]
fn one_profile_per_card() {
    let txns = vec![
        txn(30, "2020-01-01 10:00:00", 10.0, "home", false),
        txn(10, "2020-01-01 11:00:00", 20.0, "travel", false),
        txn(20, "2020-01-01 12:00:00", 30.0, "home", true),
        txn(10, "2020-01-02 13:00:00", 40.0, "home", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    let ids: Vec<u64> = profiles.iter().map(|p| p.cc_num).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    for p in &profiles {
        assert!(p.total_trans_count >= 1);
        assert!(p.days_active >= 1, "card {} has no active days", p.cc_num);
        assert!(p.daily_velocity > 0.0);
        assert!(!p.most_freq_category.is_empty());
    }
}

/// daily_velocity is always count / days_active.
#[test]
fn velocity_is_count_over_days() {
    let txns = vec![
        txn(1, "2020-01-01 10:00:00", 10.0, "home", false),
        txn(1, "2020-01-01 11:00:00", 10.0, "home", false),
        txn(1, "2020-01-03 10:00:00", 10.0, "home", false),
        txn(2, "2020-02-01 10:00:00", 10.0, "home", false),
    ];
    let profiles = ProfileBuilder::new(&txns).build_all_features(7);

    for p in &profiles {
        let expected = p.total_trans_count as f64 / p.days_active as f64;
        assert!(
            (p.daily_velocity - expected).abs() < 1e-9,
            "velocity mismatch for card {}",
            p.cc_num
        );
    }
}
