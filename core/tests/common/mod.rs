//! Shared test fixtures.
#![allow(dead_code)]

use cardwatch_core::flagging::FlaggedTransaction;
use cardwatch_core::profile::CustomerProfile;
use cardwatch_core::scoring::{RiskBand, ScoredProfile};
use cardwatch_core::transaction::{Transaction, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).expect("test timestamp")
}

pub fn txn(cc_num: u64, timestamp: &str, amt: f64, category: &str, is_fraud: bool) -> Transaction {
    Transaction::new(cc_num, ts(timestamp), amt, category.to_string(), is_fraud)
}

/// Baseline profile that triggers no scoring rule. Tests override the
/// fields they exercise.
pub fn quiet_profile(cc_num: u64) -> CustomerProfile {
    CustomerProfile {
        cc_num,
        total_spending: 500.0,
        avg_transaction: 50.0,
        max_transaction: 100.0,
        total_trans_count: 10,
        days_active: 10,
        daily_velocity: 1.0,
        recent_spending_trend: 50.0,
        most_freq_category: "home".to_string(),
        customer_peak_hour: 12,
    }
}

/// Scored profile with the given band and customer average; the other
/// fields are neutral.
pub fn scored_profile(cc_num: u64, risk_band: RiskBand, avg_transaction: f64) -> ScoredProfile {
    ScoredProfile {
        cc_num,
        total_spending: avg_transaction * 10.0,
        avg_transaction,
        max_transaction: avg_transaction * 2.0,
        total_trans_count: 10,
        days_active: 10,
        daily_velocity: 1.0,
        recent_spending_trend: avg_transaction,
        most_freq_category: "home".to_string(),
        customer_peak_hour: 12,
        velocity_z: 0.0,
        velocity_points: 0,
        spike_ratio: 1.0,
        spike_points: 0,
        category_amount_points: 0,
        night_points: 0,
        total_risk_score: 0,
        risk_band,
    }
}

/// Flagged row for metrics math; the flag is set directly, not derived.
pub fn flagged_row(category: &str, amt: f64, is_fraud: bool, is_flagged: bool) -> FlaggedTransaction {
    FlaggedTransaction {
        cc_num: 1,
        trans_date_trans_time: ts("2020-01-01 12:00:00"),
        amt,
        category: category.to_string(),
        trans_hour: 12,
        is_fraud,
        risk_level: RiskBand::Low,
        cust_avg: Some(50.0),
        is_flagged,
    }
}
