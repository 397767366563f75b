//! Customer profile building — per-card behavioral features.
//!
//! One profile per distinct card in the batch, built in a fixed order:
//!   1. aggregate_spending          (sum / mean / max / count of amount)
//!   2. calculate_velocity          (distinct active days, txns per day)
//!   3. calculate_rolling_trend     (trailing mean over the last W txns)
//!   4. calculate_behavioral_patterns (mode category, mode hour)
//!
//! Each step is a pure function over one card's transactions, so every
//! feature is testable without building the whole table.

use crate::transaction::Transaction;
use crate::types::{CardId, HourOfDay};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Completed behavioral profile for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub cc_num: CardId,
    pub total_spending: f64,
    pub avg_transaction: f64,
    pub max_transaction: f64,
    pub total_trans_count: u64,
    pub days_active: u64,
    pub daily_velocity: f64,
    pub recent_spending_trend: f64,
    pub most_freq_category: String,
    pub customer_peak_hour: HourOfDay,
}

/// Per-card spending aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingStats {
    pub total: f64,
    pub mean: f64,
    pub max: f64,
    pub count: u64,
}

/// Per-card activity span.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStats {
    pub days_active: u64,
    pub daily_velocity: f64,
}

/// Per-card behavioral modes.
#[derive(Debug, Clone, PartialEq)]
pub struct BehavioralPattern {
    pub most_freq_category: String,
    pub customer_peak_hour: HourOfDay,
}

/// Sum, mean, max, and count of transaction amounts for one card.
pub fn aggregate_spending(txns: &[&Transaction]) -> SpendingStats {
    let count = txns.len() as u64;
    let total: f64 = txns.iter().map(|t| t.amt).sum();
    let max = txns
        .iter()
        .map(|t| t.amt)
        .fold(f64::NEG_INFINITY, f64::max);
    let max = if count > 0 { max } else { 0.0 };
    let mean = if count > 0 { total / count as f64 } else { 0.0 };
    SpendingStats {
        total,
        mean,
        max,
        count,
    }
}

/// Distinct calendar days with activity and transactions per active day.
///
/// `days_active` is always >= 1 for a card with at least one
/// transaction; the zero-day guard only exists so an empty slice can
/// never divide by zero.
pub fn calculate_velocity(txns: &[&Transaction]) -> ActivityStats {
    let days: BTreeSet<NaiveDate> = txns.iter().map(|t| t.date()).collect();
    let days_active = days.len() as u64;
    let daily_velocity = if days_active > 0 {
        txns.len() as f64 / days_active as f64
    } else {
        0.0
    };
    ActivityStats {
        days_active,
        daily_velocity,
    }
}

/// Trailing rolling mean of amount with window `window` and minimum
/// period 1, evaluated at the card's most recent transaction: the mean
/// of the last `min(window, n)` amounts in timestamp order.
///
/// Equal timestamps keep their input order (stable sort).
pub fn calculate_rolling_trend(txns: &[&Transaction], window: usize) -> f64 {
    if txns.is_empty() {
        return 0.0;
    }
    let mut ordered: Vec<&Transaction> = txns.to_vec();
    ordered.sort_by_key(|t| t.trans_date_trans_time);

    let take = window.max(1).min(ordered.len());
    let tail = &ordered[ordered.len() - take..];
    tail.iter().map(|t| t.amt).sum::<f64>() / take as f64
}

/// Mode of category and mode of hour-of-day for one card.
///
/// Tie-break: the smallest value wins — lexicographically smallest
/// category, numerically smallest hour.
pub fn calculate_behavioral_patterns(txns: &[&Transaction]) -> BehavioralPattern {
    let mut category_counts: BTreeMap<&str, u64> = BTreeMap::new();
    let mut hour_counts: BTreeMap<HourOfDay, u64> = BTreeMap::new();
    for t in txns {
        *category_counts.entry(t.category.as_str()).or_insert(0) += 1;
        *hour_counts.entry(t.trans_hour).or_insert(0) += 1;
    }
    BehavioralPattern {
        most_freq_category: mode(&category_counts).unwrap_or_default().to_string(),
        customer_peak_hour: mode(&hour_counts).unwrap_or_default(),
    }
}

/// Smallest key with the highest count. Ascending key iteration makes
/// the first strictly-greater count win, so ties resolve low.
fn mode<K: Ord + Copy>(counts: &BTreeMap<K, u64>) -> Option<K> {
    let mut best: Option<(K, u64)> = None;
    for (&key, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key)
}

/// Builds the full profile table from a transaction batch.
pub struct ProfileBuilder<'a> {
    transactions: &'a [Transaction],
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Run every feature step in the fixed order and return the
    /// completed table: exactly one row per distinct card, ordered by
    /// card id, with no missing values.
    pub fn build_all_features(&self, rolling_window: usize) -> Vec<CustomerProfile> {
        let groups = self.group_by_card();
        let mut profiles = Vec::with_capacity(groups.len());

        for (cc_num, txns) in &groups {
            let spending = aggregate_spending(txns);
            let activity = calculate_velocity(txns);
            let trend = calculate_rolling_trend(txns, rolling_window);
            let patterns = calculate_behavioral_patterns(txns);

            profiles.push(CustomerProfile {
                cc_num: *cc_num,
                total_spending: spending.total,
                avg_transaction: spending.mean,
                max_transaction: spending.max,
                total_trans_count: spending.count,
                days_active: activity.days_active,
                daily_velocity: activity.daily_velocity,
                recent_spending_trend: trend,
                most_freq_category: patterns.most_freq_category,
                customer_peak_hour: patterns.customer_peak_hour,
            });
        }

        log::info!("Built profiles for {} cards", profiles.len());
        profiles
    }

    /// Group transactions per card, preserving input order within a card.
    fn group_by_card(&self) -> BTreeMap<CardId, Vec<&'a Transaction>> {
        let mut groups: BTreeMap<CardId, Vec<&Transaction>> = BTreeMap::new();
        for t in self.transactions {
            groups.entry(t.cc_num).or_default().push(t);
        }
        groups
    }
}
