//! Rule constants and predicates shared by scoring and flagging.
//!
//! RULE: The danger-category set, the night-hour window, and the
//! high-amount threshold live here and only here. The customer scorer
//! and the transaction flagger both import them, so the two rule sets
//! cannot drift apart.

use crate::scoring::RiskBand;
use crate::transaction::Transaction;
use crate::types::HourOfDay;

/// Transaction categories with elevated fraud risk.
pub const DANGER_CATEGORIES: [&str; 3] = ["shopping_net", "grocery_pos", "misc_net"];

/// Dollar amount above which a transaction counts as high-value.
pub const HIGH_AMOUNT_THRESHOLD: f64 = 200.0;

/// Night window: 23:00 through 04:59.
pub const NIGHT_START_HOUR: HourOfDay = 23;
pub const NIGHT_END_HOUR: HourOfDay = 4;

/// Multiple of the customer's average transaction above which a single
/// purchase counts as an outsized spend.
pub const CUSTOMER_AVG_MULTIPLE: f64 = 3.0;

pub fn is_danger_category(category: &str) -> bool {
    DANGER_CATEGORIES.contains(&category)
}

pub fn is_night_hour(hour: HourOfDay) -> bool {
    hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR
}

/// The compound suspicion predicate, evaluated per transaction.
///
/// Pure function of the transaction's own fields plus its card's risk
/// band and average transaction — no hidden or accumulated state. A
/// card with no profile passes `cust_avg = None`, which disables the
/// outsized-spend arm.
pub fn is_flagged(txn: &Transaction, risk_level: RiskBand, cust_avg: Option<f64>) -> bool {
    let high_amount = txn.amt >= HIGH_AMOUNT_THRESHOLD;
    let danger_category = is_danger_category(&txn.category) && high_amount;
    let night = is_night_hour(txn.trans_hour) && high_amount;
    let outsized = high_amount
        && matches!(cust_avg, Some(avg) if txn.amt > CUSTOMER_AVG_MULTIPLE * avg);

    danger_category || night || outsized || risk_level == RiskBand::Critical
}
