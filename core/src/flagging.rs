//! Transaction flagging — join per-card risk attributes onto every
//! transaction and evaluate the compound suspicion rule.
//!
//! A card id with no scored profile is treated as lowest risk with no
//! customer average (the outsized-spend arm then cannot trigger). The
//! mismatch is logged and never fatal.

use crate::rules;
use crate::scoring::{RiskBand, ScoredProfile};
use crate::transaction::{timestamp_format, Transaction};
use crate::types::{CardId, HourOfDay};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A transaction augmented with its card's risk attributes and the
/// suspicion flag. One row per transaction in the flagged artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTransaction {
    pub cc_num: CardId,
    #[serde(with = "timestamp_format")]
    pub trans_date_trans_time: NaiveDateTime,
    pub amt: f64,
    pub category: String,
    pub trans_hour: HourOfDay,
    pub is_fraud: bool,
    pub risk_level: RiskBand,
    pub cust_avg: Option<f64>,
    pub is_flagged: bool,
}

/// Flags a transaction batch against a scored profile table.
pub struct TransactionFlagger<'a> {
    transactions: &'a [Transaction],
    profiles: &'a [ScoredProfile],
}

impl<'a> TransactionFlagger<'a> {
    pub fn new(transactions: &'a [Transaction], profiles: &'a [ScoredProfile]) -> Self {
        Self {
            transactions,
            profiles,
        }
    }

    /// Evaluate the suspicion rule on every transaction and return the
    /// augmented table.
    pub fn flag_suspicious_activity(&self) -> Vec<FlaggedTransaction> {
        let lookup: HashMap<CardId, (RiskBand, f64)> = self
            .profiles
            .iter()
            .map(|p| (p.cc_num, (p.risk_band, p.avg_transaction)))
            .collect();

        let mut unmatched: u64 = 0;
        let flagged: Vec<FlaggedTransaction> = self
            .transactions
            .iter()
            .map(|txn| {
                let (risk_level, cust_avg) = match lookup.get(&txn.cc_num) {
                    Some(&(band, avg)) => (band, Some(avg)),
                    None => {
                        unmatched += 1;
                        (RiskBand::Low, None)
                    }
                };
                FlaggedTransaction {
                    cc_num: txn.cc_num,
                    trans_date_trans_time: txn.trans_date_trans_time,
                    amt: txn.amt,
                    category: txn.category.clone(),
                    trans_hour: txn.trans_hour,
                    is_fraud: txn.is_fraud,
                    risk_level,
                    cust_avg,
                    is_flagged: rules::is_flagged(txn, risk_level, cust_avg),
                }
            })
            .collect();

        if unmatched > 0 {
            log::warn!(
                "{unmatched} transactions had no matching customer profile; treated as lowest risk"
            );
        }
        let flag_count = flagged.iter().filter(|f| f.is_flagged).count();
        log::info!(
            "Flagged {flag_count} of {} transactions",
            flagged.len()
        );
        flagged
    }
}
