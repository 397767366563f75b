//! Detection performance metrics — confusion-matrix counts of the
//! suspicion flag against ground-truth fraud labels.
//!
//! RULE: These formulas exist only here. The flagging stage and the
//! final report both compute their figures through this module, so the
//! two summaries can never diverge.

use crate::flagging::FlaggedTransaction;
use std::collections::HashMap;

/// How many flagged categories the reports list.
pub const TOP_CATEGORY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionMetrics {
    pub total_rows: u64,
    pub total_fraud: u64,
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    /// Sum of amount over true positives — fraud the flag would have blocked.
    pub money_saved: f64,
}

impl DetectionMetrics {
    pub fn from_flagged(rows: &[FlaggedTransaction]) -> Self {
        let mut metrics = DetectionMetrics {
            total_rows: rows.len() as u64,
            total_fraud: 0,
            true_positives: 0,
            false_positives: 0,
            false_negatives: 0,
            money_saved: 0.0,
        };
        for row in rows {
            if row.is_fraud {
                metrics.total_fraud += 1;
            }
            match (row.is_flagged, row.is_fraud) {
                (true, true) => {
                    metrics.true_positives += 1;
                    metrics.money_saved += row.amt;
                }
                (true, false) => metrics.false_positives += 1,
                (false, true) => metrics.false_negatives += 1,
                (false, false) => {}
            }
        }
        metrics
    }

    /// Recall as a percentage: TP / (TP + FN) x 100, and 0.0 (never
    /// NaN) when there is no actual fraud.
    pub fn recall_pct(&self) -> f64 {
        let actual = self.true_positives + self.false_negatives;
        if actual == 0 {
            0.0
        } else {
            self.true_positives as f64 / actual as f64 * 100.0
        }
    }
}

/// Metrics plus the most frequent categories among flagged rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReport {
    pub metrics: DetectionMetrics,
    pub top_categories: Vec<(String, u64)>,
}

impl DetectionReport {
    pub fn from_flagged(rows: &[FlaggedTransaction]) -> Self {
        Self {
            metrics: DetectionMetrics::from_flagged(rows),
            top_categories: top_flagged_categories(rows, TOP_CATEGORY_COUNT),
        }
    }
}

/// The `limit` most frequent categories among flagged transactions,
/// count descending; ties break by category name ascending.
pub fn top_flagged_categories(
    rows: &[FlaggedTransaction],
    limit: usize,
) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in rows.iter().filter(|r| r.is_flagged) {
        *counts.entry(row.category.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
