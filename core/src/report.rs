//! Final report rendering — one textual summary per batch run.
//!
//! The band distribution comes from the scored profile table; the
//! detection figures are recomputed from the flagged table through the
//! shared metrics module, with the same formulas the flagging stage
//! reports.

use crate::flagging::FlaggedTransaction;
use crate::metrics::DetectionReport;
use crate::scoring::{RiskBand, ScoredProfile};
use std::fmt::Write;

pub struct ReportGenerator<'a> {
    profiles: &'a [ScoredProfile],
    flagged: &'a [FlaggedTransaction],
}

impl<'a> ReportGenerator<'a> {
    pub fn new(profiles: &'a [ScoredProfile], flagged: &'a [FlaggedTransaction]) -> Self {
        Self { profiles, flagged }
    }

    /// Render the complete summary text.
    pub fn render(&self) -> String {
        let report = DetectionReport::from_flagged(self.flagged);
        let metrics = &report.metrics;

        let mut out = String::new();
        let _ = writeln!(out, "--- CUSTOMER RISK SCORING ---");
        let _ = writeln!(out);
        let _ = writeln!(out, "Risk band distribution:");
        for (band, count) in band_distribution(self.profiles) {
            let _ = writeln!(out, "{band:<10} {count}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "--- TRANSACTION FLAGGING PERFORMANCE ---");
        let _ = writeln!(out, "Total rows:                      {}", metrics.total_rows);
        let _ = writeln!(out, "Actual fraud:                    {}", metrics.total_fraud);
        let _ = writeln!(
            out,
            "Caught fraud (true positives):   {}",
            metrics.true_positives
        );
        let _ = writeln!(
            out,
            "Missed cases (false negatives):  {}",
            metrics.false_negatives
        );
        let _ = writeln!(
            out,
            "False alarms (false positives):  {}",
            metrics.false_positives
        );
        let _ = writeln!(
            out,
            "Detection rate (recall):         {:.2}%",
            metrics.recall_pct()
        );
        let _ = writeln!(
            out,
            "Money saved:                     {}",
            format_currency(metrics.money_saved)
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "--- TOP FLAGGED CATEGORIES ---");
        for (category, count) in &report.top_categories {
            let _ = writeln!(out, "{category:<16} {count}");
        }
        out
    }
}

/// Count of profiles per band, ordered by count descending; ties break
/// by band order ascending.
pub fn band_distribution(profiles: &[ScoredProfile]) -> Vec<(RiskBand, u64)> {
    let mut counts: Vec<(RiskBand, u64)> = RiskBand::ALL
        .iter()
        .map(|&band| {
            let count = profiles.iter().filter(|p| p.risk_band == band).count() as u64;
            (band, count)
        })
        .filter(|&(_, count)| count > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Currency formatting with digit grouping: 1234567.891 -> "$1,234,567.89".
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = match cents.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cents.as_str(), "00"),
    };

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
