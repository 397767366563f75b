//! Customer risk scoring — fixed-weight anomaly points and ordinal bands.
//!
//! Four independent binary rules, each worth a fixed number of points:
//!   1. Velocity anomaly   (population z-score > 2.5)        +25
//!   2. Spending spike     (recent trend > 2x customer mean)  +30
//!   3. Category + amount  (danger category, max spend > 200) +25
//!   4. Night-time pattern (peak hour in the 23:00–04:00 band) +20
//!
//! The total is banded at fixed thresholds into Low / Medium / High /
//! Critical. Weights and thresholds are constants, never configuration.

use crate::profile::CustomerProfile;
use crate::rules;
use crate::types::{CardId, HourOfDay};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VELOCITY_POINTS: u32 = 25;
pub const SPIKE_POINTS: u32 = 30;
pub const CATEGORY_AMOUNT_POINTS: u32 = 25;
pub const NIGHT_POINTS: u32 = 20;

pub const VELOCITY_Z_THRESHOLD: f64 = 2.5;
pub const SPIKE_RATIO_THRESHOLD: f64 = 2.0;

const MEDIUM_SCORE: u32 = 30;
const HIGH_SCORE: u32 = 50;
const CRITICAL_SCORE: u32 = 70;

// ── Risk bands ───────────────────────────────────────────────────────────────

/// Ordinal risk classification. Variant order is the band order, so
/// the derived `Ord` gives Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    /// Band a total risk score at the fixed thresholds. Monotone
    /// non-decreasing in the score.
    pub fn from_score(score: u32) -> Self {
        if score >= CRITICAL_SCORE {
            RiskBand::Critical
        } else if score >= HIGH_SCORE {
            RiskBand::High
        } else if score >= MEDIUM_SCORE {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub const ALL: [RiskBand; 4] = [
        RiskBand::Low,
        RiskBand::Medium,
        RiskBand::High,
        RiskBand::Critical,
    ];
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
            RiskBand::Critical => "Critical",
        };
        f.pad(label)
    }
}

// ── Scored profiles ──────────────────────────────────────────────────────────

/// A customer profile with its score breakdown and band. One row per
/// card in the scored profile artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProfile {
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
    pub velocity_z: f64,
    pub velocity_points: u32,
    pub spike_ratio: f64,
    pub spike_points: u32,
    pub category_amount_points: u32,
    pub night_points: u32,
    pub total_risk_score: u32,
    pub risk_band: RiskBand,
}

/// Population statistics for the velocity z-score.
///
/// `std` is the sample standard deviation and is 0.0 when it is
/// undefined (fewer than two profiles); a zero std always resolves to
/// "not anomalous" rather than propagating an undefined z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityStats {
    pub mean: f64,
    pub std: f64,
}

/// Mean and sample standard deviation of daily velocity across the
/// profile population.
pub fn velocity_stats(profiles: &[CustomerProfile]) -> VelocityStats {
    let n = profiles.len();
    if n == 0 {
        return VelocityStats { mean: 0.0, std: 0.0 };
    }
    let mean = profiles.iter().map(|p| p.daily_velocity).sum::<f64>() / n as f64;
    if n < 2 {
        return VelocityStats { mean, std: 0.0 };
    }
    let variance = profiles
        .iter()
        .map(|p| (p.daily_velocity - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    VelocityStats {
        mean,
        std: variance.sqrt(),
    }
}

/// Score one profile against the population velocity statistics.
///
/// Pure: the output depends only on the profile and `stats`. Degenerate
/// statistics (zero std, non-positive customer mean) resolve to zero
/// contributions instead of NaN.
pub fn score_profile(profile: &CustomerProfile, stats: VelocityStats) -> ScoredProfile {
    let velocity_z = if stats.std > 0.0 {
        (profile.daily_velocity - stats.mean) / stats.std
    } else {
        0.0
    };
    let velocity_points = if velocity_z > VELOCITY_Z_THRESHOLD {
        VELOCITY_POINTS
    } else {
        0
    };

    let spike_ratio = if profile.avg_transaction > 0.0 {
        profile.recent_spending_trend / profile.avg_transaction
    } else {
        0.0
    };
    let spike_points = if spike_ratio > SPIKE_RATIO_THRESHOLD {
        SPIKE_POINTS
    } else {
        0
    };

    let category_amount_points = if rules::is_danger_category(&profile.most_freq_category)
        && profile.max_transaction > rules::HIGH_AMOUNT_THRESHOLD
    {
        CATEGORY_AMOUNT_POINTS
    } else {
        0
    };

    let night_points = if rules::is_night_hour(profile.customer_peak_hour) {
        NIGHT_POINTS
    } else {
        0
    };

    let total_risk_score = velocity_points + spike_points + category_amount_points + night_points;

    ScoredProfile {
        cc_num: profile.cc_num,
        total_spending: profile.total_spending,
        avg_transaction: profile.avg_transaction,
        max_transaction: profile.max_transaction,
        total_trans_count: profile.total_trans_count,
        days_active: profile.days_active,
        daily_velocity: profile.daily_velocity,
        recent_spending_trend: profile.recent_spending_trend,
        most_freq_category: profile.most_freq_category.clone(),
        customer_peak_hour: profile.customer_peak_hour,
        velocity_z,
        velocity_points,
        spike_ratio,
        spike_points,
        category_amount_points,
        night_points,
        total_risk_score,
        risk_band: RiskBand::from_score(total_risk_score),
    }
}

/// Scores a whole profile table. Consumes the profiles and produces a
/// new scored table; the input is never partially updated.
pub struct RiskScorer {
    profiles: Vec<CustomerProfile>,
}

impl RiskScorer {
    pub fn new(profiles: Vec<CustomerProfile>) -> Self {
        Self { profiles }
    }

    /// Apply all four rules to every profile and band the totals.
    pub fn calculate_risk_scores(self) -> Vec<ScoredProfile> {
        let stats = velocity_stats(&self.profiles);
        log::debug!(
            "Velocity population: mean={:.4} std={:.4}",
            stats.mean,
            stats.std
        );

        let scored: Vec<ScoredProfile> = self
            .profiles
            .iter()
            .map(|p| score_profile(p, stats))
            .collect();

        for band in RiskBand::ALL {
            let count = scored.iter().filter(|p| p.risk_band == band).count();
            log::info!("Risk band {band}: {count} customers");
        }
        scored
    }
}
