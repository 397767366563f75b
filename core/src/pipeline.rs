//! Batch pipeline orchestration.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Loader                  (CSV files → cleaned transactions)
//!   2. CustomerProfileBuilder  (transactions → profiles)
//!   3. RiskScorer              (profiles → scored profiles)
//!   4. TransactionFlagger      (transactions + scored → flagged)
//!   5. ReportGenerator         (scored + flagged → summary text)
//!
//! RULES:
//!   - Stages execute strictly in sequence; a run either completes or
//!     aborts on an unrecoverable input error.
//!   - Every stage is a pure transform: it reads prior-stage outputs
//!     and produces a new table. Nothing is edited in place.
//!   - Each artifact is written exactly once per run.

use crate::{
    config::RunConfig,
    error::PipelineResult,
    export,
    flagging::{FlaggedTransaction, TransactionFlagger},
    loader,
    metrics::DetectionReport,
    profile::ProfileBuilder,
    report::ReportGenerator,
    scoring::{RiskScorer, ScoredProfile},
    transaction::Transaction,
};

/// Everything one batch run produces.
pub struct BatchOutcome {
    pub transactions: Vec<Transaction>,
    pub scored_profiles: Vec<ScoredProfile>,
    pub flagged: Vec<FlaggedTransaction>,
    pub report: DetectionReport,
    pub summary: String,
}

/// Run the scoring and flagging stages over an already-loaded batch.
pub fn run(transactions: Vec<Transaction>, rolling_window: usize) -> BatchOutcome {
    log::info!("Building customer profiles");
    let profiles = ProfileBuilder::new(&transactions).build_all_features(rolling_window);

    log::info!("Scoring {} customer profiles", profiles.len());
    let scored_profiles = RiskScorer::new(profiles).calculate_risk_scores();

    log::info!("Flagging suspicious transactions");
    let flagged = TransactionFlagger::new(&transactions, &scored_profiles)
        .flag_suspicious_activity();

    let report = DetectionReport::from_flagged(&flagged);
    let summary = ReportGenerator::new(&scored_profiles, &flagged).render();

    BatchOutcome {
        transactions,
        scored_profiles,
        flagged,
        report,
        summary,
    }
}

/// Full batch run: load the configured inputs, run every stage, and
/// write the three artifacts into the output directory.
pub fn run_batch(config: &RunConfig) -> PipelineResult<BatchOutcome> {
    let transactions = loader::load_transactions(&config.input_files)?;
    let outcome = run(transactions, config.rolling_window);

    std::fs::create_dir_all(&config.output_dir)?;
    export::write_profiles(
        config.output_dir.join(export::PROFILE_EXPORT),
        &outcome.scored_profiles,
    )?;
    export::write_flagged(
        config.output_dir.join(export::FLAGGED_EXPORT),
        &outcome.flagged,
    )?;
    export::write_summary(
        config.output_dir.join(export::SUMMARY_EXPORT),
        &outcome.summary,
    )?;

    Ok(outcome)
}
