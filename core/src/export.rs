//! Flat-file artifact export.
//!
//! RULE: Only this module writes artifacts. Each artifact is written
//! exactly once per run and is read-only thereafter. Re-exporting then
//! re-ingesting the scored profile table yields an identical table.

use crate::error::PipelineResult;
use crate::flagging::FlaggedTransaction;
use crate::scoring::ScoredProfile;
use std::fs;
use std::path::Path;

pub const PROFILE_EXPORT: &str = "customer_risk_summary.csv";
pub const FLAGGED_EXPORT: &str = "flagged_transactions.csv";
pub const SUMMARY_EXPORT: &str = "final_summary.txt";

/// Write the scored profile table, one row per card.
pub fn write_profiles<P: AsRef<Path>>(path: P, profiles: &[ScoredProfile]) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for profile in profiles {
        writer.serialize(profile)?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} scored profiles to {}",
        profiles.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read a scored profile table back from a prior export.
pub fn read_profiles<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<ScoredProfile>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut profiles = Vec::new();
    for row in reader.deserialize() {
        profiles.push(row?);
    }
    Ok(profiles)
}

/// Write the flagged transaction table, one row per transaction.
pub fn write_flagged<P: AsRef<Path>>(path: P, rows: &[FlaggedTransaction]) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} flagged transactions to {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write the textual summary artifact.
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &str) -> PipelineResult<()> {
    fs::write(path.as_ref(), summary)?;
    log::info!("Wrote summary to {}", path.as_ref().display());
    Ok(())
}
