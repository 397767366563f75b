//! CSV ingestion and cleaning.
//!
//! RULE: Only the loader talks to the raw input files. It hands every
//! later stage a cleaned, typed `Vec<Transaction>`:
//!   1. Read each input file, concatenating in argument order
//!   2. Parse timestamps (schema errors abort the run)
//!   3. Drop exact duplicate records, keeping the first occurrence
//!   4. Derive hour-of-day
//!
//! Extra columns in the input are ignored; a missing or mistyped
//! required column aborts with an input schema error.

use crate::{
    error::{PipelineError, PipelineResult},
    transaction::{Transaction, TIMESTAMP_FORMAT},
    types::CardId,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// The raw CSV row shape. Only the columns the pipeline needs;
/// csv/serde skips everything else in the file.
#[derive(Debug, Deserialize)]
struct RawTransactionRow {
    cc_num: CardId,
    trans_date_trans_time: String,
    amt: f64,
    category: String,
    is_fraud: u8,
}

/// Load and clean one or more transaction CSV files.
pub fn load_transactions<P: AsRef<Path>>(paths: &[P]) -> PipelineResult<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let before = transactions.len();
        read_file(path, &mut transactions)?;
        log::info!(
            "Loaded {} rows from {}",
            transactions.len() - before,
            path.display()
        );
    }

    let removed = dedupe(&mut transactions);
    if removed > 0 {
        log::info!("Removed {removed} duplicate rows");
    }
    log::info!("Batch ready: {} transactions", transactions.len());
    Ok(transactions)
}

fn read_file(path: &Path, out: &mut Vec<Transaction>) -> PipelineResult<()> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        PipelineError::InputSchema(format!("cannot open {}: {e}", path.display()))
    })?;

    for row in reader.deserialize() {
        let row: RawTransactionRow = row.map_err(|e| {
            PipelineError::InputSchema(format!("{}: {e}", path.display()))
        })?;
        let timestamp = NaiveDateTime::parse_from_str(
            &row.trans_date_trans_time,
            TIMESTAMP_FORMAT,
        )
        .map_err(|e| {
            PipelineError::InputSchema(format!(
                "{}: bad timestamp {:?}: {e}",
                path.display(),
                row.trans_date_trans_time
            ))
        })?;

        out.push(Transaction::new(
            row.cc_num,
            timestamp,
            row.amt,
            row.category,
            row.is_fraud != 0,
        ));
    }
    Ok(())
}

/// Drop exact duplicates in place, keeping first occurrences.
/// Returns the number of rows removed.
fn dedupe(transactions: &mut Vec<Transaction>) -> usize {
    let before = transactions.len();
    let mut seen: HashSet<(CardId, i64, u64, String, bool)> = HashSet::new();
    transactions.retain(|t| {
        seen.insert((
            t.cc_num,
            t.trans_date_trans_time.and_utc().timestamp(),
            t.amt.to_bits(),
            t.category.clone(),
            t.is_fraud,
        ))
    });
    before - transactions.len()
}
