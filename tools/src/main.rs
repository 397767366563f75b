//! batch-runner: headless batch scorer for the cardwatch pipeline.
//!
//! Usage:
//!   batch-runner --input Data/fraudTrain.csv --input2 Data/fraudTest.csv
//!   batch-runner --config run_config.json --out-dir out

use anyhow::Result;
use cardwatch_core::{config::RunConfig, pipeline, report::format_currency};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_arg(&args, "--config") {
        Some(path) => RunConfig::load(PathBuf::from(path).as_path())?,
        None => {
            let input = find_arg(&args, "--input").ok_or_else(|| {
                anyhow::anyhow!("--input <csv> is required (or --config <json>)")
            })?;
            let mut inputs = vec![PathBuf::from(input)];
            if let Some(second) = find_arg(&args, "--input2") {
                inputs.push(PathBuf::from(second));
            }
            RunConfig::new(inputs)
        }
    };

    if let Some(dir) = find_arg(&args, "--out-dir") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(window) = find_arg(&args, "--window") {
        config.rolling_window = window.parse()?;
    }

    println!("cardwatch — batch-runner");
    for input in &config.input_files {
        println!("  input:    {}", input.display());
    }
    println!("  out dir:  {}", config.output_dir.display());
    println!("  window:   {}", config.rolling_window);
    println!();

    let outcome = pipeline::run_batch(&config)?;
    print_summary(&outcome);
    Ok(())
}

fn print_summary(outcome: &pipeline::BatchOutcome) {
    let metrics = &outcome.report.metrics;
    let flagged_count = outcome.flagged.iter().filter(|f| f.is_flagged).count();

    println!("=== RUN SUMMARY ===");
    println!("  transactions:    {}", outcome.transactions.len());
    println!("  customers:       {}", outcome.scored_profiles.len());
    println!("  flagged:         {flagged_count}");
    println!("  actual fraud:    {}", metrics.total_fraud);
    println!("  true positives:  {}", metrics.true_positives);
    println!("  false positives: {}", metrics.false_positives);
    println!("  false negatives: {}", metrics.false_negatives);
    println!("  recall:          {:.2}%", metrics.recall_pct());
    println!("  money saved:     {}", format_currency(metrics.money_saved));

    println!();
    println!("=== RISK BANDS ===");
    for (band, count) in cardwatch_core::report::band_distribution(&outcome.scored_profiles) {
        println!("  {band:<10} {count}");
    }

    println!();
    println!("=== TOP FLAGGED CATEGORIES ===");
    if outcome.report.top_categories.is_empty() {
        println!("  (no transactions flagged)");
    }
    for (category, count) in &outcome.report.top_categories {
        println!("  {category:<16} {count}");
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
