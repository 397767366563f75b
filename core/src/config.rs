//! Run configuration.
//!
//! The config only carries I/O paths and the rolling window. Scoring
//! weights, band thresholds, and the danger-category set are fixed
//! constants in code, never configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rolling window (in transactions) for the recent spending trend.
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input CSV files, concatenated in order.
    pub input_files: Vec<PathBuf>,
    /// Directory the three artifacts are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,
}

impl RunConfig {
    pub fn new(input_files: Vec<PathBuf>) -> Self {
        Self {
            input_files,
            output_dir: default_output_dir(),
            rolling_window: DEFAULT_ROLLING_WINDOW,
        }
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: RunConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_rolling_window() -> usize {
    DEFAULT_ROLLING_WINDOW
}
