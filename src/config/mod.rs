//! Runtime configuration
//!
//! One flat settings struct shared by every analysis, with defaults matching
//! the published layout: source tables under `data/`, charts under
//! `pictures/`. A JSON file can override any subset of the fields, and the
//! command line can override the directories on top of that.

use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every analysis
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the source tables
    pub data_dir: PathBuf,
    /// Directory the charts are written to
    pub output_dir: PathBuf,
    /// Also write per-bin CSV tables next to the binned charts
    pub write_bin_tables: bool,
    /// Country code selected for the postings trend
    pub postings_country: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("pictures"),
            write_bin_tables: false,
            postings_country: "USA".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load settings from a JSON file, filling omitted fields with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AnalysisError::ConfigError(format!("{}: {e}", path.display())))
    }
}
