//! Employment growth by exposure bin
//!
//! Joins the exposure scores with the 2013 and 2023 OEWS snapshots, buckets
//! occupations into adaptive quantile bins over exposure, and charts the
//! per-bin employment growth, weighted by 2013 employment.

use crate::algorithm::binning::{assign_quantile_bins, weighted_mean_by_bin};
use crate::algorithm::join::first_occurrence_index;
use crate::algorithm::stats::percent_change;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{BinSummary, EmploymentRecord, ExposureRecord};
use crate::registry;
use crate::render::{charts, tables};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Chart artifact name
pub const CHART_FILE: &str = "q1_employment_growth_by_aioe_decile.png";

/// Per-bin table written next to the chart when bin tables are enabled
const BIN_TABLE_FILE: &str = "q1_employment_growth_by_aioe_decile.csv";

/// Per-bin weighted mean employment growth over the joined tables
///
/// Occupations missing from either snapshot, or missing an employment count
/// in either year, are dropped before binning. Errors when nothing joins.
pub fn compute(
    exposure: &[ExposureRecord],
    snapshot_2013: &[EmploymentRecord],
    snapshot_2023: &[EmploymentRecord],
) -> Result<Vec<BinSummary>> {
    let by_code_2013 = first_occurrence_index(snapshot_2013.iter().map(|r| r.soc.as_str()));
    let by_code_2023 = first_occurrence_index(snapshot_2023.iter().map(|r| r.soc.as_str()));

    let mut scores = Vec::new();
    let mut growth = Vec::new();
    let mut weights = Vec::new();
    for record in exposure {
        let Some(&row_2013) = by_code_2013.get(record.soc.as_str()) else {
            continue;
        };
        let Some(&row_2023) = by_code_2023.get(record.soc.as_str()) else {
            continue;
        };
        let (Some(emp_2013), Some(emp_2023)) = (
            snapshot_2013[row_2013].employment,
            snapshot_2023[row_2023].employment,
        ) else {
            continue;
        };
        scores.push(record.aioe);
        growth.push(percent_change(emp_2023, emp_2013));
        weights.push(emp_2013);
    }
    if scores.is_empty() {
        return Err(AnalysisError::DataError(
            "no occupations shared between the exposure table and both snapshots".to_string(),
        ));
    }

    let (labels, bins) = assign_quantile_bins(&scores)?;
    Ok(weighted_mean_by_bin(&labels, bins, &growth, &weights))
}

/// Load the tables, compute the bins, and render the chart
pub fn run(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let exposure = registry::exposure::read(&config.data_dir.join(registry::exposure::DEFAULT_FILE))?;
    let snapshot_2013 =
        registry::oews::read(&config.data_dir.join(registry::oews::DEFAULT_FILE_2013))?;
    let snapshot_2023 =
        registry::oews::read(&config.data_dir.join(registry::oews::DEFAULT_FILE_2023))?;

    let bins = compute(&exposure, &snapshot_2013, &snapshot_2023)?;
    info!("Computed employment growth over {} exposure bins", bins.len());

    fs::create_dir_all(&config.output_dir)?;
    let chart_path = config.output_dir.join(CHART_FILE);
    charts::bin_bar_chart(
        &bins,
        "Employment growth by AI exposure (bins adapted to data size)",
        "AI exposure bins (low → high)",
        "Employment growth 2013–2023 (%)",
        &chart_path,
    )?;

    let mut artifacts = vec![chart_path];
    if config.write_bin_tables {
        let table_path = config.output_dir.join(BIN_TABLE_FILE);
        tables::write_bin_table(&bins, "weighted_pct_change", &table_path)?;
        artifacts.push(table_path);
    }
    Ok(artifacts)
}
