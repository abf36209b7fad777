//! Wage and education disparities across exposure groups
//!
//! Two views over the same 2023 snapshot: employment-weighted mean annual
//! wage per exposure bin, and the bachelor's-or-higher attainment share of
//! the least and most exposed occupation quintiles.

use crate::algorithm::binning::{assign_quantile_bins, weighted_mean_by_bin};
use crate::algorithm::join::first_occurrence_index;
use crate::algorithm::stats::{fill_missing_weights, split_by_percentile, weighted_mean};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{BinSummary, EducationRecord, EmploymentRecord, ExposureRecord};
use crate::registry;
use crate::render::{charts, tables};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Wage chart artifact name
pub const WAGE_CHART_FILE: &str = "q3_median_wage_by_aioe_decile.png";

/// Education chart artifact name
pub const EDUCATION_CHART_FILE: &str = "q3_entry_level_education_share_top_vs_bottom.png";

/// Per-bin table written next to the wage chart when bin tables are enabled
const WAGE_TABLE_FILE: &str = "q3_median_wage_by_aioe_decile.csv";

/// Exposure fraction bounding the low group
const LOW_QUANTILE: f64 = 0.2;

/// Exposure fraction bounding the high group
const HIGH_QUANTILE: f64 = 0.8;

/// Per-bin employment-weighted mean annual wage
///
/// Occupations without a wage are dropped; occupations without an
/// employment count keep a unit weight. Errors when nothing joins.
pub fn compute_wage_bins(
    exposure: &[ExposureRecord],
    snapshot: &[EmploymentRecord],
) -> Result<Vec<BinSummary>> {
    let by_code = first_occurrence_index(snapshot.iter().map(|r| r.soc.as_str()));

    let mut scores = Vec::new();
    let mut wages = Vec::new();
    let mut weight_cells = Vec::new();
    for record in exposure {
        let Some(&row) = by_code.get(record.soc.as_str()) else {
            continue;
        };
        let Some(wage) = snapshot[row].annual_wage else {
            continue;
        };
        scores.push(record.aioe);
        wages.push(wage);
        weight_cells.push(snapshot[row].employment);
    }
    if scores.is_empty() {
        return Err(AnalysisError::DataError(
            "no occupations with a usable wage after joining".to_string(),
        ));
    }

    let weights = fill_missing_weights(&weight_cells);
    let (labels, bins) = assign_quantile_bins(&scores)?;
    Ok(weighted_mean_by_bin(&labels, bins, &wages, &weights))
}

/// Employment-weighted attainment share of the low and high exposure groups
///
/// Occupations must appear in all three tables. Returns `(low, high)`; a
/// group share is undefined when its total weight is not positive.
pub fn compute_education_groups(
    exposure: &[ExposureRecord],
    snapshot: &[EmploymentRecord],
    education: &[EducationRecord],
) -> Result<(Option<f64>, Option<f64>)> {
    let by_snapshot = first_occurrence_index(snapshot.iter().map(|r| r.soc.as_str()));
    let by_education = first_occurrence_index(education.iter().map(|r| r.soc.as_str()));

    let mut scores = Vec::new();
    let mut shares = Vec::new();
    let mut weight_cells = Vec::new();
    for record in exposure {
        let Some(&snapshot_row) = by_snapshot.get(record.soc.as_str()) else {
            continue;
        };
        let Some(&education_row) = by_education.get(record.soc.as_str()) else {
            continue;
        };
        scores.push(record.aioe);
        shares.push(education[education_row].advanced_share);
        weight_cells.push(snapshot[snapshot_row].employment);
    }
    if scores.is_empty() {
        return Err(AnalysisError::DataError(
            "no occupations shared between the exposure, snapshot and education tables"
                .to_string(),
        ));
    }

    let weights = fill_missing_weights(&weight_cells);
    let (low, high) = split_by_percentile(&scores, LOW_QUANTILE, HIGH_QUANTILE);
    Ok((
        group_mean(&low, &shares, &weights),
        group_mean(&high, &shares, &weights),
    ))
}

fn group_mean(indices: &[usize], values: &[f64], weights: &[f64]) -> Option<f64> {
    let group_values: Vec<f64> = indices.iter().map(|&index| values[index]).collect();
    let group_weights: Vec<f64> = indices.iter().map(|&index| weights[index]).collect();
    weighted_mean(&group_values, &group_weights)
}

/// Load the tables, compute both views, and render both charts
pub fn run(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let exposure = registry::exposure::read(&config.data_dir.join(registry::exposure::DEFAULT_FILE))?;
    let snapshot = registry::oews::read(&config.data_dir.join(registry::oews::DEFAULT_FILE_2023))?;
    let education =
        registry::education::read(&config.data_dir.join(registry::education::DEFAULT_FILE))?;

    let bins = compute_wage_bins(&exposure, &snapshot)?;
    let (low_share, high_share) = compute_education_groups(&exposure, &snapshot, &education)?;
    info!(
        "Computed wages over {} bins, attainment shares {:?} (low) and {:?} (high)",
        bins.len(),
        low_share,
        high_share
    );

    fs::create_dir_all(&config.output_dir)?;
    let wage_path = config.output_dir.join(WAGE_CHART_FILE);
    charts::bin_bar_chart(
        &bins,
        "Median annual wage by AI exposure (2023)",
        "AI exposure bins (low → high)",
        "Median annual wage (employment-weighted)",
        &wage_path,
    )?;

    let education_path = config.output_dir.join(EDUCATION_CHART_FILE);
    let groups = vec![
        ("Low AIOE (bottom 20%)".to_string(), low_share),
        ("High AIOE (top 20%)".to_string(), high_share),
    ];
    charts::group_bar_chart(
        &groups,
        "Education disparity by AI exposure (employment-weighted)",
        "Share with Bachelor's degree or higher (%)",
        &education_path,
    )?;

    let mut artifacts = vec![wage_path, education_path];
    if config.write_bin_tables {
        let table_path = config.output_dir.join(WAGE_TABLE_FILE);
        tables::write_bin_table(&bins, "employment_weighted_median_annual_wage", &table_path)?;
        artifacts.push(table_path);
    }
    Ok(artifacts)
}
