//! Skill correlates of exposure
//!
//! Joins each occupation's skill scores onto its exposure score, computes a
//! Pearson correlation per skill category, writes the full sorted table, and
//! charts the strongest correlates from both ends of the ranking.

use crate::algorithm::correlation::correlation_table;
use crate::algorithm::join::first_occurrence_index;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{CorrelationRow, ExposureRecord, SkillMatrix};
use crate::registry;
use crate::render::{charts, tables};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Table artifact name, written into the data directory
pub const TABLE_FILE: &str = "q2_top_skills_correlations.csv";

/// Chart artifact name
pub const CHART_FILE: &str = "q2_skills_correlation_with_aioe.png";

/// Rows charted from each end of the sorted table
const EXTREME_ROWS: usize = 10;

/// Correlation of every skill category with exposure, sorted descending
///
/// Only occupations present in both tables contribute. Errors when the join
/// is empty; a category without enough complete pairs gets an undefined
/// coefficient and sorts to the end.
pub fn compute(exposure: &[ExposureRecord], matrix: &SkillMatrix) -> Result<Vec<CorrelationRow>> {
    let by_code = first_occurrence_index(matrix.rows.iter().map(|row| row.soc.as_str()));

    let mut scores = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); matrix.categories.len()];
    for record in exposure {
        let Some(&index) = by_code.get(record.soc.as_str()) else {
            continue;
        };
        scores.push(record.aioe);
        for (column, score) in columns.iter_mut().zip(&matrix.rows[index].scores) {
            column.push(*score);
        }
    }
    if scores.is_empty() {
        return Err(AnalysisError::DataError(
            "no occupations shared between the exposure table and the skills table".to_string(),
        ));
    }
    Ok(correlation_table(&matrix.categories, &columns, &scores))
}

/// The head and tail of the sorted table, concatenated
///
/// When the table has at most `2 * count` rows the two selections overlap
/// and rows repeat, exactly as concatenating a head and tail slice would.
#[must_use]
pub fn select_extremes(rows: &[CorrelationRow], count: usize) -> Vec<CorrelationRow> {
    let head = rows.iter().take(count);
    let tail = rows.iter().skip(rows.len().saturating_sub(count));
    head.chain(tail).cloned().collect()
}

/// Load the tables, compute the ranking, and render both artifacts
pub fn run(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let exposure = registry::exposure::read(&config.data_dir.join(registry::exposure::DEFAULT_FILE))?;
    let matrix = registry::skills::read(&config.data_dir.join(registry::skills::DEFAULT_FILE))?;

    let rows = compute(&exposure, &matrix)?;
    info!("Correlated {} skill categories with exposure", rows.len());

    // The full sorted table lands next to the source data, the chart only
    // shows the extremes.
    let table_path = config.data_dir.join(TABLE_FILE);
    tables::write_correlation_table(&rows, &table_path)?;

    fs::create_dir_all(&config.output_dir)?;
    let chart_path = config.output_dir.join(CHART_FILE);
    let extremes = select_extremes(&rows, EXTREME_ROWS);
    charts::correlation_bar_chart(
        &extremes,
        "Skill categories most associated with AI exposure",
        "Correlation with AI exposure (AIOE)",
        &chart_path,
    )?;

    Ok(vec![chart_path, table_path])
}
