//! Skill importance matrix loader
//!
//! The published skills table has a title line above the header and is
//! Windows-1252 encoded. Every numeric column that is not the occupation
//! code or a denylisted measure counts as a skill category; source column
//! order is preserved so charts and tables stay comparable across releases.

use crate::error::Result;
use crate::models::{SkillMatrix, SkillRow};
use crate::reader::{self, TableOptions};
use crate::schema::{self, soc_column_rule};
use crate::soc;
use arrow::record_batch::RecordBatch;
use log::info;
use std::path::Path;

/// File name the skills table is published under
pub const DEFAULT_FILE: &str = "skills(Table 6.csv";

/// Title lines above the header row
const SKIP_ROWS: usize = 1;

/// Position of the occupation code when no header matches by name
const SOC_FALLBACK_INDEX: usize = 1;

/// Read the skills table from `path`
///
/// # Arguments
/// * `path` - CSV file containing the skills table, title line included
///
/// # Returns
/// * `Result<SkillMatrix>` - Category names plus per-occupation score rows
pub fn read(path: &Path) -> Result<SkillMatrix> {
    let options = TableOptions {
        skip_rows: SKIP_ROWS,
        ..TableOptions::default()
    };
    let batch = reader::read_table(path, &options)?;
    from_batch(&batch)
}

/// Extract the skill matrix from an already-read table
pub fn from_batch(batch: &RecordBatch) -> Result<SkillMatrix> {
    let headers = reader::column_names(batch);
    let soc_col = soc_column_rule(Some(SOC_FALLBACK_INDEX)).require(&headers)?;

    let mut categories = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == soc_col || schema::is_denylisted_feature(header) {
            continue;
        }
        let Some(values) = numeric_feature(batch, index) else {
            continue;
        };
        categories.push(header.trim().to_string());
        columns.push(values);
    }

    let mut rows = Vec::new();
    for row in 0..batch.num_rows() {
        let Some(code) = soc::normalize(reader::cell_value(batch, soc_col, row)) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        let scores = columns.iter().map(|column| column[row]).collect();
        rows.push(SkillRow { soc: code, scores });
    }
    info!(
        "Loaded {} skill categories across {} occupations",
        categories.len(),
        rows.len()
    );
    Ok(SkillMatrix { categories, rows })
}

/// Column values when every non-missing cell parses as a number
///
/// A single unparseable cell disqualifies the whole column; a column with no
/// values at all still qualifies and later yields an undefined correlation.
fn numeric_feature(batch: &RecordBatch, column: usize) -> Option<Vec<Option<f64>>> {
    let mut values = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        match reader::cell_value(batch, column, row) {
            None => values.push(None),
            Some(cell) => match schema::parse_numeric(cell) {
                Some(value) => values.push(Some(value)),
                None => return None,
            },
        }
    }
    Some(values)
}
