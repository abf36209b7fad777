//! Entry-level education attainment loader
//!
//! The education table mirrors the skills table shape: one title line,
//! Windows-1252 content, occupation code in the second column when the
//! header is unrecognizable. The degree attainment columns are found by name
//! fragment and summed into one bachelor's-or-higher share per occupation.

use crate::error::{AnalysisError, Result};
use crate::models::EducationRecord;
use crate::reader::{self, TableOptions};
use crate::schema::{self, soc_column_rule};
use crate::soc;
use arrow::record_batch::RecordBatch;
use log::info;
use std::path::Path;

/// File name the education table is published under
pub const DEFAULT_FILE: &str = "education(Table 5.csv";

/// Title lines above the header row
const SKIP_ROWS: usize = 1;

/// Position of the occupation code when no header matches by name
const SOC_FALLBACK_INDEX: usize = 1;

/// Name fragments identifying an advanced degree attainment column
const DEGREE_KEYWORDS: [&str; 4] = ["bachelor", "master", "doctoral", "professional"];

/// Read the education table from `path`
///
/// # Arguments
/// * `path` - CSV file containing the attainment table, title line included
///
/// # Returns
/// * `Result<Vec<EducationRecord>>` - One bachelor's-or-higher share per occupation
pub fn read(path: &Path) -> Result<Vec<EducationRecord>> {
    let options = TableOptions {
        skip_rows: SKIP_ROWS,
        ..TableOptions::default()
    };
    let batch = reader::read_table(path, &options)?;
    from_batch(&batch)
}

/// Extract education records from an already-read table
pub fn from_batch(batch: &RecordBatch) -> Result<Vec<EducationRecord>> {
    let headers = reader::column_names(batch);
    let soc_col = soc_column_rule(Some(SOC_FALLBACK_INDEX)).require(&headers)?;

    let degree_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(index, header)| *index != soc_col && is_degree_column(header))
        .map(|(index, _)| index)
        .collect();
    if degree_cols.is_empty() {
        return Err(AnalysisError::SchemaError(
            "no degree attainment columns found".to_string(),
        ));
    }

    let mut records = Vec::new();
    for row in 0..batch.num_rows() {
        let Some(code) = soc::normalize(reader::cell_value(batch, soc_col, row)) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        // Missing attainment cells drop out of the sum, so an occupation
        // with no published values ends up with a share of zero.
        let advanced_share: f64 = degree_cols
            .iter()
            .filter_map(|column| {
                reader::cell_value(batch, *column, row).and_then(schema::parse_numeric)
            })
            .sum();
        records.push(EducationRecord {
            soc: code,
            advanced_share,
        });
    }
    info!(
        "Loaded {} education records from {} degree columns",
        records.len(),
        degree_cols.len()
    );
    Ok(records)
}

fn is_degree_column(header: &str) -> bool {
    let lower = header.to_lowercase();
    DEGREE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}
