//! OEWS national snapshot loader
//!
//! The BLS Occupational Employment and Wage Statistics exports carry one row
//! per occupation code, including summary rows for major groups. Only rows
//! with a detailed `NN-NNNN` code are kept. Employment counts and wages are
//! published with thousand separators and suppression markers, both of which
//! are handled by the numeric coercion in [`crate::schema`].
//!
//! Wages cascade at table level: the median annual wage column is preferred,
//! then the mean; when neither yields a single value the hourly columns are
//! used instead, scaled to a 2080 hour work year.

use crate::error::Result;
use crate::models::EmploymentRecord;
use crate::reader::{self, TableOptions};
use crate::schema::{self, ColumnPattern, ColumnRule, soc_column_rule};
use crate::soc;
use arrow::record_batch::RecordBatch;
use log::{info, warn};
use std::path::Path;

/// File name of the 2013 national snapshot
pub const DEFAULT_FILE_2013: &str = "national_M2013_dl(national_dl).csv";

/// File name of the 2023 national snapshot
pub const DEFAULT_FILE_2023: &str = "national_M2023_dl(national_M2023_dl).csv";

/// Hours in a full-time work year, used to annualize hourly wages
pub const HOURS_PER_YEAR: f64 = 2080.0;

fn employment_rule() -> ColumnRule {
    ColumnRule::new("TOT_EMP").with_pattern(ColumnPattern::equals("tot_emp"))
}

/// Read an OEWS snapshot from `path`
///
/// # Arguments
/// * `path` - CSV file containing one national OEWS vintage
///
/// # Returns
/// * `Result<Vec<EmploymentRecord>>` - One record per detailed occupation
pub fn read(path: &Path) -> Result<Vec<EmploymentRecord>> {
    let batch = reader::read_table(path, &TableOptions::default())?;
    from_batch(&batch)
}

/// Extract employment records from an already-read snapshot
pub fn from_batch(batch: &RecordBatch) -> Result<Vec<EmploymentRecord>> {
    let headers = reader::column_names(batch);
    let soc_col = soc_column_rule(None).require(&headers)?;
    let emp_col = employment_rule().require(&headers)?;

    let mut kept: Vec<(usize, String)> = Vec::new();
    for row in 0..batch.num_rows() {
        let Some(code) = soc::normalize(reader::cell_value(batch, soc_col, row)) else {
            continue;
        };
        if soc::is_detailed(&code) {
            kept.push((row, code));
        }
    }

    let wages = annual_wages(batch, &headers, &kept);

    let records: Vec<EmploymentRecord> = kept
        .into_iter()
        .enumerate()
        .map(|(index, (row, code))| EmploymentRecord {
            soc: code,
            employment: reader::cell_value(batch, emp_col, row).and_then(schema::parse_numeric),
            annual_wage: wages.as_ref().and_then(|values| values[index]),
        })
        .collect();
    info!(
        "Loaded {} detailed occupations from {} table rows",
        records.len(),
        batch.num_rows()
    );
    Ok(records)
}

/// Annual wage per kept row, applying the table-level cascade
///
/// Returns `None` when the table carries no usable wage column at all; the
/// caller then leaves every wage missing.
fn annual_wages(
    batch: &RecordBatch,
    headers: &[String],
    kept: &[(usize, String)],
) -> Option<Vec<Option<f64>>> {
    let annual = column_index(headers, "a_median").or_else(|| column_index(headers, "a_mean"));
    if let Some(column) = annual {
        let values = parse_rows(batch, column, kept);
        if values.iter().any(Option::is_some) {
            return Some(values);
        }
    }

    let hourly = column_index(headers, "h_median").or_else(|| column_index(headers, "h_mean"))?;
    warn!("annual wage columns missing or fully suppressed, annualizing hourly rates");
    Some(
        parse_rows(batch, hourly, kept)
            .into_iter()
            .map(|value| value.map(|rate| rate * HOURS_PER_YEAR))
            .collect(),
    )
}

fn parse_rows(batch: &RecordBatch, column: usize, kept: &[(usize, String)]) -> Vec<Option<f64>> {
    kept.iter()
        .map(|(row, _)| reader::cell_value(batch, column, *row).and_then(schema::parse_numeric))
        .collect()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}
