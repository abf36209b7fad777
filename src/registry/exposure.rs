//! AIOE exposure table loader
//!
//! The appendix table from Felten, Raj and Seamans maps each detailed SOC
//! occupation to an AI Occupational Exposure (AIOE) score. Rows without a
//! usable code or score are dropped here, so downstream joins and binning
//! only ever see complete records.

use crate::error::Result;
use crate::models::ExposureRecord;
use crate::reader::{self, TableOptions};
use crate::schema::{self, ColumnPattern, ColumnRule, soc_column_rule};
use crate::soc;
use arrow::record_batch::RecordBatch;
use log::info;
use std::path::Path;

/// File name the exposure appendix is published under
pub const DEFAULT_FILE: &str = "AIOE_DataAppendix(Appendix A).csv";

fn score_rule() -> ColumnRule {
    ColumnRule::new("AIOE")
        .with_pattern(ColumnPattern::equals("aioe"))
        .with_pattern(ColumnPattern::contains("aioe"))
}

/// Read the exposure table from `path`
///
/// # Arguments
/// * `path` - CSV file containing the appendix table
///
/// # Returns
/// * `Result<Vec<ExposureRecord>>` - One record per occupation with a score
pub fn read(path: &Path) -> Result<Vec<ExposureRecord>> {
    let batch = reader::read_table(path, &TableOptions::default())?;
    from_batch(&batch)
}

/// Extract exposure records from an already-read table
pub fn from_batch(batch: &RecordBatch) -> Result<Vec<ExposureRecord>> {
    let headers = reader::column_names(batch);
    let soc_col = soc_column_rule(None).require(&headers)?;
    let score_col = score_rule().require(&headers)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let Some(code) = soc::normalize(reader::cell_value(batch, soc_col, row)) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        let Some(score) =
            reader::cell_value(batch, score_col, row).and_then(schema::parse_numeric)
        else {
            continue;
        };
        records.push(ExposureRecord { soc: code, aioe: score });
    }
    info!(
        "Loaded {} exposure records from {} table rows",
        records.len(),
        batch.num_rows()
    );
    Ok(records)
}
