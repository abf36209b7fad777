//! AI job postings share panel loader
//!
//! The Our World in Data export is a country-year panel with fixed `Entity`,
//! `Code` and `Year` identifier columns. The measured share sits in the last
//! remaining column, whose exact name varies between releases, so it is
//! located by elimination rather than by name.

use crate::error::{AnalysisError, Result};
use crate::models::PostingsPoint;
use crate::reader::{self, TableOptions};
use crate::schema;
use arrow::record_batch::RecordBatch;
use log::info;
use std::path::Path;

/// File name the postings panel is published under
pub const DEFAULT_FILE: &str = "share-artificial-intelligence-job-postings.csv";

/// Identifier columns every release carries under these exact names
const KEY_COLUMNS: [&str; 3] = ["Entity", "Code", "Year"];

/// Read the postings panel from `path`
pub fn read(path: &Path) -> Result<Vec<PostingsPoint>> {
    let batch = reader::read_table(path, &TableOptions::default())?;
    from_batch(&batch)
}

/// Extract postings observations from an already-read panel
pub fn from_batch(batch: &RecordBatch) -> Result<Vec<PostingsPoint>> {
    let headers = reader::column_names(batch);
    let entity_col = key_column(&headers, "Entity")?;
    let code_col = key_column(&headers, "Code")?;
    let year_col = key_column(&headers, "Year")?;
    let value_col = headers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, header)| !KEY_COLUMNS.contains(&header.as_str()))
        .map(|(index, _)| index)
        .ok_or_else(|| {
            AnalysisError::SchemaError(
                "no value column besides Entity, Code and Year".to_string(),
            )
        })?;

    let mut points = Vec::new();
    for row in 0..batch.num_rows() {
        let Some(entity) = reader::cell_value(batch, entity_col, row) else {
            continue;
        };
        let Some(code) = reader::cell_value(batch, code_col, row) else {
            continue;
        };
        let Some(year) = reader::cell_value(batch, year_col, row)
            .and_then(|cell| cell.parse::<i32>().ok())
        else {
            continue;
        };
        let Some(share) =
            reader::cell_value(batch, value_col, row).and_then(schema::parse_numeric)
        else {
            continue;
        };
        points.push(PostingsPoint {
            entity: entity.to_string(),
            code: code.to_string(),
            year,
            share,
        });
    }
    info!(
        "Loaded {} postings observations from {} table rows",
        points.len(),
        batch.num_rows()
    );
    Ok(points)
}

fn key_column(headers: &[String], name: &str) -> Result<usize> {
    headers.iter().position(|header| header == name).ok_or_else(|| {
        AnalysisError::SchemaError(format!("required column '{name}' not found"))
    })
}
