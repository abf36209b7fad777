//! Delimited table reading into Arrow record batches
//!
//! Every source table is read as strings: the file is decoded (UTF-8 with a
//! Windows-1252 fallback for the legacy BLS exports), leading title rows are
//! skipped, and the remainder is parsed against an all-nullable Utf8 schema
//! derived from the header. Cell-level coercion happens later under the
//! registries' column rules, so nothing is lost at this layer.

use crate::error::{AnalysisError, Result};
use crate::schema;
use arrow::array::{Array, StringArray};
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use encoding_rs::WINDOWS_1252;
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Rows per batch while parsing
const BATCH_SIZE: usize = 8192;

/// Rows sampled when inferring the column count
const INFER_ROWS: usize = 100;

/// Read options for one source table
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Title lines to drop before the header row
    pub skip_rows: usize,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            delimiter: b',',
        }
    }
}

/// Read a delimited table into a single record batch of nullable strings
///
/// A missing file, undecodable content, or unparseable structure is an
/// error; individual cells are never rejected here.
pub fn read_table(path: &Path, options: &TableOptions) -> Result<RecordBatch> {
    let bytes = fs::read(path)?;
    let text = decode_bytes(bytes);
    let content = skip_lines(&text, options.skip_rows);
    if content.trim().is_empty() {
        return Err(AnalysisError::DataError(format!(
            "{} has no rows after skipping {} line(s)",
            path.display(),
            options.skip_rows
        )));
    }
    let batch = parse_delimited(content, options.delimiter)?;
    debug!(
        "Read {} rows x {} columns from {}",
        batch.num_rows(),
        batch.num_columns(),
        path.display()
    );
    Ok(batch)
}

/// Column names of a batch, in table order
#[must_use]
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

/// Read one cell, treating nulls and blank strings as missing
///
/// The returned value is trimmed; coercion helpers downstream expect that.
#[must_use]
pub fn cell_value<'a>(batch: &'a RecordBatch, column: usize, row: usize) -> Option<&'a str> {
    let array = batch.column(column).as_any().downcast_ref::<StringArray>()?;
    if array.is_null(row) {
        return None;
    }
    let trimmed = array.value(row).trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Parse one column to numbers, cell by cell
#[must_use]
pub fn numeric_column(batch: &RecordBatch, column: usize) -> Vec<Option<f64>> {
    (0..batch.num_rows())
        .map(|row| cell_value(batch, column, row).and_then(schema::parse_numeric))
        .collect()
}

fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, _) = WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.split_once('\n') {
            Some((_, tail)) => rest = tail,
            None => return "",
        }
    }
    rest
}

fn parse_delimited(content: &str, delimiter: u8) -> Result<RecordBatch> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter)
        .with_truncated_rows(true);

    // Inference is only used for the header names and column count; the
    // schema is rebuilt as nullable Utf8 so every cell survives verbatim.
    let (inferred, _) = format
        .clone()
        .infer_schema(Cursor::new(content.as_bytes()), Some(INFER_ROWS))?;
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|field| Field::new(field.name(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(content.as_bytes()))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}
