//! CSV table output for analysis results
//!
//! Result tables are assembled as Arrow record batches and written with the
//! Arrow CSV writer, so undefined values become empty cells.

use crate::error::Result;
use crate::models::{BinSummary, CorrelationRow};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Write a correlation table with `Skill_Category` and `Correlation` columns
pub fn write_correlation_table(rows: &[CorrelationRow], path: &Path) -> Result<()> {
    let schema = Schema::new(vec![
        Field::new("Skill_Category", DataType::Utf8, false),
        Field::new("Correlation", DataType::Float64, true),
    ]);

    let categories: Vec<&str> = rows.iter().map(|row| row.category.as_str()).collect();
    let coefficients: Vec<Option<f64>> = rows.iter().map(|row| row.coefficient).collect();

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(categories)) as ArrayRef,
            Arc::new(Float64Array::from(coefficients)) as ArrayRef,
        ],
    )?;

    write_batch(&batch, path)
}

/// Write per-bin summaries with `bin`, `count` and a named value column
pub fn write_bin_table(bins: &[BinSummary], value_name: &str, path: &Path) -> Result<()> {
    let schema = Schema::new(vec![
        Field::new("bin", DataType::UInt64, false),
        Field::new("count", DataType::UInt64, false),
        Field::new(value_name, DataType::Float64, true),
    ]);

    let labels: Vec<u64> = bins.iter().map(|summary| summary.bin as u64).collect();
    let counts: Vec<u64> = bins.iter().map(|summary| summary.count as u64).collect();
    let values: Vec<Option<f64>> = bins.iter().map(|summary| summary.value).collect();

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(UInt64Array::from(labels)) as ArrayRef,
            Arc::new(UInt64Array::from(counts)) as ArrayRef,
            Arc::new(Float64Array::from(values)) as ArrayRef,
        ],
    )?;

    write_batch(&batch, path)
}

fn write_batch(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_correlation_table_header_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("correlations.csv");

        let rows = vec![
            CorrelationRow {
                category: "Programming".to_string(),
                coefficient: Some(0.82),
            },
            CorrelationRow {
                category: "Repairing".to_string(),
                coefficient: Some(-0.4),
            },
        ];
        write_correlation_table(&rows, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Skill_Category,Correlation"));
        assert_eq!(lines.next(), Some("Programming,0.82"));
        assert_eq!(lines.next(), Some("Repairing,-0.4"));
    }

    #[test]
    fn test_undefined_coefficient_is_empty_cell() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("correlations.csv");

        let rows = vec![CorrelationRow {
            category: "Installation".to_string(),
            coefficient: None,
        }];
        write_correlation_table(&rows, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.lines().any(|line| line == "Installation,"));
    }

    #[test]
    fn test_bin_table_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bins.csv");

        let bins = vec![
            BinSummary {
                bin: 1,
                count: 3,
                value: Some(12.5),
            },
            BinSummary {
                bin: 2,
                count: 0,
                value: None,
            },
        ];
        write_bin_table(&bins, "employment_growth_pct", &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("bin,count,employment_growth_pct"));
        assert_eq!(lines.next(), Some("1,3,12.5"));
        assert_eq!(lines.next(), Some("2,0,"));
    }
}
