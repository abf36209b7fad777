//! Chart rendering for the analysis pipelines
//!
//! Bar and line charts built with the [`plotters`] crate, saved as PNG
//! files with a fixed 1200x800 resolution. Undefined or non-finite values
//! are skipped with a warning so a degenerate bin shows up as a gap in the
//! chart instead of failing the run.

use crate::models::{BinSummary, CorrelationRow};
use log::warn;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Chart resolution in pixels
const RESOLUTION: (u32, u32) = (1200, 800);

const FONT: &str = "sans-serif";
const CAPTION_STYLE: (&str, u32) = (FONT, 36);
const DESC_STYLE: (&str, u32) = (FONT, 26);
const LABEL_STYLE: (&str, u32) = (FONT, 20);
const CATEGORY_LABEL_STYLE: (&str, u32) = (FONT, 16);

/// Vertical bars of per-bin values, bin 1 on the left
pub fn bin_bar_chart(
    bins: &[BinSummary],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    output_path: &Path,
) -> Result<()> {
    if bins.is_empty() {
        return Err(ChartError::InvalidData("no bins to draw".to_string()));
    }
    let bars: Vec<(f64, f64)> = bins
        .iter()
        .filter_map(|summary| match summary.value {
            Some(value) if value.is_finite() => Some((summary.bin as f64, value)),
            Some(value) => {
                warn!("bin {} has non-finite value {value}, skipping", summary.bin);
                None
            }
            None => {
                warn!("bin {} has no defined value, skipping", summary.bin);
                None
            }
        })
        .collect();

    let drawing_area = BitMapBackend::new(output_path, RESOLUTION).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let x_range = 0.5..bins.len() as f64 + 0.5;
    let (y_min, y_max) = padded_span(bars.iter().map(|(_, value)| *value));

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, CAPTION_STYLE)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(DESC_STYLE)
        .label_style(LABEL_STYLE)
        .x_labels(bins.len())
        .x_label_formatter(&integer_label)
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(bars.iter().map(|&(bin, value)| {
            Rectangle::new([(bin - 0.35, 0.0), (bin + 0.35, value)], BLUE.filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Vertical bars over named groups
pub fn group_bar_chart(
    groups: &[(String, Option<f64>)],
    title: &str,
    y_desc: &str,
    output_path: &Path,
) -> Result<()> {
    if groups.is_empty() {
        return Err(ChartError::InvalidData("no groups to draw".to_string()));
    }
    let names: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    let bars: Vec<(f64, f64)> = groups
        .iter()
        .enumerate()
        .filter_map(|(index, (name, value))| match value {
            Some(value) if value.is_finite() => Some((index as f64, *value)),
            _ => {
                warn!("group '{name}' has no defined value, skipping");
                None
            }
        })
        .collect();

    let drawing_area = BitMapBackend::new(output_path, RESOLUTION).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let x_range = -0.5..groups.len() as f64 - 0.5;
    let (y_min, y_max) = padded_span(bars.iter().map(|(_, value)| *value));

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, CAPTION_STYLE)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .y_desc(y_desc)
        .axis_desc_style(DESC_STYLE)
        .label_style(LABEL_STYLE)
        .x_labels(groups.len())
        .x_label_formatter(&|x| index_label(&names, *x))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(bars.iter().map(|&(index, value)| {
            Rectangle::new([(index - 0.3, 0.0), (index + 0.3, value)], BLUE.filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Horizontal bars of correlation coefficients with a guide line at zero
///
/// The first row is drawn at the bottom. Rows with an undefined
/// coefficient keep their slot so the selection stays visible, but no bar
/// is drawn for them.
pub fn correlation_bar_chart(
    rows: &[CorrelationRow],
    title: &str,
    x_desc: &str,
    output_path: &Path,
) -> Result<()> {
    if rows.is_empty() {
        return Err(ChartError::InvalidData(
            "no correlation rows to draw".to_string(),
        ));
    }
    let names: Vec<String> = rows.iter().map(|row| row.category.clone()).collect();
    let bars: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match row.coefficient {
            Some(value) if value.is_finite() => Some((index as f64, value)),
            _ => {
                warn!(
                    "category '{}' has no defined correlation, skipping",
                    row.category
                );
                None
            }
        })
        .collect();

    let drawing_area = BitMapBackend::new(output_path, RESOLUTION).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let (x_min, x_max) = padded_span(bars.iter().map(|(_, value)| *value));
    let y_range = -0.5..rows.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, CAPTION_STYLE)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(320)
        .build_cartesian_2d(x_min..x_max, y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .axis_desc_style(DESC_STYLE)
        .label_style(CATEGORY_LABEL_STYLE)
        .y_labels(rows.len())
        .y_label_formatter(&|y| index_label(&names, *y))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(bars.iter().map(|&(index, value)| {
            Rectangle::new([(0.0, index - 0.4), (value, index + 0.4)], BLUE.filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, -0.5), (0.0, rows.len() as f64 - 0.5)],
            BLACK.stroke_width(1),
        )))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Line of year-ordered observations
pub fn year_line_chart(
    points: &[(i32, f64)],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    output_path: &Path,
) -> Result<()> {
    if points.is_empty() {
        return Err(ChartError::InvalidData("no points to draw".to_string()));
    }
    let line: Vec<(i32, f64)> = points
        .iter()
        .filter(|(year, share)| {
            if share.is_finite() {
                true
            } else {
                warn!("year {year} has non-finite value {share}, skipping");
                false
            }
        })
        .copied()
        .collect();

    let drawing_area = BitMapBackend::new(output_path, RESOLUTION).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let year_min = line.iter().map(|(year, _)| *year).min().unwrap_or(0);
    let mut year_max = line.iter().map(|(year, _)| *year).max().unwrap_or(0);
    if year_min >= year_max {
        year_max = year_min + 1;
    }
    let (share_min, share_max) = padded_line_span(line.iter().map(|(_, share)| *share));

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, CAPTION_STYLE)
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(year_min..year_max, share_min..share_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(DESC_STYLE)
        .label_style(LABEL_STYLE)
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(line.iter().copied(), &BLUE))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Value span for bar axes: always contains zero, padded on both ends
fn padded_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    let pad = (max - min) * 0.05;
    let (min, mut max) = (min - pad, max + pad);
    if min >= max {
        max = min + 1.0;
    }
    (min, max)
}

/// Value span for line axes: hugs the data instead of anchoring at zero
fn padded_line_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(f64::EPSILON);
    (min - pad, max + pad)
}

fn integer_label(position: &f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() < 1e-6 {
        format!("{rounded:.0}")
    } else {
        String::new()
    }
}

fn index_label(names: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}
