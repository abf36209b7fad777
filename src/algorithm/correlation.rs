//! Pairwise-complete Pearson correlation and the correlation table.

use crate::models::CorrelationRow;
use itertools::izip;
use std::cmp::Ordering;

/// Pearson correlation over the pairwise-complete observations
///
/// Rows where either side is missing are dropped first. Undefined with
/// fewer than two complete pairs or when either side has zero variance.
#[must_use]
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = izip!(xs, ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }
    Some(covariance / (variance_x * variance_y).sqrt())
}

/// Correlate every category column with the exposure scores
///
/// `columns[c]` holds category `c` across the joined rows, aligned with
/// `exposure`. The result is sorted by coefficient, strongest positive
/// first, undefined coefficients last.
#[must_use]
pub fn correlation_table(
    categories: &[String],
    columns: &[Vec<Option<f64>>],
    exposure: &[f64],
) -> Vec<CorrelationRow> {
    let exposure: Vec<Option<f64>> = exposure.iter().copied().map(Some).collect();
    let mut rows: Vec<CorrelationRow> = izip!(categories, columns)
        .map(|(category, column)| CorrelationRow {
            category: category.clone(),
            coefficient: pearson(column, &exposure),
        })
        .collect();
    sort_descending(&mut rows);
    rows
}

/// Sort correlation rows by coefficient, descending, undefined last
pub fn sort_descending(rows: &mut [CorrelationRow]) {
    rows.sort_by(|a, b| match (a.coefficient, b.coefficient) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
